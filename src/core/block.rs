//! Block model
//!
//! This module defines the authoring-side block type together with its
//! category and execution-status enums. A block is one step of a pipeline
//! (a data loader, transformer, or exporter) and carries its upstream and
//! downstream edges as uuid lists.

use serde::{Deserialize, Serialize};

use super::clean_name;

/// Block categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    /// Reads data into the pipeline
    DataLoader,
    /// Transforms data produced by upstream blocks
    Transformer,
    /// Writes data out of the pipeline
    DataExporter,
    /// Free-form experimentation, excluded from the data flow
    Scratchpad,
}

impl BlockType {
    /// Name of the workspace folder holding blocks of this type
    pub fn directory_name(&self) -> &'static str {
        match self {
            BlockType::DataLoader => "data_loaders",
            BlockType::Transformer => "transformers",
            BlockType::DataExporter => "data_exporters",
            BlockType::Scratchpad => "scratchpads",
        }
    }

    /// Canonical output variable names for blocks of this type
    pub fn output_variables(&self) -> &'static [&'static str] {
        match self {
            BlockType::DataLoader | BlockType::Transformer => &["df"],
            BlockType::DataExporter | BlockType::Scratchpad => &[],
        }
    }
}

/// Authoring-side execution status of a block
///
/// Distinct from [`crate::run::record::RunStatus`]: this tracks whether the
/// block has ever been executed in the editor, not the lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockStatus {
    Executed,
    NotExecuted,
}

/// One step of a pipeline definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Human-readable block name
    pub name: String,
    /// Unique identifier within the pipeline, derived from the name
    pub uuid: String,
    /// Block category
    #[serde(rename = "type")]
    pub block_type: BlockType,
    /// Whether this block has been executed
    pub status: BlockStatus,
    /// Uuids of blocks feeding into this one
    #[serde(default)]
    pub upstream_blocks: Vec<String>,
    /// Uuids of blocks consuming this one's output
    #[serde(default)]
    pub downstream_blocks: Vec<String>,
}

impl Block {
    /// Create a new block, deriving its uuid from the name
    pub fn new(name: impl Into<String>, block_type: BlockType) -> Self {
        let name = name.into();
        let uuid = clean_name(&name);
        Self {
            name,
            uuid,
            block_type,
            status: BlockStatus::NotExecuted,
            upstream_blocks: Vec::new(),
            downstream_blocks: Vec::new(),
        }
    }

    /// Create a block with an explicit uuid (e.g., loaded from config)
    pub fn with_uuid(
        name: impl Into<String>,
        uuid: impl Into<String>,
        block_type: BlockType,
    ) -> Self {
        Self {
            name: name.into(),
            uuid: uuid.into(),
            block_type,
            status: BlockStatus::NotExecuted,
            upstream_blocks: Vec::new(),
            downstream_blocks: Vec::new(),
        }
    }

    /// Mark the block as executed
    pub fn mark_executed(&mut self) {
        self.status = BlockStatus::Executed;
    }
}
