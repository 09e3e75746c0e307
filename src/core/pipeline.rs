//! Pipeline model
//!
//! A pipeline is an insertion-ordered collection of blocks connected by
//! upstream/downstream edges. Edges are stored on both endpoints, so adding
//! or removing a block rewires its neighbours. Pipelines round-trip through
//! [`PipelineConfig`], the shape of the on-disk metadata document.

use serde::{Deserialize, Serialize};

use super::block::Block;
use super::clean_name;

/// Pipeline errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    /// Referenced block was not found in the pipeline
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    /// Attempted to add a block with a uuid that already exists
    #[error("Duplicate block uuid: {0}")]
    DuplicateBlock(String),

    /// Attempted to remove a block that still has downstream consumers
    #[error("Block {0} still has downstream blocks: {1:?}")]
    HasDownstreamBlocks(String, Vec<String>),

    /// An edge references a uuid with no matching block
    #[error("Block {0} has an edge to unknown block {1}")]
    DanglingEdge(String, String),
}

/// Serialized pipeline document (the metadata file shape)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub uuid: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// A pipeline definition: named, uuid-identified, insertion-ordered blocks
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    pub uuid: String,
    pub name: String,
    blocks: Vec<Block>,
}

impl Pipeline {
    /// Create an empty pipeline, deriving its uuid from the name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let uuid = clean_name(&name);
        Self {
            uuid,
            name,
            blocks: Vec::new(),
        }
    }

    /// Build a pipeline from its serialized config
    ///
    /// Validates that every upstream/downstream edge references a block
    /// present in the config.
    pub fn from_config(config: PipelineConfig) -> Result<Self, PipelineError> {
        let pipeline = Self {
            uuid: config.uuid,
            name: config.name,
            blocks: config.blocks,
        };
        pipeline.validate()?;
        Ok(pipeline)
    }

    /// Serialize the pipeline back into its config shape
    pub fn to_config(&self) -> PipelineConfig {
        PipelineConfig {
            name: self.name.clone(),
            uuid: self.uuid.clone(),
            blocks: self.blocks.clone(),
        }
    }

    /// Add a block, wiring it below the given upstream blocks
    ///
    /// # Errors
    /// * `DuplicateBlock` if a block with the same uuid already exists
    /// * `BlockNotFound` if any upstream uuid is unknown
    pub fn add_block(
        &mut self,
        mut block: Block,
        upstream_block_uuids: &[String],
    ) -> Result<(), PipelineError> {
        if self.contains(&block.uuid) {
            return Err(PipelineError::DuplicateBlock(block.uuid));
        }
        for uuid in upstream_block_uuids {
            if !self.contains(uuid) {
                return Err(PipelineError::BlockNotFound(uuid.clone()));
            }
        }

        for uuid in upstream_block_uuids {
            if let Some(upstream) = self.block_mut(uuid) {
                upstream.downstream_blocks.push(block.uuid.clone());
            }
        }
        block.upstream_blocks = upstream_block_uuids.to_vec();
        self.blocks.push(block);
        Ok(())
    }

    /// Remove a block that has no downstream consumers
    ///
    /// Detaches the block from its upstream neighbours first.
    ///
    /// # Errors
    /// * `BlockNotFound` if the uuid is unknown
    /// * `HasDownstreamBlocks` if other blocks still consume this one
    pub fn remove_block(&mut self, uuid: &str) -> Result<Block, PipelineError> {
        let position = self
            .blocks
            .iter()
            .position(|b| b.uuid == uuid)
            .ok_or_else(|| PipelineError::BlockNotFound(uuid.to_string()))?;

        let downstream = self.blocks[position].downstream_blocks.clone();
        if !downstream.is_empty() {
            return Err(PipelineError::HasDownstreamBlocks(
                uuid.to_string(),
                downstream,
            ));
        }

        let upstream_uuids = self.blocks[position].upstream_blocks.clone();
        for upstream_uuid in &upstream_uuids {
            if let Some(upstream) = self.block_mut(upstream_uuid) {
                upstream.downstream_blocks.retain(|d| d != uuid);
            }
        }

        Ok(self.blocks.remove(position))
    }

    /// Get a block by uuid
    pub fn block(&self, uuid: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.uuid == uuid)
    }

    /// Get a mutable block by uuid
    pub fn block_mut(&mut self, uuid: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.uuid == uuid)
    }

    /// All blocks in insertion order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Block uuids in insertion order
    pub fn block_uuids(&self) -> Vec<String> {
        self.blocks.iter().map(|b| b.uuid.clone()).collect()
    }

    /// Check whether a block with the given uuid exists
    pub fn contains(&self, uuid: &str) -> bool {
        self.blocks.iter().any(|b| b.uuid == uuid)
    }

    /// Number of blocks in the pipeline
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Validate edge consistency
    ///
    /// Every upstream and downstream uuid must reference a block present in
    /// the pipeline.
    pub fn validate(&self) -> Result<(), PipelineError> {
        for block in &self.blocks {
            for edge in block
                .upstream_blocks
                .iter()
                .chain(block.downstream_blocks.iter())
            {
                if !self.contains(edge) {
                    return Err(PipelineError::DanglingEdge(
                        block.uuid.clone(),
                        edge.clone(),
                    ));
                }
            }
        }
        Ok(())
    }
}
