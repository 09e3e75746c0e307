//! Pipeline System - model layer for the pipeline builder
//!
//! This crate provides the data model for the pipeline builder, including
//! the authoring-side block and pipeline types, the run-lifecycle model with
//! per-block status aggregation, and the workspace file tree.

pub mod core;
pub mod repo;
pub mod run;
mod tests;

// Re-export commonly used types
pub use self::core::block::{Block, BlockStatus, BlockType};
pub use self::core::pipeline::{Pipeline, PipelineError};
pub use self::core::registry::PipelineRegistry;
pub use self::run::record::{BlockRunRecord, PipelineRun, RunStatus};
pub use self::run::status::{create_block_status, BlockStatusEntry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
