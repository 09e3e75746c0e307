//! Run lifecycle model
//!
//! This module covers one execution of a pipeline: the per-block run
//! records, the aggregation of those records into a per-block status map,
//! and the execution log shapes.

pub mod log;
pub mod record;
pub mod status;

pub use record::{BlockRunRecord, PipelineRun, RunStatus};
pub use status::{create_block_status, BlockStatusEntry};
