//! Block and pipeline run records
//!
//! A run record is one execution attempt of a block. Timestamps are kept as
//! the raw strings delivered by the API so that a malformed value degrades
//! at aggregation time instead of failing deserialization.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::status::{create_block_status, BlockStatusEntry};

/// Lifecycle state of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Created but not yet scheduled
    Initial,
    /// Waiting for a worker
    Queued,
    /// Currently executing
    Running,
    /// Finished successfully
    Completed,
    /// Finished with an error
    Failed,
    /// Cancelled before completion
    Cancelled,
    /// Skipped because an upstream block failed
    UpstreamFailed,
    /// Unrecognized status token from a newer server
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Whether the run has reached a final state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed
                | RunStatus::Failed
                | RunStatus::Cancelled
                | RunStatus::UpstreamFailed
        )
    }

    /// Whether the run ended unsuccessfully
    pub fn is_failure(&self) -> bool {
        matches!(self, RunStatus::Failed | RunStatus::UpstreamFailed)
    }
}

/// One execution attempt of a block
///
/// A block may appear multiple times in a run's record sequence (retries);
/// `block_uuid` is not unique across records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRunRecord {
    /// Uuid of the block this run belongs to
    pub block_uuid: String,
    /// ISO-formatted start timestamp, as delivered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    /// ISO-formatted completion timestamp, as delivered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    /// Current lifecycle state of this run
    pub status: RunStatus,
}

impl BlockRunRecord {
    /// Create a record with no timestamps
    pub fn new(block_uuid: impl Into<String>, status: RunStatus) -> Self {
        Self {
            block_uuid: block_uuid.into(),
            started_at: None,
            completed_at: None,
            status,
        }
    }

    /// Set the start timestamp
    pub fn started_at(mut self, timestamp: impl Into<String>) -> Self {
        self.started_at = Some(timestamp.into());
        self
    }

    /// Set the completion timestamp
    pub fn completed_at(mut self, timestamp: impl Into<String>) -> Self {
        self.completed_at = Some(timestamp.into());
        self
    }
}

/// One execution of a whole pipeline, owning its block runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRun {
    /// Identifier of this execution
    pub run_id: Uuid,
    /// Uuid of the pipeline that was executed
    pub pipeline_uuid: String,
    /// Overall lifecycle state
    pub status: RunStatus,
    /// Per-block run records, in observation order
    #[serde(default)]
    pub block_runs: Vec<BlockRunRecord>,
}

impl PipelineRun {
    /// Create a fresh run for the given pipeline
    pub fn new(pipeline_uuid: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            pipeline_uuid: pipeline_uuid.into(),
            status: RunStatus::Initial,
            block_runs: Vec::new(),
        }
    }

    /// Latest status and runtime per block, from this run's records
    pub fn block_statuses(&self) -> HashMap<String, BlockStatusEntry> {
        create_block_status(&self.block_runs)
    }

    /// Whether every block run has reached a terminal state
    ///
    /// An empty run is not considered completed.
    pub fn completed(&self) -> bool {
        !self.block_runs.is_empty() && self.block_runs.iter().all(|r| r.status.is_terminal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&RunStatus::UpstreamFailed).unwrap(),
            r#""upstream_failed""#
        );
        let status: RunStatus = serde_json::from_str(r#""running""#).unwrap();
        assert_eq!(status, RunStatus::Running);
    }

    #[test]
    fn test_unknown_status_token_is_tolerated() {
        let status: RunStatus = serde_json::from_str(r#""paused_for_review""#).unwrap();
        assert_eq!(status, RunStatus::Unknown);
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_terminal_and_failure_predicates() {
        assert!(RunStatus::Completed.is_terminal());
        assert!(RunStatus::Cancelled.is_terminal());
        assert!(!RunStatus::Running.is_terminal());

        assert!(RunStatus::Failed.is_failure());
        assert!(RunStatus::UpstreamFailed.is_failure());
        assert!(!RunStatus::Cancelled.is_failure());
        assert!(!RunStatus::Completed.is_failure());
    }

    #[test]
    fn test_record_deserializes_without_timestamps() {
        let record: BlockRunRecord =
            serde_json::from_str(r#"{"block_uuid":"a","status":"queued"}"#).unwrap();
        assert_eq!(record.started_at, None);
        assert_eq!(record.completed_at, None);
        assert_eq!(record.status, RunStatus::Queued);
    }

    #[test]
    fn test_pipeline_run_completed() {
        let mut run = PipelineRun::new("etl_demo");
        assert!(!run.completed());

        run.block_runs
            .push(BlockRunRecord::new("a", RunStatus::Completed));
        run.block_runs
            .push(BlockRunRecord::new("b", RunStatus::Running));
        assert!(!run.completed());

        run.block_runs[1].status = RunStatus::Failed;
        assert!(run.completed());
    }
}
