//! Per-block status aggregation
//!
//! Folds an ordered sequence of [`BlockRunRecord`]s into a map from block
//! uuid to the latest observed status and computed runtime. The aggregation
//! is display-oriented and deliberately permissive: a missing or malformed
//! timestamp degrades that block's runtime to `None` rather than failing,
//! and runtimes are not validated (a completion timestamp earlier than the
//! start yields a negative runtime).

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use super::record::{BlockRunRecord, RunStatus};

/// Naive timestamp form emitted by the backend's logs, read as UTC
const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Latest observed status and runtime of one block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStatusEntry {
    /// Status of the last run record seen for this block
    pub status: RunStatus,
    /// Runtime in milliseconds, when both timestamps were parseable
    pub runtime: Option<i64>,
}

/// Fold run records into a per-block status map
///
/// Records are processed in input order; a later record for the same
/// `block_uuid` replaces the earlier entry wholesale, with no field merge.
/// The result's key set is exactly the set of distinct block uuids in the
/// input, and an empty input yields an empty map. Callers holding an
/// optional record list flatten it first:
///
/// ```
/// use pipeline_system::{create_block_status, BlockRunRecord};
///
/// let runs: Option<Vec<BlockRunRecord>> = None;
/// let statuses = create_block_status(runs.as_deref().unwrap_or_default());
/// assert!(statuses.is_empty());
/// ```
pub fn create_block_status<'a, I>(runs: I) -> HashMap<String, BlockStatusEntry>
where
    I: IntoIterator<Item = &'a BlockRunRecord>,
{
    let mut statuses = HashMap::new();

    for run in runs {
        let runtime = match (run.started_at.as_deref(), run.completed_at.as_deref()) {
            (Some(started_at), Some(completed_at)) => {
                match (parse_timestamp(started_at), parse_timestamp(completed_at)) {
                    (Some(started_ms), Some(completed_ms)) => Some(completed_ms - started_ms),
                    _ => {
                        debug!(
                            block_uuid = %run.block_uuid,
                            started_at, completed_at,
                            "unparseable run timestamps, omitting runtime"
                        );
                        None
                    }
                }
            }
            _ => None,
        };

        statuses.insert(
            run.block_uuid.clone(),
            BlockStatusEntry {
                status: run.status,
                runtime,
            },
        );
    }

    statuses
}

/// Parse an ISO-formatted timestamp to epoch milliseconds
///
/// Accepts RFC 3339, or the naive `YYYY-MM-DD HH:MM:SS[.ffffff]` form
/// interpreted as UTC. Anything else parses to `None`.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, NAIVE_TIMESTAMP_FORMAT) {
        return Some(naive.and_utc().timestamp_millis());
    }
    None
}
