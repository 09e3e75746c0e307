//! Execution log model
//!
//! Shapes for the log files a run leaves behind: the stored file entry, the
//! structured payload of a log line, and the severity scale. Payload parsing
//! is permissive, matching the aggregation policy elsewhere in this module
//! tree: a malformed line yields no data rather than an error.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::block::BlockType;

/// Log severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Log,
    Warning,
    Error,
    Exception,
    Critical,
}

impl LogLevel {
    /// All levels, in severity order
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Log,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Exception,
        LogLevel::Critical,
    ];

    /// Upper-case wire form of the level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Log => "LOG",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Exception => "EXCEPTION",
            LogLevel::Critical => "CRITICAL",
        }
    }
}

/// Error parsing a log level token
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown log level: {0}")]
pub struct ParseLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::ALL
            .iter()
            .copied()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

/// Structured payload of one log line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_run_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_type: Option<BlockType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_stack: Option<Vec<Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_stacktrace: Option<String>,
    pub level: LogLevel,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_run_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_schedule_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_uuid: Option<String>,
    /// Epoch seconds
    pub timestamp: i64,
    pub uuid: String,
}

/// One stored log file entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub name: String,
    pub path: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<LogData>,
}

impl LogRecord {
    /// Parse the record's content as a structured payload
    ///
    /// Returns `None` when the content is not a valid payload line.
    pub fn parse_data(&self) -> Option<LogData> {
        serde_json::from_str(&self.content).ok()
    }

    /// Severity of the record, when structured data is available
    pub fn level(&self) -> Option<LogLevel> {
        self.data.as_ref().map(|d| d.level)
    }
}

/// Keep only records at or above the given severity
///
/// Records without structured data carry no level and are dropped.
pub fn filter_by_level(records: &[LogRecord], min_level: LogLevel) -> Vec<&LogRecord> {
    records
        .iter()
        .filter(|record| record.level().is_some_and(|level| level >= min_level))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_level(level: LogLevel) -> LogRecord {
        LogRecord {
            name: "pipeline.log".to_string(),
            path: "logs/pipeline.log".to_string(),
            content: String::new(),
            created_at: None,
            data: Some(LogData {
                block_run_id: None,
                block_type: None,
                block_uuid: None,
                error: None,
                error_stack: None,
                error_stacktrace: None,
                level,
                message: "it happened".to_string(),
                pipeline_run_id: None,
                pipeline_schedule_id: None,
                pipeline_uuid: None,
                timestamp: 1_700_000_000,
                uuid: "log-1".to_string(),
            }),
        }
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Critical > LogLevel::Error);
        assert!(LogLevel::Warning > LogLevel::Info);
        assert!(LogLevel::Debug < LogLevel::Log);
    }

    #[test]
    fn test_level_from_str_round_trip() {
        for level in LogLevel::ALL {
            assert_eq!(level.as_str().parse::<LogLevel>().unwrap(), level);
        }
        assert!("VERBOSE".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_level_wire_format() {
        assert_eq!(
            serde_json::to_string(&LogLevel::Warning).unwrap(),
            r#""WARNING""#
        );
    }

    #[test]
    fn test_parse_data_permissive() {
        let mut record = record_with_level(LogLevel::Info);
        record.content = r#"{"level":"ERROR","message":"boom","timestamp":5,"uuid":"x"}"#.into();

        let data = record.parse_data().unwrap();
        assert_eq!(data.level, LogLevel::Error);
        assert_eq!(data.message, "boom");

        record.content = "plain text line".into();
        assert!(record.parse_data().is_none());
    }

    #[test]
    fn test_filter_by_level() {
        let records = vec![
            record_with_level(LogLevel::Debug),
            record_with_level(LogLevel::Warning),
            record_with_level(LogLevel::Critical),
            LogRecord {
                name: "raw.log".to_string(),
                path: "logs/raw.log".to_string(),
                content: "unstructured".to_string(),
                created_at: None,
                data: None,
            },
        ];

        let kept = filter_by_level(&records, LogLevel::Warning);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.level().unwrap() >= LogLevel::Warning));
    }
}
