use crate::execution::{LogEntry, WorkflowExecutionLog};
use chrono::{DateTime, Utc};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Formats execution logs for a log viewer.
pub struct LogFormatter;

impl LogFormatter {
    /// Format a log's header followed by the given entries.
    pub fn format_log(log: &WorkflowExecutionLog, entries: &[&LogEntry]) -> String {
        let mut result = Self::format_header(log);
        for entry in entries {
            result.push_str("\n  ");
            result.push_str(&Self::format_entry(entry));
        }
        result
    }

    pub fn format_header(log: &WorkflowExecutionLog) -> String {
        let ended = log
            .end_time
            .as_ref()
            .map_or_else(|| "-".to_string(), Self::format_timestamp);
        format!(
            "Execution {} [{}] workflow {} started {} ended {} ({} entries)",
            log.execution_id,
            log.status,
            log.workflow_definition_id,
            Self::format_timestamp(&log.start_time),
            ended,
            log.log_entries.len()
        )
    }

    pub fn format_entry(entry: &LogEntry) -> String {
        let mut line = format!(
            "{} {:<5} {} ({}): {}",
            Self::format_timestamp(&entry.timestamp),
            entry.level,
            entry.node_id,
            entry.node_type,
            entry.message
        );
        if let Some(data) = &entry.data {
            line.push_str(&format!(" {}", data));
        }
        line
    }

    fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
        timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}
