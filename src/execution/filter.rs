use super::{ExecutionStatus, LogEntry, LogLevel, WorkflowExecutionLog};
use crate::error::LogError;
use chrono::{DateTime, Utc};

/// Predicate over execution logs. Unset criteria match everything.
///
/// The date range applies to `start_time` and is inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogFilter {
    pub workflow_id: Option<String>,
    pub status: Option<ExecutionStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl LogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_workflow(mut self, workflow_id: impl Into<String>) -> Self {
        self.workflow_id = Some(workflow_id.into());
        self
    }

    pub fn with_status(mut self, status: ExecutionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn since(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    pub fn until(mut self, to: DateTime<Utc>) -> Self {
        self.to = Some(to);
        self
    }

    /// Sets both ends of the range, rejecting an inverted one.
    pub fn between(self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self, LogError> {
        if from > to {
            return Err(LogError::InvalidDateRange { from, to });
        }
        Ok(self.since(from).until(to))
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches(&self, log: &WorkflowExecutionLog) -> bool {
        self.workflow_id
            .as_deref()
            .is_none_or(|id| log.workflow_definition_id == id)
            && self.status.is_none_or(|status| log.status == status)
            && self.from.is_none_or(|from| log.start_time >= from)
            && self.to.is_none_or(|to| log.start_time <= to)
    }

    /// Returns the matching logs in the order they were given.
    pub fn apply<'a, I>(&self, logs: I) -> Vec<&'a WorkflowExecutionLog>
    where
        I: IntoIterator<Item = &'a WorkflowExecutionLog>,
    {
        logs.into_iter().filter(|log| self.matches(log)).collect()
    }
}

/// Predicate over the entries of a single log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFilter {
    pub min_level: Option<LogLevel>,
    pub node_id: Option<String>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_least(mut self, level: LogLevel) -> Self {
        self.min_level = Some(level);
        self
    }

    pub fn for_node(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    pub fn matches(&self, entry: &LogEntry) -> bool {
        self.min_level.is_none_or(|min| entry.level >= min)
            && self
                .node_id
                .as_deref()
                .is_none_or(|node_id| entry.node_id == node_id)
    }

    /// Matching entries of `log`, keeping their chronological order.
    pub fn apply<'a>(&self, log: &'a WorkflowExecutionLog) -> Vec<&'a LogEntry> {
        log.log_entries.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Display ordering of a log collection. Sorting is stable, so logs that
/// started at the same instant keep their original relative order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogSort {
    #[default]
    Original,
    NewestFirst,
    OldestFirst,
}

impl LogSort {
    pub fn sort<'a>(&self, mut logs: Vec<&'a WorkflowExecutionLog>) -> Vec<&'a WorkflowExecutionLog> {
        match self {
            LogSort::Original => {}
            LogSort::NewestFirst => logs.sort_by(|a, b| b.start_time.cmp(&a.start_time)),
            LogSort::OldestFirst => logs.sort_by_key(|log| log.start_time),
        }
        logs
    }
}
