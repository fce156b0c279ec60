use super::{LogFilter, WorkflowExecutionLog};
use crate::error::LogError;
use std::fs;
use std::path::PathBuf;

const TRACING_TARGET: &str = "runeforge::execution";

/// Somewhere execution logs can be read from.
pub trait LogSource {
    /// A short description used in error messages.
    fn name(&self) -> String;

    fn fetch(&self) -> Result<Vec<WorkflowExecutionLog>, LogError>;

    /// Fetches and keeps only the logs matching `filter`, in source order.
    fn fetch_filtered(&self, filter: &LogFilter) -> Result<Vec<WorkflowExecutionLog>, LogError> {
        let logs = self.fetch()?;
        let total = logs.len();
        let matched: Vec<_> = logs.into_iter().filter(|log| filter.matches(log)).collect();
        tracing::debug!(
            target: TRACING_TARGET,
            source = %self.name(),
            total,
            matched = matched.len(),
            "Filtered execution logs"
        );
        Ok(matched)
    }
}

#[derive(Debug, Clone)]
enum JsonOrigin {
    File(PathBuf),
    Inline(String),
}

/// Reads a JSON array of execution logs from a file or an in-memory document.
#[derive(Debug, Clone)]
pub struct JsonLogSource {
    origin: JsonOrigin,
}

impl JsonLogSource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: JsonOrigin::File(path.into()),
        }
    }

    pub fn inline(json: impl Into<String>) -> Self {
        Self {
            origin: JsonOrigin::Inline(json.into()),
        }
    }

    fn fetch_failed(&self, reason: impl ToString) -> LogError {
        LogError::FetchFailed {
            source_name: self.name(),
            reason: reason.to_string(),
        }
    }
}

impl LogSource for JsonLogSource {
    fn name(&self) -> String {
        match &self.origin {
            JsonOrigin::File(path) => path.display().to_string(),
            JsonOrigin::Inline(_) => "<inline>".to_string(),
        }
    }

    fn fetch(&self) -> Result<Vec<WorkflowExecutionLog>, LogError> {
        let logs: Vec<WorkflowExecutionLog> = match &self.origin {
            JsonOrigin::File(path) => {
                let content = fs::read_to_string(path).map_err(|e| self.fetch_failed(e))?;
                serde_json::from_str(&content)
            }
            JsonOrigin::Inline(json) => serde_json::from_str(json),
        }
        .map_err(|e| {
            tracing::warn!(target: TRACING_TARGET, source = %self.name(), error = %e, "Execution logs are malformed");
            self.fetch_failed(e)
        })?;

        tracing::debug!(target: TRACING_TARGET, source = %self.name(), count = logs.len(), "Fetched execution logs");
        Ok(logs)
    }
}

impl LogSource for Vec<WorkflowExecutionLog> {
    fn name(&self) -> String {
        "<memory>".to_string()
    }

    fn fetch(&self) -> Result<Vec<WorkflowExecutionLog>, LogError> {
        Ok(self.clone())
    }
}
