use crate::graph::EdgeEndpoint;
use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

/// A single structural problem found while validating a workflow graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Node at position {index} has an empty id")]
    EmptyNodeId { index: usize },

    #[error("Node id '{node_id}' is declared more than once")]
    DuplicateNodeId { node_id: String },

    #[error("Edge id '{edge_id}' is declared more than once")]
    DuplicateEdgeId { edge_id: String },

    #[error("Node '{node_id}' has an unregistered node type: '{type_name}'")]
    UnknownNodeType { node_id: String, type_name: String },

    #[error("Node '{node_id}' of type '{type_name}' has an invalid data payload: {reason}")]
    InvalidPayload {
        node_id: String,
        type_name: String,
        reason: PayloadError,
    },

    #[error("Edge '{edge_id}' references a missing {endpoint} node '{missing_node_id}'")]
    DanglingEdge {
        edge_id: String,
        endpoint: EdgeEndpoint,
        missing_node_id: String,
    },

    #[error("Edge '{edge_id}' leaves node '{node_id}' through unknown port '{port}'")]
    UnknownPort {
        edge_id: String,
        node_id: String,
        port: String,
    },

    #[error("Edge '{edge_id}' leaves branching node '{node_id}' without naming one of its ports")]
    MissingBranchPort { edge_id: String, node_id: String },
}

/// Every issue found in a rejected graph, in graph order (nodes first, then edges).
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn issues(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Workflow graph rejected with {} issue(s)", self.0.len())?;
        for issue in &self.0 {
            write!(f, "; {}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Why a node's data payload does not match its declared type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayloadError {
    #[error("{0}")]
    Malformed(String),

    #[error("required field '{0}' is blank")]
    BlankField(&'static str),
}

/// Raised when a type tag is parsed into the closed `NodeType` catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown node type '{0}'")]
pub struct ParseNodeTypeError(pub String);

/// Errors that can occur when converting a custom or raw format into a `WorkflowGraph`.
#[derive(Error, Debug, Clone)]
pub enum ConversionError {
    #[error("Failed to parse workflow graph JSON: {0}")]
    JsonParseError(String),

    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}

/// Errors raised at the workflow persistence boundary.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("Workflow '{0}' not found")]
    NotFound(String),

    #[error("Workflow name must not be empty")]
    EmptyName,

    #[error(
        "Stale version for workflow '{id}': stored version is {current}, update carried {proposed}"
    )]
    StaleVersion {
        id: String,
        current: i32,
        proposed: i32,
    },

    #[error("Workflow '{id}' has reached the highest representable version")]
    VersionExhausted { id: String },

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

/// Errors that can occur while fetching or filtering execution logs.
#[derive(Error, Debug, Clone)]
pub enum LogError {
    #[error("Failed to fetch execution logs from '{source_name}': {reason}")]
    FetchFailed { source_name: String, reason: String },

    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
}

impl LogError {
    /// Whether the underlying fetch failed, as opposed to a bad filter.
    pub fn is_fetch_failed(&self) -> bool {
        matches!(self, LogError::FetchFailed { .. })
    }
}
