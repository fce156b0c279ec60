//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the runeforge crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use runeforge::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let source = JsonLogSource::from_path("path/to/logs.json");
//! let filter = LogFilter::new().with_status(ExecutionStatus::Failed);
//! for log in source.fetch_filtered(&filter)? {
//!     println!("{}", LogFormatter::format_header(&log));
//! }
//! # Ok(())
//! # }
//! ```

// Graph representation and validation
pub use crate::graph::{
    EdgeEndpoint, GraphEdge, GraphNode, GraphValidator, IntoGraph, NodeKind, Position, TypedNode,
    ValidatedGraph, Viewport, WorkflowGraph,
};

// Node catalog
pub use crate::node::{NodeData, NodeType, NodeTypeMetadata, NodeTypeRegistry, Port, PortSet};

// Execution logs
pub use crate::execution::{
    EntryFilter, ExecutionStatus, JsonLogSource, LogEntry, LogFilter, LogLevel, LogSort,
    LogSource, WorkflowExecutionLog,
};

// Workflow records and storage
pub use crate::records::{ProcessLog, Task, TaskPriority, TaskStatus};
pub use crate::workflow::{
    MemoryWorkflowStore, NewWorkflow, WorkflowDefinition, WorkflowStore, WorkflowUpdate,
};

// Rendering
pub use crate::render::{GraphFormatter, LogFormatter};

// Error types
pub use crate::error::{
    ConversionError, LogError, PayloadError, StoreError, ValidationError, ValidationErrors,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
