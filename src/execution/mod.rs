//! Read-only consumption of workflow execution logs.
//!
//! Logs are produced by an execution engine outside this crate. Everything
//! here deserializes, filters, and orders them for display; nothing builds or
//! mutates a run.

pub mod filter;
pub mod log;
pub mod source;

pub use filter::*;
pub use log::*;
pub use source::*;
