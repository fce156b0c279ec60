pub mod graph;
pub mod log;

pub use graph::*;
pub use log::*;
