pub mod data;
pub mod kind;
pub mod ports;
pub mod registry;

pub use data::*;
pub use kind::*;
pub use ports::*;
pub use registry::*;
