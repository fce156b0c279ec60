pub mod definition;
pub mod store;

pub use definition::*;
pub use store::*;
