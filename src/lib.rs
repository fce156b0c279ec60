//! # Runeforge - Workflow Definition Model
//!
//! **Runeforge** holds the data contract shared by a visual workflow editor and
//! the layer that persists its workflows. A workflow is a graph of typed nodes
//! and edges, stored as a JSON document (`definitionJson`) next to its metadata.
//!
//! ## Core Pieces
//!
//! 1.  **Graph Representation** (`graph`): the canonical `WorkflowGraph` shape and
//!     the `GraphValidator`, which rejects dangling edges, malformed payloads and
//!     unknown ports before anything is written.
//! 2.  **Node Type Registry** (`node`): the closed `NodeType` catalog, one payload
//!     shape per type (`NodeData`), and display metadata with port contracts.
//!     Unknown tags resolve to a generic default instead of failing.
//! 3.  **Execution Logs** (`execution`): the read-only record of a workflow run
//!     produced by an external engine, with filtering and display ordering.
//!
//! Execution itself is not part of this crate.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use runeforge::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let graph = r#"{
//!         "nodes": [
//!             { "id": "a", "type": "start", "position": { "x": 0, "y": 0 }, "data": {} },
//!             { "id": "b", "type": "logMessage", "position": { "x": 0, "y": 120 },
//!               "data": { "message": "hello" } }
//!         ],
//!         "edges": [ { "id": "e1", "source": "a", "target": "b" } ]
//!     }"#
//!     .into_graph()?;
//!
//!     // Validate before storing; the result carries typed payloads.
//!     let validated = GraphValidator::default().validate(&graph)?;
//!     println!("{} nodes validated", validated.nodes().len());
//!
//!     // Render it with the registry's metadata.
//!     let registry = NodeTypeRegistry::new();
//!     println!("{}", GraphFormatter::new(&registry).format_graph(&graph));
//!
//!     // Persist through the write boundary.
//!     let mut store = MemoryWorkflowStore::new();
//!     let workflow = store.create(NewWorkflow::new("Greeter", graph)?)?;
//!     println!("Stored '{}' at version {}", workflow.name, workflow.version);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod execution;
pub mod graph;
pub mod node;
pub mod prelude;
pub mod records;
pub mod render;
pub mod workflow;
