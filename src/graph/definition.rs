use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The canonical, persisted shape of a workflow (`definitionJson`).
///
/// Node payloads stay free-form here; `GraphValidator` resolves them into
/// typed `NodeData` without rewriting the stored document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowGraph {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

/// Defines a single node as the editor surface stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: Value,
}

/// Defines a connection between two nodes, optionally pinned to named ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    #[serde(default)]
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Pan and zoom state of the editor canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Which end of an edge is being referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeEndpoint {
    Source,
    Target,
}

impl fmt::Display for EdgeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeEndpoint::Source => write!(f, "source"),
            EdgeEndpoint::Target => write!(f, "target"),
        }
    }
}

impl WorkflowGraph {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self {
            nodes,
            edges,
            viewport: None,
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn node(&self, node_id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    /// Edges leaving `node_id`, in graph order.
    pub fn outgoing<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a GraphEdge> {
        self.edges.iter().filter(move |e| e.source == node_id)
    }

    pub fn incoming<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a GraphEdge> {
        self.edges.iter().filter(move |e| e.target == node_id)
    }
}

impl GraphNode {
    pub fn new(id: impl Into<String>, node_type: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            position: Position::default(),
            data,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position { x, y };
        self
    }

    /// The `label` string stored in the payload, if any.
    pub fn label(&self) -> Option<&str> {
        self.data.get("label").and_then(Value::as_str)
    }
}

impl GraphEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("e-{}-{}", source, target),
            source,
            target,
            source_handle: None,
            target_handle: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn from_port(mut self, port: impl Into<String>) -> Self {
        self.source_handle = Some(port.into());
        self
    }

    pub fn to_port(mut self, port: impl Into<String>) -> Self {
        self.target_handle = Some(port.into());
        self
    }

    /// The id used to refer to this edge in messages; falls back to `source->target`.
    pub fn display_id(&self) -> String {
        if self.id.is_empty() {
            format!("{}->{}", self.source, self.target)
        } else {
            self.id.clone()
        }
    }
}
