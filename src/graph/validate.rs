use super::{EdgeEndpoint, GraphEdge, GraphNode, Position, WorkflowGraph};
use crate::error::{ValidationError, ValidationErrors};
use crate::node::{NodeData, NodeTypeMetadata, NodeTypeRegistry, PortSet};
use ahash::{AHashMap, AHashSet};
use serde_json::Value;

const TRACING_TARGET: &str = "runeforge::graph";

/// A node whose payload has been resolved against its type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedNode {
    pub id: String,
    pub position: Position,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A built-in type with its parsed payload.
    Builtin(NodeData),
    /// A custom or (when allowed) unknown tag; the payload is kept as-is.
    Opaque { tag: String, data: Value },
}

impl NodeKind {
    pub fn tag(&self) -> &str {
        match self {
            NodeKind::Builtin(data) => data.node_type().as_str(),
            NodeKind::Opaque { tag, .. } => tag,
        }
    }
}

/// A graph that passed validation, together with its typed nodes.
///
/// The original document is kept untouched; validation never rewrites it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedGraph {
    graph: WorkflowGraph,
    nodes: Vec<TypedNode>,
}

impl ValidatedGraph {
    pub fn graph(&self) -> &WorkflowGraph {
        &self.graph
    }

    pub fn into_graph(self) -> WorkflowGraph {
        self.graph
    }

    pub fn nodes(&self) -> &[TypedNode] {
        &self.nodes
    }

    pub fn node(&self, node_id: &str) -> Option<&TypedNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.graph.edges
    }
}

/// Structural validator applied at the write boundary.
pub struct GraphValidator {
    registry: NodeTypeRegistry,
    allow_unknown_types: bool,
}

pub struct GraphValidatorBuilder {
    registry: NodeTypeRegistry,
    allow_unknown_types: bool,
}

impl GraphValidatorBuilder {
    pub fn new() -> Self {
        Self {
            registry: NodeTypeRegistry::new(),
            allow_unknown_types: false,
        }
    }

    pub fn with_registry(mut self, registry: NodeTypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_type_alias(mut self, user_type_name: &str, builtin_type_name: &str) -> Self {
        self.registry.add_alias(user_type_name, builtin_type_name);
        self
    }

    pub fn with_custom_type(mut self, metadata: NodeTypeMetadata) -> Self {
        self.registry.add_custom_type(metadata);
        self
    }

    /// Admit unregistered tags as opaque nodes with the generic port set.
    pub fn allow_unknown_types(mut self, allow: bool) -> Self {
        self.allow_unknown_types = allow;
        self
    }

    pub fn build(self) -> GraphValidator {
        GraphValidator {
            registry: self.registry,
            allow_unknown_types: self.allow_unknown_types,
        }
    }
}

impl Default for GraphValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for GraphValidator {
    fn default() -> Self {
        GraphValidatorBuilder::new().build()
    }
}

impl GraphValidator {
    pub fn builder() -> GraphValidatorBuilder {
        GraphValidatorBuilder::new()
    }

    pub fn registry(&self) -> &NodeTypeRegistry {
        &self.registry
    }

    /// Checks node identity, payload shapes, edge endpoints, and edge ports.
    ///
    /// Returns every issue found, nodes first and then edges, each in graph
    /// order, so the same graph always produces the same result.
    pub fn validate(&self, graph: &WorkflowGraph) -> Result<ValidatedGraph, ValidationErrors> {
        let mut issues = Vec::new();
        let mut ports: AHashMap<&str, &PortSet> = AHashMap::with_capacity(graph.nodes.len());
        let mut typed_nodes = Vec::with_capacity(graph.nodes.len());

        for (index, node) in graph.nodes.iter().enumerate() {
            if node.id.trim().is_empty() {
                issues.push(ValidationError::EmptyNodeId { index });
                continue;
            }
            if ports.contains_key(node.id.as_str()) {
                issues.push(ValidationError::DuplicateNodeId {
                    node_id: node.id.clone(),
                });
                continue;
            }
            // Registered even when the payload is bad, so its edges are not reported as dangling.
            ports.insert(&node.id, &self.registry.resolve(&node.node_type).outputs);

            match self.resolve_kind(node) {
                Ok(kind) => typed_nodes.push(TypedNode {
                    id: node.id.clone(),
                    position: node.position,
                    kind,
                }),
                Err(issue) => issues.push(issue),
            }
        }

        let mut edge_ids: AHashSet<&str> = AHashSet::with_capacity(graph.edges.len());
        for edge in &graph.edges {
            if !edge.id.is_empty() && !edge_ids.insert(&edge.id) {
                issues.push(ValidationError::DuplicateEdgeId {
                    edge_id: edge.id.clone(),
                });
            }
            match ports.get(edge.source.as_str()) {
                None => issues.push(ValidationError::DanglingEdge {
                    edge_id: edge.display_id(),
                    endpoint: EdgeEndpoint::Source,
                    missing_node_id: edge.source.clone(),
                }),
                Some(source_ports) => {
                    if let Some(issue) = check_source_port(edge, source_ports) {
                        issues.push(issue);
                    }
                }
            }
            if !ports.contains_key(edge.target.as_str()) {
                issues.push(ValidationError::DanglingEdge {
                    edge_id: edge.display_id(),
                    endpoint: EdgeEndpoint::Target,
                    missing_node_id: edge.target.clone(),
                });
            }
        }

        if issues.is_empty() {
            tracing::debug!(
                target: TRACING_TARGET,
                nodes = graph.nodes.len(),
                edges = graph.edges.len(),
                "Workflow graph validated"
            );
            Ok(ValidatedGraph {
                graph: graph.clone(),
                nodes: typed_nodes,
            })
        } else {
            tracing::debug!(
                target: TRACING_TARGET,
                issues = issues.len(),
                "Workflow graph rejected"
            );
            Err(ValidationErrors(issues))
        }
    }

    fn resolve_kind(&self, node: &GraphNode) -> Result<NodeKind, ValidationError> {
        match self.registry.builtin_type(&node.node_type) {
            Some(node_type) => NodeData::parse(node_type, &node.data)
                .map(NodeKind::Builtin)
                .map_err(|reason| ValidationError::InvalidPayload {
                    node_id: node.id.clone(),
                    type_name: node.node_type.clone(),
                    reason,
                }),
            None if self.allow_unknown_types || self.registry.is_registered(&node.node_type) => {
                Ok(NodeKind::Opaque {
                    tag: node.node_type.clone(),
                    data: node.data.clone(),
                })
            }
            None => Err(ValidationError::UnknownNodeType {
                node_id: node.id.clone(),
                type_name: node.node_type.clone(),
            }),
        }
    }
}

fn check_source_port(edge: &GraphEdge, ports: &PortSet) -> Option<ValidationError> {
    match edge.source_handle.as_deref() {
        Some(handle) if !ports.contains(handle) => Some(ValidationError::UnknownPort {
            edge_id: edge.display_id(),
            node_id: edge.source.clone(),
            port: handle.to_string(),
        }),
        None if ports.len() > 1 => Some(ValidationError::MissingBranchPort {
            edge_id: edge.display_id(),
            node_id: edge.source.clone(),
        }),
        _ => None,
    }
}
