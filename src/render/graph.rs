use crate::graph::{GraphEdge, GraphNode, WorkflowGraph};
use crate::node::NodeTypeRegistry;

/// Formats workflow graphs into human-readable outlines.
///
/// Works on unvalidated graphs: unknown types and dangling edges are rendered
/// as they are rather than failing the whole view.
pub struct GraphFormatter<'a> {
    registry: &'a NodeTypeRegistry,
}

impl<'a> GraphFormatter<'a> {
    pub fn new(registry: &'a NodeTypeRegistry) -> Self {
        Self { registry }
    }

    /// One line per node, each followed by its outgoing edges.
    pub fn format_graph(&self, graph: &WorkflowGraph) -> String {
        let mut lines = Vec::with_capacity(graph.nodes.len() + graph.edges.len());
        for node in &graph.nodes {
            lines.push(self.format_node(node));
            lines.extend(
                graph
                    .outgoing(&node.id)
                    .map(|edge| format!("    {}", self.format_edge(graph, edge))),
            );
        }
        lines.join("\n")
    }

    /// Formats a node as `[icon] title (id)`.
    pub fn format_node(&self, node: &GraphNode) -> String {
        let metadata = self.registry.resolve(&node.node_type);
        let title = if metadata.is_generic() {
            format!("{} '{}'", metadata.label, node.node_type)
        } else {
            match node.label() {
                Some(label) if label != metadata.label => format!("{}: {}", metadata.label, label),
                _ => metadata.label.to_string(),
            }
        };
        format!("[{}] {} ({})", metadata.icon, title, node.id)
    }

    fn format_edge(&self, graph: &WorkflowGraph, edge: &GraphEdge) -> String {
        let arrow = match &edge.source_handle {
            Some(port) => format!("--{}-->", port),
            None => "-->".to_string(),
        };
        let target = match graph.node(&edge.target) {
            Some(_) => edge.target.clone(),
            None => format!("{} (missing)", edge.target),
        };
        format!("{} {}", arrow, target)
    }
}
