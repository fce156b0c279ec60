use super::WorkflowGraph;
use crate::error::ConversionError;

/// A trait for formats that can be converted into a `WorkflowGraph`.
///
/// Implemented for raw JSON text and `serde_json::Value` documents coming from
/// the editor. Implement it for your own structs to feed a foreign graph format
/// into validation and storage.
///
/// # Example
///
/// ```rust,no_run
/// use runeforge::prelude::*;
/// use runeforge::error::ConversionError;
///
/// struct Step { name: String, kind: String }
/// struct Pipeline { steps: Vec<Step> }
///
/// impl IntoGraph for Pipeline {
///     fn into_graph(self) -> std::result::Result<WorkflowGraph, ConversionError> {
///         let nodes: Vec<GraphNode> = self
///             .steps
///             .iter()
///             .map(|s| GraphNode::new(&s.name, &s.kind, serde_json::json!({})))
///             .collect();
///         let edges = self
///             .steps
///             .windows(2)
///             .map(|w| GraphEdge::new(&w[0].name, &w[1].name))
///             .collect();
///         Ok(WorkflowGraph::new(nodes, edges))
///     }
/// }
/// ```
pub trait IntoGraph {
    /// Consumes the object and converts it into a workflow graph.
    fn into_graph(self) -> Result<WorkflowGraph, ConversionError>;
}

impl IntoGraph for WorkflowGraph {
    fn into_graph(self) -> Result<WorkflowGraph, ConversionError> {
        Ok(self)
    }
}

impl IntoGraph for &str {
    fn into_graph(self) -> Result<WorkflowGraph, ConversionError> {
        serde_json::from_str(self).map_err(|e| ConversionError::JsonParseError(e.to_string()))
    }
}

impl IntoGraph for serde_json::Value {
    /// Accepts either a bare graph or a whole workflow record carrying `definitionJson`.
    fn into_graph(self) -> Result<WorkflowGraph, ConversionError> {
        let graph = match self {
            serde_json::Value::Object(mut map) if map.contains_key("definitionJson") => map
                .remove("definitionJson")
                .unwrap_or(serde_json::Value::Null),
            other => other,
        };
        if !graph.is_object() {
            return Err(ConversionError::ValidationError(
                "workflow graph must be a JSON object".to_string(),
            ));
        }
        serde_json::from_value(graph).map_err(|e| ConversionError::JsonParseError(e.to_string()))
    }
}
