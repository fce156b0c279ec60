use super::{NodeType, PortSet};
use ahash::AHashMap;
use itertools::Itertools;
use serde::Serialize;
use serde_json::{Value, json};
use std::borrow::Cow;

const TRACING_TARGET: &str = "runeforge::registry";

/// Display and contract metadata for a node type tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTypeMetadata {
    pub tag: Cow<'static, str>,
    pub label: Cow<'static, str>,
    pub icon: Cow<'static, str>,
    pub default_data: Value,
    pub outputs: PortSet,
    /// The built-in type behind this entry, `None` for custom and generic entries.
    #[serde(skip)]
    pub node_type: Option<NodeType>,
}

impl NodeTypeMetadata {
    /// The rendering used for any tag the registry does not know.
    pub fn generic() -> Self {
        Self {
            tag: Cow::Borrowed("default"),
            label: Cow::Borrowed("Unknown"),
            icon: Cow::Borrowed("circle"),
            default_data: json!({}),
            outputs: PortSet::single_output(),
            node_type: None,
        }
    }

    /// Metadata for a custom node type with a single output port.
    pub fn custom(tag: impl Into<String>, label: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            tag: Cow::Owned(tag.into()),
            label: Cow::Owned(label.into()),
            icon: Cow::Owned(icon.into()),
            default_data: json!({}),
            outputs: PortSet::single_output(),
            node_type: None,
        }
    }

    pub fn with_outputs(mut self, outputs: PortSet) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_default_data(mut self, default_data: Value) -> Self {
        self.default_data = default_data;
        self
    }

    pub fn is_generic(&self) -> bool {
        self.node_type.is_none() && self.tag == "default"
    }
}

/// Defines the metadata table of every built-in node type.
///
/// The generated `match` is exhaustive, so adding a `NodeType` variant without
/// registering its metadata here fails to compile.
macro_rules! define_builtin_types {
    ( $( ($variant:ident, $label:expr, $icon:expr, $outputs:expr, $defaults:expr) ),* $(,)? ) => {
        fn builtin_metadata(node_type: NodeType) -> NodeTypeMetadata {
            match node_type {
                $(
                    NodeType::$variant => NodeTypeMetadata {
                        tag: Cow::Borrowed(NodeType::$variant.as_str()),
                        label: Cow::Borrowed($label),
                        icon: Cow::Borrowed($icon),
                        default_data: $defaults,
                        outputs: $outputs,
                        node_type: Some(NodeType::$variant),
                    },
                )*
            }
        }
    };
}

define_builtin_types! {
    (Start, "Start", "play", PortSet::single_output(), json!({ "label": "Start" })),
    (Stop, "Stop", "square", PortSet::single_output(), json!({ "label": "Stop" })),
    (LogMessage, "Log Message", "message-square", PortSet::single_output(),
        json!({ "message": "", "level": "info" })),
    (Condition, "Condition", "git-branch", PortSet::branch_outputs(), json!({ "condition": "" })),
    (Task, "Task", "check-square", PortSet::single_output(), json!({ "taskName": "" })),
    (Process, "Process", "cog", PortSet::single_output(),
        json!({ "processName": "", "parameters": {} })),
    (Decision, "Decision", "help-circle", PortSet::single_output(),
        json!({ "question": "", "options": [] })),
    (AgentTask, "Agent Task", "bot", PortSet::single_output(),
        json!({ "agentName": "", "agentProvider": "", "taskPrompt": "" })),
}

/// Maps node type tags to their metadata.
///
/// Starts out with every built-in type. Custom types and aliases can be added,
/// but built-in tags are never shadowed, since their port contract is fixed.
#[derive(Debug, Clone)]
pub struct NodeTypeRegistry {
    entries: AHashMap<String, NodeTypeMetadata>,
    aliases: AHashMap<String, String>,
    generic: NodeTypeMetadata,
}

impl Default for NodeTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTypeRegistry {
    pub fn new() -> Self {
        let entries = NodeType::ALL
            .into_iter()
            .map(|t| (t.as_str().to_string(), builtin_metadata(t)))
            .collect();
        Self {
            entries,
            aliases: AHashMap::new(),
            generic: NodeTypeMetadata::generic(),
        }
    }

    /// Lets a foreign tag resolve like an already registered one.
    pub fn with_type_alias(mut self, alias: &str, target: &str) -> Self {
        self.add_alias(alias, target);
        self
    }

    pub fn with_custom_type(mut self, metadata: NodeTypeMetadata) -> Self {
        self.add_custom_type(metadata);
        self
    }

    /// Returns `false` and leaves the registry untouched when the alias would
    /// shadow a registered tag or points at an unregistered one.
    pub fn add_alias(&mut self, alias: &str, target: &str) -> bool {
        if self.entries.contains_key(alias) {
            tracing::warn!(target: TRACING_TARGET, alias, "Alias shadows a registered type, ignoring");
            return false;
        }
        let canonical = self.canonical_tag(target).to_string();
        if !self.entries.contains_key(&canonical) {
            tracing::warn!(target: TRACING_TARGET, alias, aliased = %canonical, "Alias target is not registered, ignoring");
            return false;
        }
        self.aliases.insert(alias.to_string(), canonical);
        true
    }

    pub fn add_custom_type(&mut self, metadata: NodeTypeMetadata) -> bool {
        let tag = metadata.tag.to_string();
        if tag.parse::<NodeType>().is_ok() || self.aliases.contains_key(&tag) {
            tracing::warn!(target: TRACING_TARGET, tag = %tag, "Custom type would shadow an existing tag, ignoring");
            return false;
        }
        tracing::debug!(target: TRACING_TARGET, tag = %tag, ports = metadata.outputs.len(), "Registered custom node type");
        self.entries.insert(tag, metadata);
        true
    }

    /// Resolves a tag to its metadata, falling back to the generic default for unknown tags.
    pub fn resolve(&self, tag: &str) -> &NodeTypeMetadata {
        self.lookup(tag).unwrap_or(&self.generic)
    }

    /// Resolves a tag without the generic fallback.
    pub fn lookup(&self, tag: &str) -> Option<&NodeTypeMetadata> {
        self.entries.get(self.canonical_tag(tag))
    }

    /// The built-in type a tag (or alias) stands for.
    pub fn builtin_type(&self, tag: &str) -> Option<NodeType> {
        self.lookup(tag).and_then(|m| m.node_type)
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.lookup(tag).is_some()
    }

    /// Registered tags, built-ins first in catalog order, then custom tags alphabetically.
    pub fn tags(&self) -> Vec<&str> {
        let custom = self
            .entries
            .iter()
            .filter(|(_, m)| m.node_type.is_none())
            .map(|(tag, _)| tag.as_str())
            .sorted();
        NodeType::ALL.iter().map(|t| t.as_str()).chain(custom).collect()
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(alias, target)| (alias.as_str(), target.as_str()))
            .sorted()
    }

    fn canonical_tag<'a>(&'a self, tag: &'a str) -> &'a str {
        self.aliases.get(tag).map(String::as_str).unwrap_or(tag)
    }
}
