use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A named connection point on a node where edges attach.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Port {
    pub id: Cow<'static, str>,
    pub label: Cow<'static, str>,
}

impl Port {
    pub const fn fixed(id: &'static str, label: &'static str) -> Self {
        Self {
            id: Cow::Borrowed(id),
            label: Cow::Borrowed(label),
        }
    }

    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: Cow::Owned(id.into()),
            label: Cow::Owned(label.into()),
        }
    }
}

pub const DEFAULT_OUTPUT: Port = Port::fixed("output", "Out");
pub const TRUE_BRANCH: Port = Port::fixed("true", "True");
pub const FALSE_BRANCH: Port = Port::fixed("false", "False");

/// The ordered output ports of a node type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortSet(Vec<Port>);

impl PortSet {
    pub fn new(ports: Vec<Port>) -> Self {
        Self(ports)
    }

    pub fn single_output() -> Self {
        Self(vec![DEFAULT_OUTPUT])
    }

    pub fn branch_outputs() -> Self {
        Self(vec![TRUE_BRANCH, FALSE_BRANCH])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, port_id: &str) -> bool {
        self.0.iter().any(|p| p.id == port_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Port> {
        self.0.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.0.iter().map(|p| p.id.as_ref()).collect()
    }
}
