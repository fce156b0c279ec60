use super::PortSet;
use crate::error::ParseNodeTypeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed catalog of node kinds the editor knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeType {
    Start,
    Stop,
    LogMessage,
    Condition,
    Task,
    Process,
    Decision,
    AgentTask,
}

impl NodeType {
    pub const ALL: [NodeType; 8] = [
        NodeType::Start,
        NodeType::Stop,
        NodeType::LogMessage,
        NodeType::Condition,
        NodeType::Task,
        NodeType::Process,
        NodeType::Decision,
        NodeType::AgentTask,
    ];

    /// The wire tag used in `definitionJson`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            NodeType::Start => "start",
            NodeType::Stop => "stop",
            NodeType::LogMessage => "logMessage",
            NodeType::Condition => "condition",
            NodeType::Task => "task",
            NodeType::Process => "process",
            NodeType::Decision => "decision",
            NodeType::AgentTask => "agentTask",
        }
    }

    /// Output ports are part of the type contract: `condition` branches, everything else has one.
    pub fn output_ports(&self) -> PortSet {
        match self {
            NodeType::Condition => PortSet::branch_outputs(),
            NodeType::Start
            | NodeType::Stop
            | NodeType::LogMessage
            | NodeType::Task
            | NodeType::Process
            | NodeType::Decision
            | NodeType::AgentTask => PortSet::single_output(),
        }
    }

    pub fn is_branching(&self) -> bool {
        self.output_ports().len() > 1
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = ParseNodeTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseNodeTypeError(s.to_string()))
    }
}
