use super::NodeType;
use crate::error::PayloadError;
use crate::execution::LogLevel;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A `logMessage` node. A freshly dropped node carries no message yet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogMessageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub level: LogLevel,
}

/// A `condition` node; its expression decides between the `true` and `false` ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub task_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub process_name: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub question: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentTaskData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub agent_name: String,
    pub agent_provider: String,
    pub task_prompt: String,
}

/// A node payload resolved against its type tag.
///
/// Serializes in the same `{ "type": ..., "data": ... }` layout the editor uses
/// for nodes, so a typed payload can be written back next to an id and position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum NodeData {
    Start(StartData),
    Stop(StopData),
    LogMessage(LogMessageData),
    Condition(ConditionData),
    Task(TaskData),
    Process(ProcessData),
    Decision(DecisionData),
    AgentTask(AgentTaskData),
}

impl NodeData {
    /// Parses a raw `data` object into the payload shape of `node_type`.
    ///
    /// A missing (`null`) payload is read as an empty object, so types without
    /// required fields accept it. Required string fields must not be blank.
    pub fn parse(node_type: NodeType, data: &Value) -> Result<Self, PayloadError> {
        let data = match data {
            Value::Null => Value::Object(Map::new()),
            other => other.clone(),
        };

        let parsed = match node_type {
            NodeType::Start => NodeData::Start(from_payload(data)?),
            NodeType::Stop => NodeData::Stop(from_payload(data)?),
            NodeType::LogMessage => NodeData::LogMessage(from_payload(data)?),
            NodeType::Condition => NodeData::Condition(from_payload(data)?),
            NodeType::Task => NodeData::Task(from_payload(data)?),
            NodeType::Process => NodeData::Process(from_payload(data)?),
            NodeType::Decision => NodeData::Decision(from_payload(data)?),
            NodeType::AgentTask => NodeData::AgentTask(from_payload(data)?),
        };

        parsed.check_required()?;
        Ok(parsed)
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            NodeData::Start(_) => NodeType::Start,
            NodeData::Stop(_) => NodeType::Stop,
            NodeData::LogMessage(_) => NodeType::LogMessage,
            NodeData::Condition(_) => NodeType::Condition,
            NodeData::Task(_) => NodeType::Task,
            NodeData::Process(_) => NodeType::Process,
            NodeData::Decision(_) => NodeType::Decision,
            NodeData::AgentTask(_) => NodeType::AgentTask,
        }
    }

    /// The user-facing label, if the editor stored one.
    pub fn label(&self) -> Option<&str> {
        let label = match self {
            NodeData::Start(d) => &d.label,
            NodeData::Stop(d) => &d.label,
            NodeData::LogMessage(d) => &d.label,
            NodeData::Condition(d) => &d.label,
            NodeData::Task(d) => &d.label,
            NodeData::Process(d) => &d.label,
            NodeData::Decision(d) => &d.label,
            NodeData::AgentTask(d) => &d.label,
        };
        label.as_deref()
    }

    fn check_required(&self) -> Result<(), PayloadError> {
        match self {
            NodeData::Start(_) | NodeData::Stop(_) | NodeData::LogMessage(_) => Ok(()),
            NodeData::Condition(d) => require("condition", &d.condition),
            NodeData::Task(d) => require("taskName", &d.task_name),
            NodeData::Process(d) => require("processName", &d.process_name),
            NodeData::Decision(d) => require("question", &d.question),
            NodeData::AgentTask(d) => {
                require("agentName", &d.agent_name)?;
                require("agentProvider", &d.agent_provider)?;
                require("taskPrompt", &d.task_prompt)
            }
        }
    }
}

fn from_payload<T: DeserializeOwned>(data: Value) -> Result<T, PayloadError> {
    serde_json::from_value(data).map_err(|e| PayloadError::Malformed(e.to_string()))
}

fn require(field: &'static str, value: &str) -> Result<(), PayloadError> {
    if value.trim().is_empty() {
        Err(PayloadError::BlankField(field))
    } else {
        Ok(())
    }
}
