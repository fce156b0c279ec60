use crate::error::{ConversionError, StoreError};
use crate::graph::{IntoGraph, WorkflowGraph};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored workflow: metadata plus its graph document.
///
/// Ids are opaque strings; records written by other services may carry any
/// id scheme. Workflows created here get a UUID v4.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub definition_json: WorkflowGraph,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// Payload for creating a workflow.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkflow {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub definition_json: WorkflowGraph,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl NewWorkflow {
    pub fn new(name: impl Into<String>, graph: impl IntoGraph) -> Result<Self, ConversionError> {
        Ok(Self {
            name: name.into(),
            description: None,
            definition_json: graph.into_graph()?,
            created_by: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.created_by = Some(owner.into());
        self
    }
}

/// Partial update of a workflow. Unset fields keep their stored value.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub definition_json: Option<WorkflowGraph>,
    #[serde(default)]
    pub version: Option<i32>,
}

impl WorkflowUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_graph(mut self, graph: WorkflowGraph) -> Self {
        self.definition_json = Some(graph);
        self
    }

    pub fn with_version(mut self, version: i32) -> Self {
        self.version = Some(version);
        self
    }
}

pub const INITIAL_VERSION: i32 = 1;

impl WorkflowDefinition {
    pub(crate) fn create(new: NewWorkflow, now: DateTime<Utc>) -> Result<Self, StoreError> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: checked_name(new.name)?,
            description: new.description,
            definition_json: new.definition_json,
            version: INITIAL_VERSION,
            created_at: now,
            updated_at: now,
            created_by: new.created_by,
        })
    }

    /// The version an update should land on.
    ///
    /// Omitted versions bump the stored one; explicit versions must move it forward.
    pub fn next_version(&self, requested: Option<i32>) -> Result<i32, StoreError> {
        match requested {
            None => self
                .version
                .checked_add(1)
                .ok_or_else(|| StoreError::VersionExhausted {
                    id: self.id.clone(),
                }),
            Some(proposed) if proposed > self.version => Ok(proposed),
            Some(proposed) => Err(StoreError::StaleVersion {
                id: self.id.clone(),
                current: self.version,
                proposed,
            }),
        }
    }

    /// Builds the updated record without touching `self`.
    pub(crate) fn updated(
        &self,
        update: WorkflowUpdate,
        now: DateTime<Utc>,
    ) -> Result<Self, StoreError> {
        let version = self.next_version(update.version)?;
        let name = match update.name {
            Some(name) => checked_name(name)?,
            None => self.name.clone(),
        };
        Ok(Self {
            id: self.id.clone(),
            name,
            description: update.description.or_else(|| self.description.clone()),
            definition_json: update
                .definition_json
                .unwrap_or_else(|| self.definition_json.clone()),
            version,
            created_at: self.created_at,
            updated_at: now.max(self.updated_at),
            created_by: self.created_by.clone(),
        })
    }
}

fn checked_name(name: String) -> Result<String, StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(StoreError::EmptyName)
    } else {
        Ok(trimmed.to_string())
    }
}
