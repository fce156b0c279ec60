use super::{NewWorkflow, WorkflowDefinition, WorkflowUpdate};
use crate::error::StoreError;
use crate::graph::GraphValidator;
use ahash::AHashMap;
use chrono::Utc;
use itertools::Itertools;

const TRACING_TARGET: &str = "runeforge::store";

/// Persistence boundary for workflow definitions.
///
/// Writes carrying a graph are validated first and rejected as a whole on
/// failure; a rejected write leaves the stored record untouched.
pub trait WorkflowStore {
    fn create(&mut self, new: NewWorkflow) -> Result<WorkflowDefinition, StoreError>;

    fn get(&self, id: &str) -> Result<WorkflowDefinition, StoreError>;

    fn update(&mut self, id: &str, update: WorkflowUpdate)
    -> Result<WorkflowDefinition, StoreError>;

    fn delete(&mut self, id: &str) -> Result<WorkflowDefinition, StoreError>;

    /// All workflows, most recently updated first.
    fn list(&self) -> Vec<WorkflowDefinition>;
}

/// In-process store; concurrent edits resolve as last write wins.
#[derive(Default)]
pub struct MemoryWorkflowStore {
    validator: GraphValidator,
    workflows: AHashMap<String, WorkflowDefinition>,
}

impl MemoryWorkflowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validator(validator: GraphValidator) -> Self {
        Self {
            validator,
            workflows: AHashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }
}

impl WorkflowStore for MemoryWorkflowStore {
    fn create(&mut self, new: NewWorkflow) -> Result<WorkflowDefinition, StoreError> {
        self.validator.validate(&new.definition_json)?;
        let workflow = WorkflowDefinition::create(new, Utc::now())?;

        tracing::info!(
            target: TRACING_TARGET,
            workflow_id = %workflow.id,
            name = %workflow.name,
            nodes = workflow.definition_json.nodes.len(),
            "Workflow created"
        );
        self.workflows.insert(workflow.id.clone(), workflow.clone());
        Ok(workflow)
    }

    fn get(&self, id: &str) -> Result<WorkflowDefinition, StoreError> {
        self.workflows
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn update(
        &mut self,
        id: &str,
        update: WorkflowUpdate,
    ) -> Result<WorkflowDefinition, StoreError> {
        let current = self
            .workflows
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if let Some(graph) = &update.definition_json {
            if let Err(errors) = self.validator.validate(graph) {
                tracing::warn!(
                    target: TRACING_TARGET,
                    workflow_id = %id,
                    issues = errors.len(),
                    "Rejected workflow update with invalid graph"
                );
                return Err(errors.into());
            }
        }
        let updated = current.updated(update, Utc::now())?;

        tracing::info!(
            target: TRACING_TARGET,
            workflow_id = %id,
            version = updated.version,
            "Workflow updated"
        );
        self.workflows.insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    fn delete(&mut self, id: &str) -> Result<WorkflowDefinition, StoreError> {
        let removed = self
            .workflows
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        tracing::info!(target: TRACING_TARGET, workflow_id = %id, "Workflow deleted");
        Ok(removed)
    }

    fn list(&self) -> Vec<WorkflowDefinition> {
        self.workflows
            .values()
            .sorted_by(|a, b| {
                b.updated_at
                    .cmp(&a.updated_at)
                    .then_with(|| a.name.cmp(&b.name))
                    .then_with(|| a.id.cmp(&b.id))
            })
            .cloned()
            .collect()
    }
}
