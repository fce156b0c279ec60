//! Common test utilities for building workflow graphs and execution logs.
use chrono::{DateTime, TimeZone, Utc};
use runeforge::prelude::*;
use serde_json::json;

/// The smallest valid graph: `start -> logMessage`.
#[allow(dead_code)]
pub fn create_simple_graph() -> WorkflowGraph {
    WorkflowGraph::new(
        vec![
            GraphNode::new("a", "start", json!({})),
            GraphNode::new("b", "logMessage", json!({ "message": "hello" })).at(0.0, 120.0),
        ],
        vec![GraphEdge::new("a", "b")],
    )
}

/// A branching graph using every built-in node type.
///
/// `start -> log -> check`, `check --true--> work -> agent -> ask -> job -> end`,
/// `check --false--> end`.
#[allow(dead_code)]
pub fn create_branching_graph() -> WorkflowGraph {
    WorkflowGraph::new(
        vec![
            GraphNode::new("start", "start", json!({ "label": "Begin" })),
            GraphNode::new("log", "logMessage", json!({ "message": "starting", "level": "warn" })),
            GraphNode::new("check", "condition", json!({ "condition": "input.size > 10" })),
            GraphNode::new("work", "task", json!({ "taskName": "Review", "assignee": "ops" })),
            GraphNode::new(
                "agent",
                "agentTask",
                json!({ "agentName": "scribe", "agentProvider": "anthropic", "taskPrompt": "Summarize" }),
            ),
            GraphNode::new("ask", "decision", json!({ "question": "Ship it?", "options": ["yes", "no"] })),
            GraphNode::new("job", "process", json!({ "processName": "deploy", "parameters": { "env": "prod" } })),
            GraphNode::new("end", "stop", json!({})),
        ],
        vec![
            GraphEdge::new("start", "log"),
            GraphEdge::new("log", "check"),
            GraphEdge::new("check", "work").from_port("true"),
            GraphEdge::new("check", "end").from_port("false"),
            GraphEdge::new("work", "agent"),
            GraphEdge::new("agent", "ask"),
            GraphEdge::new("ask", "job"),
            GraphEdge::new("job", "end"),
        ],
    )
    .with_viewport(Viewport::default())
}

/// Fixed point in time, offset by `minutes`.
#[allow(dead_code)]
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap() + chrono::Duration::minutes(minutes)
}

#[allow(dead_code)]
pub fn entry(minutes: i64, node_id: &str, level: LogLevel, message: &str) -> LogEntry {
    LogEntry {
        timestamp: at(minutes),
        node_id: node_id.to_string(),
        node_type: "logMessage".to_string(),
        level,
        message: message.to_string(),
        data: None,
    }
}

#[allow(dead_code)]
pub fn execution_log(
    index: usize,
    workflow_id: &str,
    status: ExecutionStatus,
    start_minutes: i64,
) -> WorkflowExecutionLog {
    WorkflowExecutionLog {
        id: format!("log-{}", index),
        workflow_definition_id: workflow_id.to_string(),
        execution_id: format!("run-{:03}", index),
        start_time: at(start_minutes),
        end_time: status.is_finished().then(|| at(start_minutes + 1)),
        status,
        log_entries: vec![
            entry(start_minutes, "a", LogLevel::Info, "started"),
            entry(start_minutes, "b", LogLevel::Debug, "checking"),
            entry(start_minutes + 1, "b", LogLevel::Error, "boom"),
        ],
    }
}

/// Ten logs over two workflows; indices 1, 4, 7 and 9 failed.
#[allow(dead_code)]
pub fn create_log_collection(first: &str, second: &str) -> Vec<WorkflowExecutionLog> {
    let statuses = [
        ExecutionStatus::Completed,
        ExecutionStatus::Failed,
        ExecutionStatus::Completed,
        ExecutionStatus::Running,
        ExecutionStatus::Failed,
        ExecutionStatus::Completed,
        ExecutionStatus::Completed,
        ExecutionStatus::Failed,
        ExecutionStatus::Running,
        ExecutionStatus::Failed,
    ];
    statuses
        .into_iter()
        .enumerate()
        .map(|(i, status)| {
            let workflow = if i % 2 == 0 { first } else { second };
            execution_log(i, workflow, status, (i as i64) * 10)
        })
        .collect()
}
