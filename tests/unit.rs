//! Unit tests for payload types, flat records and error messages.
mod common;
use common::*;
use runeforge::prelude::*;
use serde_json::json;

#[test]
fn test_node_data_resolves_each_type_by_tag() {
    let payloads = [
        (NodeType::Start, json!({})),
        (NodeType::Stop, json!({ "label": "Done" })),
        (NodeType::LogMessage, json!({ "message": "m", "level": "error" })),
        (NodeType::Condition, json!({ "condition": "a == b" })),
        (NodeType::Task, json!({ "taskName": "t" })),
        (NodeType::Process, json!({ "processName": "p" })),
        (NodeType::Decision, json!({ "question": "q?" })),
        (
            NodeType::AgentTask,
            json!({ "agentName": "n", "agentProvider": "p", "taskPrompt": "do it" }),
        ),
    ];
    for (node_type, data) in payloads {
        let parsed = NodeData::parse(node_type, &data).expect("Payload should parse");
        assert_eq!(parsed.node_type(), node_type);
    }
}

#[test]
fn test_node_data_keeps_optional_fields() {
    let parsed = NodeData::parse(
        NodeType::Decision,
        &json!({ "label": "Gate", "question": "Go?", "options": ["yes", "no"], "color": "red" }),
    )
    .unwrap();
    assert_eq!(parsed.label(), Some("Gate"));
    match parsed {
        NodeData::Decision(d) => assert_eq!(d.options, vec!["yes", "no"]),
        other => panic!("Expected decision payload, got {:?}", other),
    }
}

#[test]
fn test_node_data_serializes_in_editor_layout() {
    let parsed = NodeData::parse(NodeType::Condition, &json!({ "condition": "x > 1" })).unwrap();
    assert_eq!(
        serde_json::to_value(&parsed).unwrap(),
        json!({ "type": "condition", "data": { "condition": "x > 1" } })
    );
}

#[test]
fn test_non_object_payload_is_rejected() {
    assert!(matches!(
        NodeData::parse(NodeType::Task, &json!("taskName")),
        Err(PayloadError::Malformed(_))
    ));
}

#[test]
fn test_error_display() {
    let err = ValidationError::DanglingEdge {
        edge_id: "e9".to_string(),
        endpoint: EdgeEndpoint::Target,
        missing_node_id: "z".to_string(),
    };
    assert_eq!(err.to_string(), "Edge 'e9' references a missing target node 'z'");

    let payload = ValidationError::InvalidPayload {
        node_id: "n".to_string(),
        type_name: "condition".to_string(),
        reason: PayloadError::BlankField("condition"),
    };
    assert!(payload.to_string().contains("required field 'condition' is blank"));

    let all = ValidationErrors(vec![err.clone(), payload]);
    let message = all.to_string();
    assert!(message.starts_with("Workflow graph rejected with 2 issue(s)"));
    assert!(message.contains("'e9'"));

    let store: StoreError = all.into();
    assert!(store.to_string().contains("2 issue(s)"));

    let fetch = LogError::FetchFailed {
        source_name: "logs.json".to_string(),
        reason: "boom".to_string(),
    };
    assert_eq!(
        fetch.to_string(),
        "Failed to fetch execution logs from 'logs.json': boom"
    );
}

#[test]
fn test_task_record_wire_format() {
    let task: Task = serde_json::from_value(json!({
        "id": "0b8c1c7e-5d8a-4a63-9a4e-1d1a2b3c4d5e",
        "title": "Write report",
        "status": "inProgress",
        "priority": "high",
        "dueDate": "2026-10-01T12:30:00Z",
        "createdAt": "2026-09-30T08:00:00Z",
        "updatedAt": "2026-09-30T09:00:00Z"
    }))
    .unwrap();

    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.priority, TaskPriority::High);
    assert!(task.is_overdue(at(60)));
    assert!(!task.is_overdue(at(0)));

    let done = Task {
        status: TaskStatus::Done,
        ..task.clone()
    };
    assert!(!done.is_overdue(at(60)));

    let value = serde_json::to_value(&task).unwrap();
    assert_eq!(value["status"], "inProgress");
    assert!(value.get("description").is_none());
}

#[test]
fn test_task_defaults() {
    let task: Task = serde_json::from_value(json!({
        "id": "task-1",
        "title": "t",
        "createdAt": "2026-09-30T08:00:00Z",
        "updatedAt": "2026-09-30T08:00:00Z"
    }))
    .unwrap();
    assert_eq!(task.status, TaskStatus::Todo);
    assert_eq!(task.priority, TaskPriority::Medium);
    assert!(!task.is_overdue(at(0)));
}

#[test]
fn test_process_log_record() {
    let log: ProcessLog = serde_json::from_value(json!({
        "id": "clx9plog000001",
        "processName": "import-inbox",
        "level": "warn",
        "message": "retrying",
        "details": { "attempt": 2 },
        "timestamp": "2026-10-01T12:00:00Z"
    }))
    .unwrap();
    assert_eq!(log.level, LogLevel::Warn);
    assert_eq!(log.timestamp, at(0));
    assert_eq!(log.details.unwrap()["attempt"], 2);
}

#[test]
fn test_log_level_ordering() {
    assert!(LogLevel::Debug < LogLevel::Info);
    assert!(LogLevel::Warn < LogLevel::Error);
    assert_eq!(LogLevel::default(), LogLevel::Info);
    assert_eq!(format!("[{:<5}]", LogLevel::Warn), "[WARN ]");
}
