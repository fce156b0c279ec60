//! Tests for execution log consumption: parsing, filtering, ordering and fetching.
mod common;
use common::*;
use runeforge::prelude::*;
use std::io::Write;
use uuid::Uuid;

#[test]
fn test_filter_by_failed_status_keeps_original_order() {
    let logs = create_log_collection("wf-first", "wf-second");
    assert_eq!(logs.len(), 10);

    let filter = LogFilter::new().with_status(ExecutionStatus::Failed);
    let failed = filter.apply(&logs);

    let ids: Vec<_> = failed.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["log-1", "log-4", "log-7", "log-9"]);
    assert!(failed.iter().all(|l| l.status == ExecutionStatus::Failed));
}

#[test]
fn test_empty_filter_matches_everything() {
    let logs = create_log_collection("wf-first", "wf-second");
    let filter = LogFilter::new();
    assert!(filter.is_empty());
    assert_eq!(filter.apply(&logs).len(), logs.len());
}

#[test]
fn test_filter_by_workflow_and_status() {
    let first = "wf-first";
    let second = "wf-second";
    let logs = create_log_collection(first, second);

    let filter = LogFilter::new()
        .for_workflow(second)
        .with_status(ExecutionStatus::Failed);
    let ids: Vec<_> = filter.apply(&logs).iter().map(|l| l.id.clone()).collect();
    assert_eq!(ids, vec!["log-1", "log-7", "log-9"]);

    let running = LogFilter::new()
        .for_workflow(first)
        .with_status(ExecutionStatus::Running);
    assert_eq!(running.apply(&logs)[0].id, "log-8");
}

#[test]
fn test_date_range_is_inclusive() {
    let logs = create_log_collection("wf-first", "wf-second");
    let filter = LogFilter::new().between(at(20), at(50)).unwrap();
    let ids: Vec<_> = filter.apply(&logs).iter().map(|l| l.id.clone()).collect();
    assert_eq!(ids, vec!["log-2", "log-3", "log-4", "log-5"]);

    let open_ended = LogFilter::new().since(at(85));
    assert_eq!(open_ended.apply(&logs).len(), 1);
    let until = LogFilter::new().until(at(0));
    assert_eq!(until.apply(&logs).len(), 1);
}

#[test]
fn test_inverted_date_range_is_rejected() {
    let result = LogFilter::new().between(at(10), at(5));
    match result {
        Err(err @ LogError::InvalidDateRange { .. }) => assert!(!err.is_fetch_failed()),
        other => panic!("Expected InvalidDateRange, got {:?}", other),
    }
}

#[test]
fn test_entry_filter_preserves_chronological_order() {
    let log = execution_log(0, "wf", ExecutionStatus::Failed, 0);

    let node_b = EntryFilter::new().for_node("b");
    let messages: Vec<_> = node_b.apply(&log).iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["checking", "boom"]);

    let severe = EntryFilter::new().at_least(LogLevel::Info);
    let messages: Vec<_> = severe.apply(&log).iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["started", "boom"]);

    let both = EntryFilter::new().at_least(LogLevel::Warn).for_node("a");
    assert!(both.apply(&log).is_empty());
}

#[test]
fn test_sorting_is_stable_for_equal_start_times() {
    let workflow = "wf";
    let logs = vec![
        execution_log(0, workflow, ExecutionStatus::Completed, 5),
        execution_log(1, workflow, ExecutionStatus::Completed, 10),
        execution_log(2, workflow, ExecutionStatus::Failed, 5),
        execution_log(3, workflow, ExecutionStatus::Running, 0),
    ];
    let ids = |sorted: Vec<&WorkflowExecutionLog>| -> Vec<String> {
        sorted.iter().map(|l| l.id.clone()).collect()
    };

    assert_eq!(
        ids(LogSort::Original.sort(logs.iter().collect())),
        vec!["log-0", "log-1", "log-2", "log-3"]
    );
    assert_eq!(
        ids(LogSort::OldestFirst.sort(logs.iter().collect())),
        vec!["log-3", "log-0", "log-2", "log-1"]
    );
    assert_eq!(
        ids(LogSort::NewestFirst.sort(logs.iter().collect())),
        vec!["log-1", "log-0", "log-2", "log-3"]
    );
}

#[test]
fn test_log_helpers() {
    let log = execution_log(0, "wf", ExecutionStatus::Completed, 0);
    assert!(log.is_finished());
    assert_eq!(log.duration(), Some(chrono::Duration::minutes(1)));
    assert_eq!(log.highest_level(), Some(LogLevel::Error));
    assert_eq!(log.entries_for_node("b").count(), 2);

    let running = execution_log(1, "wf", ExecutionStatus::Running, 0);
    assert!(!running.is_finished());
    assert_eq!(running.duration(), None);
}

#[test]
fn test_execution_log_parses_wire_format() {
    let json = r#"[{
        "id": "log-42",
        "workflowDefinitionId": "7d5b3c1e-2f44-4c1a-9a55-0c6f3e2a9b10",
        "executionId": "run-42",
        "startTime": "2026-10-19T22:00:00Z",
        "status": "Running",
        "logEntries": [
            { "timestamp": "2026-10-19T22:00:01Z", "nodeId": "a", "nodeType": "start",
              "level": "warning", "message": "slow start", "data": { "ms": 900 } }
        ]
    }]"#;
    let logs = JsonLogSource::inline(json).fetch().expect("Logs should parse");

    assert_eq!(logs.len(), 1);
    let log = &logs[0];
    assert_eq!(log.status, ExecutionStatus::Running);
    assert_eq!(log.end_time, None);
    assert_eq!(log.log_entries[0].level, LogLevel::Warn);
    assert_eq!(log.log_entries[0].data.as_ref().unwrap()["ms"], 900);
}

#[test]
fn test_malformed_logs_surface_as_fetch_failed() {
    let source = JsonLogSource::inline(r#"[{ "id": "broken" }]"#);
    match source.fetch() {
        Err(err @ LogError::FetchFailed { .. }) => {
            assert!(err.is_fetch_failed());
            assert!(err.to_string().contains("<inline>"));
        }
        other => panic!("Expected FetchFailed, got {:?}", other),
    }

    let unknown_status = JsonLogSource::inline(
        r#"[{ "id": "x", "workflowDefinitionId": "7d5b3c1e-2f44-4c1a-9a55-0c6f3e2a9b10",
              "executionId": "r", "startTime": "2026-10-19T22:00:00Z", "status": "Paused" }]"#,
    );
    assert!(unknown_status.fetch().unwrap_err().is_fetch_failed());
}

#[test]
fn test_missing_file_surfaces_as_fetch_failed() {
    let source = JsonLogSource::from_path("/definitely/not/here/logs.json");
    let err = source.fetch().unwrap_err();
    assert!(err.is_fetch_failed());
    assert!(err.to_string().contains("/definitely/not/here/logs.json"));
}

#[test]
fn test_file_source_fetches_filtered_logs() {
    let first = "wf-first";
    let logs = create_log_collection(first, "wf-second");

    let path = std::env::temp_dir().join(format!("runeforge-logs-{}.json", Uuid::new_v4()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(serde_json::to_string(&logs).unwrap().as_bytes())
        .unwrap();
    drop(file);

    let source = JsonLogSource::from_path(&path);
    let filter = LogFilter::new().for_workflow(first);
    let fetched = source.fetch_filtered(&filter).unwrap();
    std::fs::remove_file(&path).unwrap();

    let ids: Vec<_> = fetched.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["log-0", "log-2", "log-4", "log-6", "log-8"]);
    assert_eq!(fetched[0], logs[0]);
}

#[test]
fn test_in_memory_source() {
    let logs = create_log_collection("wf-first", "wf-second");
    let filter = LogFilter::new().with_status(ExecutionStatus::Running);
    let fetched = logs.fetch_filtered(&filter).unwrap();
    assert_eq!(fetched.len(), 2);
}

#[test]
fn test_logs_with_non_uuid_workflow_ids_are_fetched() {
    let json = r#"[
        { "id": "clx9log000001", "workflowDefinitionId": "clx9abc000001", "executionId": "r1",
          "startTime": "2026-10-19T22:00:00Z", "status": "Completed",
          "endTime": "2026-10-19T22:00:05Z" },
        { "id": "clx9log000002", "workflowDefinitionId": "7d5b3c1e-2f44-4c1a-9a55-0c6f3e2a9b10",
          "executionId": "r2", "startTime": "2026-10-19T22:01:00Z", "status": "failed" }
    ]"#;
    let source = JsonLogSource::inline(json);
    let logs = source.fetch().expect("Opaque workflow ids should parse");
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].workflow_definition_id, "clx9abc000001");

    let filtered = source
        .fetch_filtered(&LogFilter::new().for_workflow("clx9abc000001"))
        .unwrap();
    let ids: Vec<_> = filtered.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["clx9log000001"]);
}
