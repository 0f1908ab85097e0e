//! Tests for the task service (resource operations)
//!
//! Driven by the recording transport: each test checks the request that was
//! built and how the response or failure was handled.

use habityzer::core::models::{EntityId, Relation};
use habityzer::core::ports::{Method, TransportError};
use habityzer::core::query::TaskFilter;
use habityzer::core::services::{CompletionRule, NewTask, TaskService, collection_members};
use serde_json::{Map, Value, json};

use crate::common::fixtures::{collection, service, task_json, test_config};
use crate::common::mocks::RecordingTransport;

fn id(raw: &str) -> EntityId {
    EntityId::from(raw)
}

fn decode_error() -> TransportError {
    TransportError::from(serde_json::from_str::<Value>("{not json").unwrap_err())
}

// =============================================================================
// LISTINGS (DEGRADE ON FAILURE)
// =============================================================================

#[tokio::test]
async fn test_list_tasks_unwraps_member_envelope() {
    let transport = RecordingTransport::new()
        .respond(json!({ "member": [{ "id": 1, "title": "A", "status": "/api/task_statuses/2" }] }));
    let service = service(transport);

    let tasks = service.list_tasks(&TaskFilter::default()).await;

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "A");
    assert_eq!(
        tasks[0].status,
        Relation::Unresolved {
            iri: "/api/task_statuses/2".to_string()
        }
    );
}

#[tokio::test]
async fn test_list_tasks_builds_filtered_path() {
    let service = service(RecordingTransport::new().respond(collection(vec![])));

    service.list_tasks(&TaskFilter::statuses([4_i64])).await;

    let call = service.transport().last_call();
    assert_eq!(call.method, Method::Get);
    assert_eq!(
        call.path,
        "/tasks?page=1&project%5B%5D=%2Fapi%2Fprojects%2F2&status%5B%5D=%2Fapi%2Ftask_statuses%2F4"
    );
    assert!(call.body.is_none());
}

#[tokio::test]
async fn test_list_tasks_accepts_raw_array() {
    let service = service(RecordingTransport::new().respond(json!([task_json(1, "A"), task_json(2, "B")])));
    let tasks = service.list_tasks(&TaskFilter::all()).await;
    assert_eq!(tasks.len(), 2);
}

#[tokio::test]
async fn test_list_tasks_degrades_on_http_error() {
    let service = service(RecordingTransport::new().fail_status(500, "boom"));
    assert!(service.list_tasks(&TaskFilter::default()).await.is_empty());
}

#[tokio::test]
async fn test_list_tasks_degrades_on_network_error() {
    let service = service(
        RecordingTransport::new().fail(TransportError::network("connection refused")),
    );
    assert!(service.list_tasks(&TaskFilter::default()).await.is_empty());
}

#[tokio::test]
async fn test_list_tasks_keeps_members_around_a_malformed_one() {
    let transport = RecordingTransport::new().respond(json!({
        "member": [
            { "id": 1, "title": "Good", "status": "/api/task_statuses/2" },
            { "id": 2, "title": "Odd", "status": 3 },
            { "title": "No id" },
            { "id": 4, "title": null }
        ]
    }));
    let tasks = service(transport).list_tasks(&TaskFilter::default()).await;

    let ids: Vec<EntityId> = tasks.iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids, vec![EntityId::Int(1), EntityId::Int(2), EntityId::Int(4)]);
    assert!(tasks[1].status.resolved().is_some());
    assert_eq!(tasks[2].title, "");
}

#[tokio::test]
async fn test_list_tasks_degrades_on_unexpected_shape() {
    let service = service(RecordingTransport::new().respond(json!({ "detail": "odd" })));
    assert!(service.list_tasks(&TaskFilter::default()).await.is_empty());
}

#[tokio::test]
async fn test_statuses_and_projects_use_first_page() {
    let transport = RecordingTransport::new()
        .respond(json!({ "member": [{ "id": 1, "name": "Idea" }, { "id": 2, "name": "Todo" }] }))
        .respond(json!({ "hydra:member": [{ "id": 2, "name": "Habityzer", "color": "#fff" }] }));
    let service = service(transport);

    let statuses = service.task_statuses().await;
    let projects = service.projects().await;

    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[1].name, "Todo");
    assert_eq!(projects[0].color.as_deref(), Some("#fff"));

    let paths: Vec<String> = service.transport().calls().into_iter().map(|c| c.path).collect();
    assert_eq!(paths, vec!["/task_statuses?page=1", "/projects?page=1"]);
}

#[tokio::test]
async fn test_statuses_degrade_on_decode_error() {
    let service = service(RecordingTransport::new().fail(decode_error()));
    assert!(service.task_statuses().await.is_empty());
}

#[test]
fn test_collection_members_fallbacks() {
    assert_eq!(collection_members(json!({ "member": [1] })), json!([1]));
    assert_eq!(collection_members(json!([2])), json!([2]));
    assert_eq!(collection_members(Value::Null), json!([]));
    assert_eq!(collection_members(json!({ "other": true })), json!({ "other": true }));
}

// =============================================================================
// SINGLE-TASK OPERATIONS (PROPAGATE ON FAILURE)
// =============================================================================

#[tokio::test]
async fn test_get_task_requests_detail_path() {
    let service = service(RecordingTransport::new().respond(task_json(42, "Answer")));

    let task = service.get_task(&id("42")).await.unwrap();

    assert_eq!(task.title, "Answer");
    assert_eq!(service.transport().last_call().path, "/tasks/42");
}

#[tokio::test]
async fn test_get_task_error_names_task_and_status() {
    let service = service(RecordingTransport::new().fail_status(500, "boom"));

    let err = service.get_task(&id("42")).await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("42"), "{message}");
    assert!(message.contains("500"), "{message}");
    assert_eq!(err.kind().status_code(), Some(500));
}

#[tokio::test]
async fn test_get_task_propagates_decode_error() {
    let service = service(RecordingTransport::new().respond(json!({ "title": "no id" })));
    let err = service.get_task(&id("1")).await.unwrap_err();
    assert!(matches!(err.kind(), TransportError::Decode(_)));
}

#[tokio::test]
async fn test_create_task_defaults() {
    let service = service(RecordingTransport::new().respond(task_json(10, "Fix bug")));

    let task = service.create_task(&NewTask::new("Fix bug").with_description("desc")).await.unwrap();

    assert_eq!(task.id, EntityId::Int(10));
    let call = service.transport().last_call();
    assert_eq!(call.method, Method::Post);
    assert_eq!(call.path, "/tasks");
    assert_eq!(
        call.body.unwrap(),
        json!({
            "title": "Fix bug",
            "description": "desc",
            "priority": 2,
            "status": "/api/task_statuses/2",
            "project": "/api/projects/2"
        })
    );
}

#[tokio::test]
async fn test_create_task_uses_configured_project_and_given_status() {
    let config = test_config("https://api.test/api").with_project_id(5);
    let transport = RecordingTransport::new().respond(task_json(11, "Idea"));
    let service = TaskService::new(transport, &config);
    assert_eq!(service.project_id(), &EntityId::Int(5));

    let new_task = NewTask::new("Idea").with_status(1_i64).with_priority(4);
    service.create_task(&new_task).await.unwrap();

    let body = service.transport().last_call().body.unwrap();
    assert_eq!(body["status"], "/api/task_statuses/1");
    assert_eq!(body["project"], "/api/projects/5");
    assert_eq!(body["priority"], 4);
}

#[tokio::test]
async fn test_create_task_propagates_failure() {
    let service = service(RecordingTransport::new().fail_status(422, "title: blank"));
    let err = service.create_task(&NewTask::new("")).await.unwrap_err();
    assert!(err.to_string().contains("create task"));
    assert_eq!(err.kind().status_code(), Some(422));
}

#[tokio::test]
async fn test_update_task_sends_updates_verbatim() {
    let service = service(RecordingTransport::new().respond(task_json(3, "X")));
    let mut updates = Map::new();
    updates.insert("title".to_string(), json!("X"));

    service.update_task(&id("3"), &updates).await.unwrap();

    let call = service.transport().last_call();
    assert_eq!(call.method, Method::Patch);
    assert_eq!(call.path, "/tasks/3");
    assert_eq!(call.body.unwrap(), json!({ "title": "X" }));
}

#[tokio::test]
async fn test_delete_task_returns_true() {
    let service = service(RecordingTransport::new());

    assert!(service.delete_task(&id("8")).await.unwrap());

    let call = service.transport().last_call();
    assert_eq!(call.method, Method::Delete);
    assert_eq!(call.path, "/tasks/8");
    assert!(call.body.is_none());
}

#[tokio::test]
async fn test_delete_missing_task_propagates_not_found() {
    let service = service(RecordingTransport::new().fail_status(404, "Not Found"));
    let err = service.delete_task(&id("8")).await.unwrap_err();
    assert_eq!(err.kind().status_code(), Some(404));
}

// =============================================================================
// MOVE
// =============================================================================

#[tokio::test]
async fn test_move_to_done_sets_completed_at() {
    let service = service(RecordingTransport::new().respond(task_json(5, "Ship")));

    service.move_task_to_status(&id("5"), &id("Done")).await.unwrap();

    let body = service.transport().last_call().body.unwrap();
    assert_eq!(body["status"], "/api/task_statuses/Done");
    let completed_at = body["completedAt"].as_str().unwrap();
    assert!(!completed_at.is_empty());
    assert!(chrono::DateTime::parse_from_rfc3339(completed_at).is_ok());
}

#[tokio::test]
async fn test_move_to_completed_word_sets_completed_at() {
    let service = service(RecordingTransport::new().respond(task_json(5, "Ship")));
    service.move_task_to_status(&id("5"), &id("Completed")).await.unwrap();
    assert!(service.transport().last_call().body.unwrap().get("completedAt").is_some());
}

#[tokio::test]
async fn test_move_to_todo_leaves_completed_at_out() {
    let service = service(RecordingTransport::new().respond(task_json(5, "Ship")));

    service.move_task_to_status(&id("5"), &id("Todo")).await.unwrap();

    let body = service.transport().last_call().body.unwrap();
    assert_eq!(body, json!({ "status": "/api/task_statuses/Todo" }));
}

#[tokio::test]
async fn test_move_by_numeric_id_never_completes() {
    let service = service(RecordingTransport::new().respond(task_json(5, "Ship")));

    service.move_task_to_status(&id("5"), &id("4")).await.unwrap();

    let call = service.transport().last_call();
    assert_eq!(call.method, Method::Patch);
    assert_eq!(call.body.unwrap(), json!({ "status": "/api/task_statuses/4" }));
}

#[tokio::test]
async fn test_move_uses_injected_completion_rule() {
    let transport = RecordingTransport::new().respond(task_json(5, "Ship"));
    let service = service(transport)
        .with_completion_rule(CompletionRule::new(|status| *status == EntityId::Int(4)));

    service.move_task_to_status(&id("5"), &id("4")).await.unwrap();

    assert!(service.transport().last_call().body.unwrap().get("completedAt").is_some());
}

#[tokio::test]
async fn test_move_error_mentions_move() {
    let transport = RecordingTransport::new().fail_status(400, "invalid IRI");
    let service = service(transport).with_completion_rule(CompletionRule::never());

    let err = service.move_task_to_status(&id("5"), &id("Done")).await.unwrap_err();

    assert_eq!(err.to_string(), "failed to move task 5: HTTP 400: invalid IRI");
}
