//! Task commands - list, show and mutate tasks

use serde_json::{Map, Value};

use habityzer::core::models::EntityId;
use habityzer::core::ports::Transport;
use habityzer::core::query::ListView;
use habityzer::core::services::{NewTask, TaskService};
use habityzer::output::{OperationResult, OutputMode, TaskListResult, TaskShowResult};

/// List tasks for a named view
pub async fn list<T: Transport>(
    service: &TaskService<T>,
    filter: Option<&str>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let view = ListView::from_arg(filter);
    let tasks = service.list_tasks(&view.filter()).await;
    TaskListResult::new(view.heading(), tasks).render(mode);
    Ok(())
}

/// Show one task in detail
pub async fn show<T: Transport>(
    service: &TaskService<T>,
    id: &str,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let task = service.get_task(&parse_id(id)?).await?;
    TaskShowResult { task }.render(mode);
    Ok(())
}

/// Create a task
pub async fn create<T: Transport>(
    service: &TaskService<T>,
    title: &str,
    description: Option<&str>,
    status: Option<&str>,
    priority: Option<u32>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    if title.trim().is_empty() {
        anyhow::bail!("Task title must not be empty");
    }

    let mut new_task = NewTask::new(title).with_description(description.unwrap_or_default());
    if let Some(status) = status {
        new_task = new_task.with_status(parse_id(status)?);
    }
    if let Some(priority) = priority {
        new_task = new_task.with_priority(priority);
    }

    let task = service.create_task(&new_task).await?;
    let message = format!("Task created successfully: [ID: {}] {}", task.id, task.title);
    OperationResult::success(message, Some(task)).render(mode);
    Ok(())
}

/// Update one field of a task
pub async fn update<T: Transport>(
    service: &TaskService<T>,
    id: &str,
    field: &str,
    value: &str,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let mut updates = Map::new();
    updates.insert(field.to_string(), field_value(field, value));

    let task = service.update_task(&parse_id(id)?, &updates).await?;
    let message = format!("Task updated successfully: {}", task.title);
    OperationResult::success(message, Some(task)).render(mode);
    Ok(())
}

/// Move a task to another status
pub async fn move_task<T: Transport>(
    service: &TaskService<T>,
    id: &str,
    status: &str,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let task = service.move_task_to_status(&parse_id(id)?, &parse_id(status)?).await?;
    let message = format!("Task moved successfully: {}", task.title);
    OperationResult::success(message, Some(task)).render(mode);
    Ok(())
}

/// Delete a task
pub async fn delete<T: Transport>(
    service: &TaskService<T>,
    id: &str,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let id = parse_id(id)?;
    service.delete_task(&id).await?;
    OperationResult::success(format!("Task {id} deleted successfully"), None).render(mode);
    Ok(())
}

fn parse_id(raw: &str) -> anyhow::Result<EntityId> {
    raw.parse().map_err(|e: String| anyhow::anyhow!(e))
}

/// Task fields the API types as integers
const NUMERIC_FIELDS: &[&str] = &["priority"];

/// Value sent for `update`: integers for numeric fields, text for the rest
fn field_value(field: &str, raw: &str) -> Value {
    match raw.trim().parse::<i64>() {
        Ok(number) if NUMERIC_FIELDS.contains(&field) => Value::from(number),
        _ => Value::String(raw.to_string()),
    }
}
