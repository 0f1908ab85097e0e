//! Catalog commands - statuses and projects

use habityzer::core::ports::Transport;
use habityzer::core::services::TaskService;
use habityzer::output::{OutputMode, ProjectListResult, StatusListResult};

/// Show available task statuses
pub async fn statuses<T: Transport>(
    service: &TaskService<T>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let statuses = service.task_statuses().await;
    StatusListResult { statuses }.render(mode);
    Ok(())
}

/// Show available projects
pub async fn projects<T: Transport>(
    service: &TaskService<T>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let projects = service.projects().await;
    ProjectListResult { projects }.render(mode);
    Ok(())
}
