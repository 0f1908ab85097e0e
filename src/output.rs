//! Output formatting for human and JSON modes
//!
//! Every result type renders either as human-readable text or as
//! machine-parseable JSON. The human text is built as a `String` first so it
//! can be tested without capturing stdout.

use chrono::{DateTime, Local, NaiveDate};
use colored::Colorize;
use serde::Serialize;

use crate::core::models::{Project, Status, Task};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Glyph repeated to show priority
pub const PRIORITY_GLYPH: char = '★';

/// Descriptions longer than this are cut in listings
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// Priority as repeated glyphs, at least one
#[must_use]
pub fn priority_stars(priority: Option<u32>) -> String {
    let count = priority.unwrap_or(1).max(1);
    std::iter::repeat_n(PRIORITY_GLYPH, count as usize).collect()
}

/// Render an ISO 8601 timestamp as a local date
///
/// Plain dates pass through; anything unparsable is shown as sent.
#[must_use]
pub fn format_date(raw: &str) -> String {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return instant.with_timezone(&Local).format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

/// First `max_chars` characters, with `...` when something was cut
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Blank line, bold title and underline
fn heading(title: &str) -> Vec<String> {
    vec![
        String::new(),
        title.bold().to_string(),
        "=".repeat(title.chars().count() + 1),
    ]
}

/// Join lines, ending with a newline
fn finish(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Result of a task listing
#[derive(Debug, Serialize)]
pub struct TaskListResult {
    /// Heading naming the view
    pub heading: String,
    /// Number of tasks
    pub total: usize,
    /// The tasks, as returned by the API
    pub tasks: Vec<Task>,
}

impl TaskListResult {
    /// Wrap a listing
    #[must_use]
    pub fn new(heading: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            heading: heading.into(),
            total: tasks.len(),
            tasks,
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => print_json(self),
        }
    }

    /// Human-readable text
    #[must_use]
    pub fn to_human(&self) -> String {
        let mut lines = heading(&self.heading);

        if self.tasks.is_empty() {
            lines.push("   No tasks found.".to_string());
            return finish(&lines);
        }

        for (index, task) in self.tasks.iter().enumerate() {
            let project = task.project.label("Project Set", "No Project");
            let status = task.status.label("Status Set", "No Status");
            let due = task
                .due_date
                .as_deref()
                .map(|d| format!(" (Due: {})", format_date(d)))
                .unwrap_or_default();

            lines.push(String::new());
            lines.push(format!("{}. [ID: {}] {}", index + 1, task.id, task.title));
            lines.push(format!(
                "   Project: {project} | Status: {status} | Priority: {}{due}",
                priority_stars(task.priority)
            ));
            if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
                lines.push(format!(
                    "   Description: {}",
                    truncate(description, DESCRIPTION_PREVIEW_CHARS)
                ));
            }
        }
        lines.push(String::new());
        finish(&lines)
    }
}

/// Result of showing one task
#[derive(Debug, Serialize)]
pub struct TaskShowResult {
    /// The task with embedded relations
    pub task: Task,
}

impl TaskShowResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => print_json(self),
        }
    }

    /// Human-readable text
    #[must_use]
    pub fn to_human(&self) -> String {
        let task = &self.task;
        let mut lines = heading("Task Details");

        let due = task
            .due_date
            .as_deref()
            .map(|d| format!(" | Due: {}", format_date(d)))
            .unwrap_or_default();
        let completed = task
            .completed_at
            .as_deref()
            .map(|d| format!(" | Completed: {}", format_date(d)))
            .unwrap_or_default();

        lines.push(String::new());
        lines.push(format!("ID:       {}", task.id));
        lines.push(format!("Title:    {}", task.title));
        lines.push(format!("Project:  {}", task.project.label("No Project", "No Project")));
        lines.push(format!("Status:   {}", task.status.label("No Status", "No Status")));
        lines.push(format!("Priority: {}{due}{completed}", priority_stars(task.priority)));

        if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(String::new());
            lines.push("Description:".to_string());
            lines.push(description.to_string());
        }
        if let Some(created) = task.created_at.as_deref() {
            lines.push(String::new());
            lines.push(format!("Created: {}", format_date(created)));
        }
        lines.push(String::new());
        finish(&lines)
    }
}

/// Result of listing statuses
#[derive(Debug, Serialize)]
pub struct StatusListResult {
    /// Statuses in server order
    pub statuses: Vec<Status>,
}

impl StatusListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => print_json(self),
        }
    }

    /// Human-readable text
    #[must_use]
    pub fn to_human(&self) -> String {
        let mut lines = heading("Available Task Statuses:");
        for (index, status) in self.statuses.iter().enumerate() {
            let id = status.id.as_ref().map_or_else(|| "?".to_string(), ToString::to_string);
            lines.push(format!("{}. [ID: {id}] {}", index + 1, status.name));
        }
        lines.push(String::new());
        finish(&lines)
    }
}

/// Result of listing projects
#[derive(Debug, Serialize)]
pub struct ProjectListResult {
    /// Projects in server order
    pub projects: Vec<Project>,
}

impl ProjectListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => print_json(self),
        }
    }

    /// Human-readable text
    #[must_use]
    pub fn to_human(&self) -> String {
        let mut lines = heading("Available Projects:");
        for (index, project) in self.projects.iter().enumerate() {
            let id = project.id.as_ref().map_or_else(|| "?".to_string(), ToString::to_string);
            let short = project
                .short_name
                .as_deref()
                .map(|s| format!(" [{s}]"))
                .unwrap_or_default();
            let color = project.color.as_deref().map(|c| format!(" ({c})")).unwrap_or_default();
            lines.push(format!("{}. [ID: {id}] {}{short}{color}", index + 1, project.name));
            if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
                lines.push(format!("   Description: {description}"));
            }
        }
        lines.push(String::new());
        finish(&lines)
    }
}

/// Generic operation result for mutations
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
    /// Task returned by the API, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<Task>,
}

impl OperationResult {
    /// Successful operation
    #[must_use]
    pub fn success(message: impl Into<String>, task: Option<Task>) -> Self {
        Self {
            success: true,
            message: message.into(),
            task,
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message.green()),
            OutputMode::Json => print_json(self),
        }
    }
}
