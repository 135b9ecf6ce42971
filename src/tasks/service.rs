use axum::http::StatusCode;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::Task;
use crate::error::HttpError;
use crate::impl_into_response;

#[derive(Error, Debug)]
pub enum TasksError {
    #[error("Task title must not be empty")]
    TitleRequired,

    #[error("Task not found")]
    NotFound,
}

impl HttpError for TasksError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::TitleRequired => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::TitleRequired => Some("TITLE_REQUIRED"),
            Self::NotFound => Some("TASK_NOT_FOUND"),
        }
    }
}

impl_into_response!(TasksError);

/// In-memory task list, mutated only through these operations
pub struct TasksService {
    tasks: RwLock<Vec<Task>>,
}

impl TasksService {
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(Vec::new()),
        }
    }

    /// Tasks in insertion order
    pub async fn list(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    pub async fn add(&self, title: &str, details: &str) -> Result<Task, TasksError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TasksError::TitleRequired);
        }

        let task = Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            details: details.trim().to_string(),
            completed: false,
            created_at: Utc::now().timestamp_millis(),
        };

        let mut tasks = self.tasks.write().await;
        tasks.push(task.clone());

        tracing::info!(task_id = %task.id, "Task added");

        Ok(task)
    }

    pub async fn update(&self, id: Uuid, title: &str, details: &str) -> Result<Task, TasksError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TasksError::TitleRequired);
        }

        let mut tasks = self.tasks.write().await;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TasksError::NotFound)?;

        task.title = title.to_string();
        task.details = details.trim().to_string();

        tracing::info!(task_id = %task.id, "Task updated");

        Ok(task.clone())
    }

    /// Flip the completed flag
    pub async fn toggle(&self, id: Uuid) -> Result<Task, TasksError> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TasksError::NotFound)?;

        task.completed = !task.completed;

        Ok(task.clone())
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), TasksError> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);

        if tasks.len() == before {
            return Err(TasksError::NotFound);
        }

        tracing::info!(task_id = %id, "Task removed");

        Ok(())
    }
}

impl Default for TasksService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_trims_and_lists_in_insertion_order() {
        let service = TasksService::new();

        service.add("  first  ", " a ").await.unwrap();
        service.add("second", "").await.unwrap();

        let tasks = service.list().await;
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "first");
        assert_eq!(tasks[0].details, "a");
        assert_eq!(tasks[1].title, "second");
        assert!(!tasks[0].completed);
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let service = TasksService::new();
        let err = service.add("   ", "details").await.unwrap_err();
        assert!(matches!(err, TasksError::TitleRequired));
    }

    #[tokio::test]
    async fn toggle_flips_completed_both_ways() {
        let service = TasksService::new();
        let task = service.add("walk", "").await.unwrap();

        let task = service.toggle(task.id).await.unwrap();
        assert!(task.completed);

        let task = service.toggle(task.id).await.unwrap();
        assert!(!task.completed);
    }

    #[tokio::test]
    async fn update_replaces_title_and_details() {
        let service = TasksService::new();
        let task = service.add("old", "old details").await.unwrap();

        let task = service.update(task.id, "new", "new details").await.unwrap();
        assert_eq!(task.title, "new");
        assert_eq!(task.details, "new details");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let service = TasksService::new();

        assert!(matches!(
            service.toggle(Uuid::new_v4()).await.unwrap_err(),
            TasksError::NotFound
        ));
        assert!(matches!(
            service.remove(Uuid::new_v4()).await.unwrap_err(),
            TasksError::NotFound
        ));
    }

    #[tokio::test]
    async fn remove_deletes_only_the_target() {
        let service = TasksService::new();
        let first = service.add("first", "").await.unwrap();
        service.add("second", "").await.unwrap();

        service.remove(first.id).await.unwrap();

        let tasks = service.list().await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "second");
    }
}
