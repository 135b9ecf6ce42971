use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A to-do item. Held in memory only; the list does not survive restarts.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub details: String,
    pub completed: bool,
    /// Unix millis at creation
    pub created_at: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub details: String,
}
