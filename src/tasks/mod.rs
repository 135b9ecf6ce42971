pub mod handlers;
pub mod models;
pub mod service;

pub use models::Task;
pub use service::{TasksError, TasksService};
