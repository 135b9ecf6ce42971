pub mod handlers;
pub mod models;
pub mod service;

pub use models::{DashboardState, LastQuery};
pub use service::{DashboardError, DashboardService};
