pub mod handlers;
pub mod models;
pub mod service;
pub mod storage;

pub use models::FavoriteCity;
pub use service::{FavoritesError, FavoritesService};
pub use storage::{FavoritesRepo, JsonFileRepo};
