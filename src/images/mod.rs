pub mod handlers;
pub mod models;
pub mod service;

pub use models::GeneratedImage;
pub use service::{ImagesError, ImagesService};
