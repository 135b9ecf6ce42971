use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::models::{DownloadRequest, GenerateRequest, GeneratedImage};
use super::service::ImagesError;
use crate::AppState;

/// GET /images - gallery contents, newest first
pub async fn list_gallery(State(state): State<AppState>) -> Json<Vec<GeneratedImage>> {
    Json(state.images_service.gallery().await)
}

/// POST /images/generate - generate an image from a prompt
pub async fn generate_image(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<GeneratedImage>), ImagesError> {
    let image = state.images_service.generate(&request.prompt).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// POST /images/download - proxy an external image back as an attachment
pub async fn download_image(
    State(state): State<AppState>,
    Json(request): Json<DownloadRequest>,
) -> Result<Response, ImagesError> {
    let image = state
        .images_service
        .download(request.url.as_deref())
        .await?;

    let disposition = format!("attachment; filename=\"{}\"", image.filename);

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        image.bytes,
    )
        .into_response())
}
