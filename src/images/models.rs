use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated image in the gallery. Held in memory, newest first;
/// the gallery does not survive restarts.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GeneratedImage {
    pub id: Uuid,
    pub url: String,
    pub prompt: String,
    /// Unix millis at creation
    pub created_at: i64,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Bytes relayed back by the download proxy
#[derive(Debug)]
pub struct DownloadedImage {
    pub content_type: String,
    pub filename: String,
    pub bytes: Vec<u8>,
}

// ============================================================================
// Upstream generation endpoint payloads
// ============================================================================

#[derive(Debug, Serialize)]
pub struct GenerationRequestPayload<'a> {
    pub prompt: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerationPayload {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerationErrorPayload {
    pub error: String,
}
