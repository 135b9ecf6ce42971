use axum::http::StatusCode;
use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{
    DownloadedImage, GeneratedImage, GenerationErrorPayload, GenerationPayload,
    GenerationRequestPayload,
};
use crate::error::HttpError;
use crate::impl_into_response;

const DEFAULT_CONTENT_TYPE: &str = "image/png";

#[derive(Error, Debug)]
pub enum ImagesError {
    #[error("Please enter a prompt")]
    EmptyPrompt,

    #[error("Image URL is required")]
    UrlRequired,

    #[error("Image generation is not configured")]
    NotConfigured,

    #[error("Failed to generate image: {0}")]
    GenerationFailed(String),

    #[error("Failed to fetch image")]
    FetchFailed,

    #[error("Request failed: {0}")]
    RequestError(#[from] reqwest::Error),
}

impl HttpError for ImagesError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyPrompt => StatusCode::BAD_REQUEST,
            Self::UrlRequired => StatusCode::BAD_REQUEST,
            Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::GenerationFailed(_) => StatusCode::BAD_GATEWAY,
            Self::FetchFailed => StatusCode::BAD_GATEWAY,
            Self::RequestError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::EmptyPrompt => Some("EMPTY_PROMPT"),
            Self::UrlRequired => Some("URL_REQUIRED"),
            Self::NotConfigured => Some("NOT_CONFIGURED"),
            Self::GenerationFailed(_) => Some("GENERATION_FAILED"),
            Self::FetchFailed => Some("FETCH_FAILED"),
            Self::RequestError(_) => Some("REQUEST_ERROR"),
        }
    }
}

impl_into_response!(ImagesError);

/// Relays prompts to the external generation endpoint, keeps the in-memory
/// gallery, and proxies cross-origin image downloads.
pub struct ImagesService {
    client: Client,
    generation_url: Option<String>,
    generation_api_key: Option<String>,
    gallery: RwLock<Vec<GeneratedImage>>,
}

impl ImagesService {
    pub fn new(
        client: Client,
        generation_url: Option<String>,
        generation_api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            generation_url,
            generation_api_key,
            gallery: RwLock::new(Vec::new()),
        }
    }

    /// Gallery contents, newest first
    pub async fn gallery(&self) -> Vec<GeneratedImage> {
        self.gallery.read().await.clone()
    }

    /// Generate an image from a prompt and prepend it to the gallery
    pub async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ImagesError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ImagesError::EmptyPrompt);
        }

        let url = self
            .generation_url
            .as_deref()
            .ok_or(ImagesError::NotConfigured)?;

        tracing::debug!(prompt_len = prompt.len(), "Requesting image generation");

        let mut request = self
            .client
            .post(url)
            .json(&GenerationRequestPayload { prompt });
        if let Some(key) = &self.generation_api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<GenerationErrorPayload>().await {
                Ok(payload) => payload.error,
                Err(_) => format!("HTTP {}", status),
            };
            return Err(ImagesError::GenerationFailed(message));
        }

        let payload: GenerationPayload = response.json().await?;

        let image = GeneratedImage {
            id: Uuid::new_v4(),
            url: payload.image_url,
            prompt: prompt.to_string(),
            created_at: Utc::now().timestamp_millis(),
        };

        let mut gallery = self.gallery.write().await;
        gallery.insert(0, image.clone());

        tracing::info!(image_id = %image.id, "Image generated");

        Ok(image)
    }

    /// Fetch an external image server-side and hand it back for download
    pub async fn download(&self, url: Option<&str>) -> Result<DownloadedImage, ImagesError> {
        let url = url.map(str::trim).filter(|u| !u.is_empty());
        let url = url.ok_or(ImagesError::UrlRequired)?;

        tracing::debug!(url = %url, "Proxying image download");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Image fetch failed");
            return Err(ImagesError::FetchFailed);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let bytes = response.bytes().await?.to_vec();

        Ok(DownloadedImage {
            content_type,
            filename: attachment_filename(Utc::now().timestamp_millis()),
            bytes,
        })
    }
}

/// Filename for the attachment disposition header
fn attachment_filename(unix_millis: i64) -> String {
    format!("ai-art-{}.png", unix_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ImagesService {
        ImagesService::new(Client::new(), None, None)
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected_before_any_request() {
        let err = service().generate("   ").await.unwrap_err();
        assert!(matches!(err, ImagesError::EmptyPrompt));
    }

    #[tokio::test]
    async fn generation_requires_a_configured_endpoint() {
        let err = service().generate("a castle").await.unwrap_err();
        assert!(matches!(err, ImagesError::NotConfigured));
    }

    #[tokio::test]
    async fn download_requires_a_url() {
        let service = service();
        assert!(matches!(
            service.download(None).await.unwrap_err(),
            ImagesError::UrlRequired
        ));
        assert!(matches!(
            service.download(Some("  ")).await.unwrap_err(),
            ImagesError::UrlRequired
        ));
    }

    #[test]
    fn attachment_filename_embeds_the_timestamp() {
        assert_eq!(attachment_filename(1700000000000), "ai-art-1700000000000.png");
    }

    #[test]
    fn generation_payload_uses_camel_case_image_url() {
        let payload: GenerationPayload =
            serde_json::from_str(r#"{"imageUrl": "https://img.example/1.png"}"#).unwrap();
        assert_eq!(payload.image_url, "https://img.example/1.png");
    }
}
