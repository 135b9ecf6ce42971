use axum::http::StatusCode;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;

use super::models::FavoriteCity;
use super::storage::FavoritesRepo;
use crate::error::HttpError;
use crate::impl_into_response;

#[derive(Error, Debug)]
pub enum FavoritesError {
    #[error("City name must not be empty")]
    EmptyName,

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl HttpError for FavoritesError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyName => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::EmptyName => Some("EMPTY_NAME"),
            Self::Storage(_) => Some("STORAGE_ERROR"),
        }
    }
}

impl_into_response!(FavoritesError);

/// Write-through favorites list. Every mutation persists the whole list;
/// the in-memory copy is the single source of truth while running.
pub struct FavoritesService {
    repo: Box<dyn FavoritesRepo>,
    favorites: RwLock<Vec<FavoriteCity>>,
}

impl FavoritesService {
    pub fn new(repo: Box<dyn FavoritesRepo>) -> Self {
        Self {
            repo,
            favorites: RwLock::new(Vec::new()),
        }
    }

    /// Load the persisted list into memory
    pub async fn init(&self) -> Result<(), FavoritesError> {
        let stored = self.repo.load().await?;
        let mut favorites = self.favorites.write().await;
        *favorites = stored;
        tracing::info!(count = favorites.len(), "Favorites loaded");
        Ok(())
    }

    /// Stored favorites, in insertion order
    pub async fn list(&self) -> Vec<FavoriteCity> {
        self.favorites.read().await.clone()
    }

    /// Whether the (name, country) pair is currently a favorite
    pub async fn contains(&self, name: &str, country: &str) -> bool {
        self.favorites
            .read()
            .await
            .iter()
            .any(|f| f.matches(name, country))
    }

    /// Add the pair if absent, remove it if present. Returns the new list
    /// and whether the pair is now favorited.
    pub async fn toggle(
        &self,
        name: &str,
        country: &str,
    ) -> Result<(Vec<FavoriteCity>, bool), FavoritesError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FavoritesError::EmptyName);
        }

        let mut favorites = self.favorites.write().await;

        let favorited = if favorites.iter().any(|f| f.matches(name, country)) {
            favorites.retain(|f| !f.matches(name, country));
            false
        } else {
            favorites.push(FavoriteCity {
                name: name.to_string(),
                country: country.to_string(),
                added_at: Utc::now().timestamp_millis(),
            });
            true
        };

        self.repo.save(&favorites).await?;

        tracing::info!(name = %name, country = %country, favorited, "Favorite toggled");

        Ok((favorites.clone(), favorited))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// In-memory repo for exercising the service without files
    struct MemoryRepo;

    #[async_trait]
    impl FavoritesRepo for MemoryRepo {
        async fn load(&self) -> std::io::Result<Vec<FavoriteCity>> {
            Ok(Vec::new())
        }

        async fn save(&self, _favorites: &[FavoriteCity]) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn service() -> FavoritesService {
        FavoritesService::new(Box::new(MemoryRepo))
    }

    #[tokio::test]
    async fn toggle_adds_then_removes() {
        let service = service();

        let (list, favorited) = service.toggle("London", "GB").await.unwrap();
        assert!(favorited);
        assert_eq!(list.len(), 1);
        assert!(service.contains("London", "GB").await);

        let (list, favorited) = service.toggle("London", "GB").await.unwrap();
        assert!(!favorited);
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn toggle_is_case_insensitive_on_name() {
        let service = service();

        service.toggle("London", "GB").await.unwrap();
        let (list, favorited) = service.toggle("LONDON", "GB").await.unwrap();
        assert!(!favorited);
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn double_toggle_preserves_other_entries_and_order() {
        let service = service();

        service.toggle("Paris", "FR").await.unwrap();
        service.toggle("London", "GB").await.unwrap();
        service.toggle("Tokyo", "JP").await.unwrap();
        let before = service.list().await;

        service.toggle("Lisbon", "PT").await.unwrap();
        service.toggle("lisbon", "PT").await.unwrap();

        let after = service.list().await;
        assert_eq!(before, after);
        assert_eq!(after[0].name, "Paris");
        assert_eq!(after[1].name, "London");
        assert_eq!(after[2].name, "Tokyo");
    }

    #[tokio::test]
    async fn same_name_different_country_are_distinct() {
        let service = service();

        service.toggle("London", "GB").await.unwrap();
        let (list, favorited) = service.toggle("London", "CA").await.unwrap();
        assert!(favorited);
        assert_eq!(list.len(), 2);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let service = service();
        let err = service.toggle("   ", "GB").await.unwrap_err();
        assert!(matches!(err, FavoritesError::EmptyName));
    }
}
