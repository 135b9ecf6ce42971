use std::io;
use std::path::Path;

use async_trait::async_trait;

use super::models::FavoriteCity;

/// Persistence seam for the favorites list. The list is always written
/// back whole, so the medium only has to round-trip an ordered sequence.
#[async_trait]
pub trait FavoritesRepo: Send + Sync {
    async fn load(&self) -> io::Result<Vec<FavoriteCity>>;
    async fn save(&self, favorites: &[FavoriteCity]) -> io::Result<()>;
}

/// JSON-file-backed favorites store
pub struct JsonFileRepo {
    file_path: String,
}

impl JsonFileRepo {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }
}

#[async_trait]
impl FavoritesRepo for JsonFileRepo {
    /// Load the stored list. A missing or unparsable file falls back to an
    /// empty list rather than an error.
    async fn load(&self) -> io::Result<Vec<FavoriteCity>> {
        let path = Path::new(&self.file_path);

        if !path.exists() {
            tracing::debug!("Favorites file does not exist, starting fresh");
            return Ok(Vec::new());
        }

        let content = tokio::fs::read_to_string(path).await?;
        match serde_json::from_str(&content) {
            Ok(favorites) => Ok(favorites),
            Err(err) => {
                tracing::warn!(error = %err, path = %self.file_path, "Favorites file unparsable, starting fresh");
                Ok(Vec::new())
            }
        }
    }

    /// Write the whole list back, creating parent directories as needed.
    /// Writes go through a temp file and rename so a crash mid-write
    /// cannot leave a truncated file.
    async fn save(&self, favorites: &[FavoriteCity]) -> io::Result<()> {
        let content = serde_json::to_string_pretty(favorites)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = Path::new(&self.file_path).parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp_path = format!("{}.tmp", self.file_path);
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &self.file_path).await?;

        tracing::debug!(count = favorites.len(), "Saved favorites");

        Ok(())
    }
}
