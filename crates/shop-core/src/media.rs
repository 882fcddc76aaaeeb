//! Local filesystem image store.
//!
//! Uploaded images are written to a media directory which the web server
//! serves under `/media`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::model::ImageUpload;
use crate::error::{ShopError, ShopResult};
use crate::store::ImageStore;

/// Stores images as `{uuid}.{ext}` files in a directory.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    dir: PathBuf,
    base_url: String,
}

impl LocalImageStore {
    /// `base_url` is prefixed to stored file names, e.g. `/media`.
    pub fn new(dir: impl Into<PathBuf>, base_url: &str) -> Self {
        Self {
            dir: dir.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, upload: ImageUpload) -> ShopResult<String> {
        if upload.bytes.is_empty() {
            return Err(ShopError::validation("Product image is required"));
        }

        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = format!("{}.{}", Uuid::new_v4(), upload.extension());
        let path = self.dir.join(&file_name);
        tokio::fs::write(&path, &upload.bytes).await?;

        debug!(path = %path.display(), size = upload.bytes.len(), "Stored image");
        Ok(format!("{}/{}", self.base_url, file_name))
    }
}
