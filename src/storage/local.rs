use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

use super::{ImageStore, ImageUpload, StorageError};

/// Stores images in a local directory served under a public base URL.
pub struct LocalImageStore {
    dir: PathBuf,
    public_url: String,
}

impl LocalImageStore {
    pub fn new(dir: impl Into<PathBuf>, public_url: &str) -> Self {
        Self {
            dir: dir.into(),
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }

    fn object_name(extension: &str) -> String {
        format!(
            "image_{}_{}.{}",
            chrono::Utc::now().timestamp_millis(),
            uuid::Uuid::now_v7().simple(),
            extension
        )
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn put(&self, upload: &ImageUpload) -> Result<String, StorageError> {
        if !upload.is_image() {
            return Err(StorageError::NotAnImage(
                upload.content_type.clone().unwrap_or_default(),
            ));
        }
        let extension = upload
            .extension()
            .ok_or_else(|| StorageError::NotAnImage(upload.content_type.clone().unwrap_or_default()))?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let name = Self::object_name(&extension);
        tokio::fs::write(self.dir.join(&name), &upload.data).await?;

        info!("Stored image {} ({} bytes)", name, upload.data.len());
        Ok(format!("{}/{}", self.public_url, name))
    }
}
