// Image storage - isolates filesystem side effects behind a trait
pub mod local;

pub use local::LocalImageStore;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not an image: {0}")]
    NotAnImage(String),
}

/// An uploaded image as received from the client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl ImageUpload {
    /// File extension to store the image under, taken from the original name
    /// when it names an image type and from the declared content type otherwise.
    pub fn extension(&self) -> Option<String> {
        let from_name = self
            .file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| {
                mime_guess::from_ext(ext)
                    .first()
                    .is_some_and(|mime| mime.type_() == mime_guess::mime::IMAGE)
            });
        from_name.or_else(|| {
            let content_type = self.content_type.as_deref()?;
            let extensions = mime_guess::get_mime_extensions_str(content_type)?;
            extensions.first().map(|ext| ext.to_string())
        })
    }

    /// Whether the declared content type (or, lacking one, the file name) is an image.
    pub fn is_image(&self) -> bool {
        match self.content_type.as_deref() {
            Some(content_type) => content_type.starts_with("image/"),
            None => self
                .file_name
                .as_deref()
                .and_then(|name| mime_guess::from_path(name).first())
                .is_some_and(|mime| mime.type_() == mime_guess::mime::IMAGE),
        }
    }
}

/// Persists uploaded images and hands back the public URL to store in the database.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn put(&self, upload: &ImageUpload) -> Result<String, StorageError>;
}
