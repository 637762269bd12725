/**
 * Object Storage
 *
 * Uploaded images are handed to an `ObjectStorage`, which persists the bytes
 * and returns the public URL and storage id recorded on the project.
 *
 * `DiskStorage` writes to the configured upload directory; the router serves
 * that directory under `/uploads`. File names are
 * `staging-<millis>-<random><ext>` so concurrent uploads never collide and
 * client-supplied names never reach the filesystem.
 */

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use axum::body::Bytes;
use rand::Rng;

use crate::backend::upload::UploadError;
use crate::staging::StoredImage;

/// A file field read from a multipart request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Form field the file arrived in
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Validate and persist an image
    async fn store(&self, file: UploadedFile) -> Result<StoredImage, UploadError>;
}

#[derive(Debug, Clone)]
pub struct DiskStorage {
    root: PathBuf,
    public_base_url: Option<String>,
    max_bytes: usize,
}

impl DiskStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: Option<String>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            public_base_url,
            max_bytes,
        }
    }

    fn public_url(&self, name: &str) -> String {
        format!("{}/uploads/{}", self.public_base_url.as_deref().unwrap_or(""), name)
    }
}

/// Keep a short alphanumeric extension from the client's file name
fn extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

fn storage_name(file_name: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!(
        "staging-{}-{}{}",
        chrono::Utc::now().timestamp_millis(),
        suffix,
        extension(file_name)
    )
}

#[async_trait]
impl ObjectStorage for DiskStorage {
    async fn store(&self, file: UploadedFile) -> Result<StoredImage, UploadError> {
        if !file.content_type.starts_with("image/") {
            return Err(UploadError::NotAnImage);
        }
        if file.bytes.len() > self.max_bytes {
            return Err(UploadError::TooLarge { max: self.max_bytes });
        }

        let name = storage_name(&file.file_name);
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(&name), &file.bytes).await?;
        tracing::debug!(field = %file.field, stored_as = %name, size = file.bytes.len(), "upload stored");

        Ok(StoredImage {
            url: self.public_url(&name),
            storage_id: name,
            original_name: file.file_name,
            mime_type: file.content_type,
            size: file.bytes.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str, len: usize) -> UploadedFile {
        UploadedFile {
            field: "image".into(),
            file_name: name.into(),
            content_type: "image/png".into(),
            bytes: Bytes::from(vec![7u8; len]),
        }
    }

    #[test]
    fn test_extension_is_sanitized() {
        assert_eq!(extension("Room.PNG"), ".png");
        assert_eq!(extension("no-extension"), "");
        assert_eq!(extension("evil.p/h"), "");
        assert_eq!(extension("x.verylongextension"), "");
    }

    #[tokio::test]
    async fn test_store_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DiskStorage::new(dir.path(), Some("https://cdn.example.com".into()), 1024);

        let stored = storage.store(png("room.png", 16)).await.unwrap();

        assert!(stored.storage_id.starts_with("staging-"));
        assert!(stored.storage_id.ends_with(".png"));
        assert_eq!(stored.url, format!("https://cdn.example.com/uploads/{}", stored.storage_id));
        assert_eq!(stored.original_name, "room.png");
        assert_eq!(stored.size, 16);
        let written = tokio::fs::read(dir.path().join(&stored.storage_id)).await.unwrap();
        assert_eq!(written.len(), 16);
    }

    #[tokio::test]
    async fn test_rejects_non_images_and_oversize() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DiskStorage::new(dir.path(), None, 8);

        let mut text = png("notes.txt", 4);
        text.content_type = "text/plain".into();
        assert!(matches!(storage.store(text).await, Err(UploadError::NotAnImage)));
        assert!(matches!(
            storage.store(png("big.png", 9)).await,
            Err(UploadError::TooLarge { max: 8 })
        ));
    }
}
