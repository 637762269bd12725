//! Uploads
//!
//! - **`multipart`** - reading `multipart/form-data` bodies into [`FormData`]
//! - **`storage`** - the [`ObjectStorage`] seam and the local-disk
//!   implementation served under `/uploads`

use thiserror::Error;

pub mod multipart;
pub mod storage;

pub use multipart::FormData;
pub use storage::{DiskStorage, ObjectStorage, UploadedFile};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Only image files are allowed")]
    NotAnImage,

    #[error("File too large (max {max} bytes)")]
    TooLarge { max: usize },

    #[error("Failed to store file: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    /// Rejections caused by the uploaded file itself
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
