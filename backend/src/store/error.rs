//! Error types for store operations

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// No image with the given id
    ///
    /// The display string is the client-facing message; the id is kept for
    /// diagnostics.
    #[error("Image not found")]
    ImageNotFound(i64),

    /// No comment with the given id
    #[error("Comment not found")]
    CommentNotFound(i64),

    /// Reading or writing the store file failed
    #[error("Store file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the document failed
    #[error("Store document encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether this error is a lookup miss rather than a persistence failure
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ImageNotFound(_) | Self::CommentNotFound(_))
    }
}
