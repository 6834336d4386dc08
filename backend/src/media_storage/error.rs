//! Error types for media storage operations

use aws_sdk_s3::{
    error::SdkError,
    operation::{delete_object::DeleteObjectError, put_object::PutObjectError},
};
use thiserror::Error;

/// Result type for media storage operations
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur during media storage operations
#[derive(Error, Debug)]
pub enum MediaError {
    /// Object upload failed
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Object deletion failed
    #[error("Delete failed: {0}")]
    Delete(String),

    /// Upstream service error (5xx from the object store)
    #[error("Upstream service error: {0}")]
    Upstream(String),
}

impl From<SdkError<PutObjectError>> for MediaError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        match &error {
            SdkError::ServiceError(service_err) if service_err.raw().status().as_u16() >= 500 => {
                Self::Upstream(format!("{service_err:?}"))
            }
            _ => Self::Upload(error.to_string()),
        }
    }
}

impl From<SdkError<DeleteObjectError>> for MediaError {
    fn from(error: SdkError<DeleteObjectError>) -> Self {
        match &error {
            SdkError::ServiceError(service_err) if service_err.raw().status().as_u16() >= 500 => {
                Self::Upstream(format!("{service_err:?}"))
            }
            _ => Self::Delete(error.to_string()),
        }
    }
}
