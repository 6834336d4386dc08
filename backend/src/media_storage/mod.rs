//! S3-based image storage operations
mod error;

use std::sync::Arc;

use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};
use uuid::Uuid;

pub use error::{MediaError, MediaResult};

/// Location of a stored object
#[derive(Debug, Clone)]
pub struct StoredMedia {
    /// Public URL the object is served under
    pub url: String,
    /// Bucket key for later deletion
    pub key: String,
}

/// Image storage client for S3 operations
pub struct MediaStorage {
    s3_client: Arc<S3Client>,
    bucket_name: String,
    public_base_url: String,
}

impl MediaStorage {
    /// Creates a new media storage client
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - S3 bucket name for image storage
    /// * `public_base_url` - Base URL under which stored objects are served
    #[must_use]
    pub const fn new(
        s3_client: Arc<S3Client>,
        bucket_name: String,
        public_base_url: String,
    ) -> Self {
        Self {
            s3_client,
            bucket_name,
            public_base_url,
        }
    }

    /// Uploads image bytes under a fresh random key inside `folder`
    ///
    /// # Returns
    ///
    /// The public URL and bucket key of the stored object
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Upstream` for 5xx responses from the object
    /// store, `MediaError::Upload` for any other failure
    pub async fn store(
        &self,
        folder: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> MediaResult<StoredMedia> {
        let key = format!("{folder}/{}", Uuid::new_v4().simple());

        self.s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await?;

        let url = format!("{}/{key}", self.public_base_url.trim_end_matches('/'));
        Ok(StoredMedia { url, key })
    }

    /// Deletes a stored object by key
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Upstream` for 5xx responses from the object
    /// store, `MediaError::Delete` for any other failure
    pub async fn remove(&self, key: &str) -> MediaResult<()> {
        self.s3_client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await?;

        Ok(())
    }
}
