//! JSON document store
//!
//! Owns the aggregate [`Document`] and its on-disk JSON mirror. All
//! mutations run behind one async mutex and rewrite the file before the
//! lock is released, so concurrent requests serialize instead of clobbering
//! each other's writes. The rewrite goes through a sibling temp file and an
//! atomic rename; a crash mid-write leaves the previous document intact.

mod document;
mod error;

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub use document::{Comment, Document, Image, PollChoice, PollTally, ReactionKind};
pub use error::{StoreError, StoreResult};

/// Input for creating a gallery image record
///
/// URL and key come back from the media storage once the object is uploaded;
/// caption and uploader id come from the request.
#[derive(Debug, Clone)]
pub struct NewImage {
    /// Public URL of the uploaded object
    pub url: String,
    /// Object-storage key for later deletion
    pub storage_key: String,
    /// Caller-supplied caption, may be empty
    pub caption: String,
    /// Identifier of the uploader
    pub user_id: String,
}

/// Document store backed by a single JSON file
pub struct Store {
    path: PathBuf,
    document: Mutex<Document>,
}

impl Store {
    /// Opens the store at `path`, loading the existing document
    ///
    /// Falls back to the default empty document on a missing or unreadable
    /// file and immediately persists it, so the file exists from the first
    /// request on. Reaction counters are recomputed from the reaction maps
    /// while loading. Must complete before the server accepts requests.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the fallback document cannot be written,
    /// or `StoreError::Encode` if it cannot be serialized.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let loaded = match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Document>(&bytes) {
                Ok(document) => Some(document),
                Err(err) => {
                    warn!(path = %path.display(), %err, "Store document unreadable, starting fresh");
                    None
                }
            },
            Err(err) => {
                warn!(path = %path.display(), %err, "No store document found, starting fresh");
                None
            }
        };

        let document = match loaded {
            Some(mut document) => {
                for image in &mut document.images {
                    image.recount();
                }
                info!(
                    path = %path.display(),
                    images = document.images.len(),
                    comments = document.comments.len(),
                    "Store document loaded"
                );
                document
            }
            None => {
                let document = Document::default();
                Self::persist(&path, &document).await?;
                document
            }
        };

        Ok(Self {
            path,
            document: Mutex::new(document),
        })
    }

    /// Gallery images, newest first
    pub async fn images(&self) -> Vec<Image> {
        self.read(|document| document.images.clone()).await
    }

    /// Looks up one image by id
    pub async fn image(&self, id: i64) -> Option<Image> {
        self.read(|document| document.images.iter().find(|image| image.id == id).cloned())
            .await
    }

    /// Fan comments, newest first
    pub async fn comments(&self) -> Vec<Comment> {
        self.read(|document| document.comments.clone()).await
    }

    /// Looks up one comment by id
    pub async fn comment(&self, id: i64) -> Option<Comment> {
        self.read(|document| {
            document
                .comments
                .iter()
                .find(|comment| comment.id == id)
                .cloned()
        })
        .await
    }

    /// Current poll counters
    pub async fn tally(&self) -> PollTally {
        self.read(|document| document.polls).await
    }

    /// Prepends a new gallery image and persists the document
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io`/`StoreError::Encode` if the rewrite fails;
    /// the in-memory insert is not rolled back (the next successful write
    /// flushes it).
    pub async fn insert_image(&self, new: NewImage) -> StoreResult<Image> {
        self.mutate(|document| {
            let now = Utc::now();
            let image = Image {
                id: next_id(
                    document.images.first().map(|image| image.id),
                    now.timestamp_millis(),
                ),
                url: new.url,
                storage_key: new.storage_key,
                caption: new.caption,
                reactions: std::collections::BTreeMap::new(),
                likes: 0,
                loves: 0,
                user_id: new.user_id,
                created_at: now,
            };
            document.images.insert(0, image.clone());
            Ok(image)
        })
        .await
    }

    /// Records `voter`'s reaction on an image, replacing any prior one
    ///
    /// The counters are recomputed from the map in the same critical
    /// section, so a voter contributes exactly one reaction no matter how
    /// often or with which kinds they react.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ImageNotFound` for an unknown id, or a
    /// persistence error if the rewrite fails.
    pub async fn react(&self, id: i64, voter: &str, kind: ReactionKind) -> StoreResult<Image> {
        self.mutate(|document| {
            let image = document
                .images
                .iter_mut()
                .find(|image| image.id == id)
                .ok_or(StoreError::ImageNotFound(id))?;
            image.reactions.insert(voter.to_string(), kind);
            image.recount();
            Ok(image.clone())
        })
        .await
    }

    /// Removes an image record, returning it for remote cleanup
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ImageNotFound` for an unknown id, or a
    /// persistence error if the rewrite fails.
    pub async fn remove_image(&self, id: i64) -> StoreResult<Image> {
        self.mutate(|document| {
            let index = document
                .images
                .iter()
                .position(|image| image.id == id)
                .ok_or(StoreError::ImageNotFound(id))?;
            Ok(document.images.remove(index))
        })
        .await
    }

    /// Prepends a new comment and persists the document
    ///
    /// Callers pass the body already trimmed and verified non-empty.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the rewrite fails.
    pub async fn insert_comment(&self, user_id: String, text: String) -> StoreResult<Comment> {
        self.mutate(|document| {
            let comment = Comment {
                id: next_id(
                    document.comments.first().map(|comment| comment.id),
                    Utc::now().timestamp_millis(),
                ),
                user_id,
                text,
                created_at: Utc::now(),
            };
            document.comments.insert(0, comment.clone());
            Ok(comment)
        })
        .await
    }

    /// Removes a comment record
    ///
    /// # Errors
    ///
    /// Returns `StoreError::CommentNotFound` for an unknown id, or a
    /// persistence error if the rewrite fails.
    pub async fn remove_comment(&self, id: i64) -> StoreResult<Comment> {
        self.mutate(|document| {
            let index = document
                .comments
                .iter()
                .position(|comment| comment.id == id)
                .ok_or(StoreError::CommentNotFound(id))?;
            Ok(document.comments.remove(index))
        })
        .await
    }

    /// Adds one poll vote and returns the updated counters
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the rewrite fails.
    pub async fn vote(&self, choice: PollChoice) -> StoreResult<PollTally> {
        self.mutate(|document| {
            document.polls.record(choice);
            Ok(document.polls)
        })
        .await
    }

    async fn read<T>(&self, f: impl FnOnce(&Document) -> T) -> T {
        let document = self.document.lock().await;
        f(&document)
    }

    /// Applies `f` under the lock and persists on success
    ///
    /// An `Err` from `f` skips the rewrite; mutating closures therefore
    /// validate before they touch the document.
    async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Document) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut document = self.document.lock().await;
        let value = f(&mut document)?;
        Self::persist(&self.path, &document).await?;
        Ok(value)
    }

    /// Serializes the document and atomically replaces the store file
    async fn persist(path: &Path, document: &Document) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(document)?;
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, path).await?;
        Ok(())
    }
}

/// Allocates a creation-time-derived identifier
///
/// `Date.now()`-style millisecond ids, bumped past the newest existing id so
/// two inserts within the same millisecond still produce strictly
/// increasing, unique values.
const fn next_id(newest: Option<i64>, now_ms: i64) -> i64 {
    match newest {
        Some(last) if now_ms <= last => last + 1,
        _ => now_ms,
    }
}
