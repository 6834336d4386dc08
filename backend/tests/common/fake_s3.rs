//! In-process stand-in for the S3 API
//!
//! Speaks just enough of the path-style REST protocol (PUT, DELETE) for the
//! AWS SDK client to run against it, and records objects in memory so tests
//! can assert what actually landed in the bucket. Failure flags let tests
//! simulate upstream 5xx responses.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    routing::put,
    Router,
};

#[derive(Clone, Default)]
pub struct FakeS3 {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_uploads: Arc<AtomicBool>,
    fail_deletes: Arc<AtomicBool>,
}

impl FakeS3 {
    /// Starts the fake on an ephemeral port and returns its address
    pub async fn spawn() -> (Self, SocketAddr) {
        let fake = Self::default();

        let router = Router::new()
            .route("/{bucket}/{*key}", put(put_object).delete(delete_object))
            // S3 itself accepts objects far larger than axum's default body cap
            .layer(DefaultBodyLimit::disable())
            .with_state(fake.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake S3 listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Fake S3 server failed");
        });

        (fake, addr)
    }

    /// Returns the stored bytes for `key` in `bucket`, if present
    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .expect("objects lock")
            .get(&format!("{bucket}/{key}"))
            .cloned()
    }

    /// Number of objects across all buckets
    pub fn object_count(&self) -> usize {
        self.objects.lock().expect("objects lock").len()
    }

    /// Make subsequent PUTs fail with a 500
    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent DELETEs fail with a 500
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }
}

async fn put_object(
    State(fake): State<FakeS3>,
    Path((bucket, key)): Path<(String, String)>,
    body: Bytes,
) -> StatusCode {
    if fake.fail_uploads.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    fake.objects
        .lock()
        .expect("objects lock")
        .insert(format!("{bucket}/{key}"), body.to_vec());
    StatusCode::OK
}

async fn delete_object(
    State(fake): State<FakeS3>,
    Path((bucket, key)): Path<(String, String)>,
) -> StatusCode {
    if fake.fail_deletes.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    fake.objects
        .lock()
        .expect("objects lock")
        .remove(&format!("{bucket}/{key}"));
    StatusCode::NO_CONTENT
}
