use std::sync::Arc;

use aws_credential_types::Credentials;
use aws_sdk_s3::{
    config::{BehaviorVersion, Region},
    Client as S3Client, Config,
};
use axum::{body::Body, http::Request, response::Response, Extension, Router};
use fanhub_backend::{media_storage::MediaStorage, routes, store::Store};
use tempfile::TempDir;
use tower::ServiceExt;

use super::fake_s3::FakeS3;
use super::utils::BOUNDARY;

/// Bucket name used by every test
pub const TEST_BUCKET: &str = "fanhub-media-test";

/// Initialize tracing for tests
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Base test setup with the router wired against a fake S3 endpoint
#[allow(dead_code)]
pub struct TestSetup {
    pub router: Router,
    pub fake_s3: FakeS3,
    pub store: Arc<Store>,
    // Keep the store directory alive for the duration of the test
    _store_dir: TempDir,
}

impl TestSetup {
    pub async fn new() -> Self {
        Self::build(true).await
    }

    /// Setup without media storage, as when credentials are missing
    pub async fn without_media() -> Self {
        Self::build(false).await
    }

    async fn build(with_media: bool) -> Self {
        setup_test_env();

        let store_dir = tempfile::tempdir().expect("Failed to create store dir");
        let store = Arc::new(
            Store::open(store_dir.path().join("db.json"))
                .await
                .expect("Failed to open store"),
        );

        let (fake_s3, addr) = FakeS3::spawn().await;

        let media_storage = if with_media {
            let config = Config::builder()
                .behavior_version(BehaviorVersion::latest())
                .region(Region::new("us-east-1"))
                .credentials_provider(Credentials::from_keys("test", "test", None))
                .endpoint_url(format!("http://{addr}"))
                .force_path_style(true)
                .build();
            let s3_client = Arc::new(S3Client::from_conf(config));

            Some(Arc::new(MediaStorage::new(
                s3_client,
                TEST_BUCKET.to_string(),
                format!("http://{addr}/{TEST_BUCKET}"),
            )))
        } else {
            None
        };

        let router = routes::handler()
            .layer(Extension(store.clone()))
            .layer(Extension(media_storage));

        Self {
            router,
            fake_s3,
            store,
            _store_dir: store_dir,
        }
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_post_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string()))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    /// POST with an empty body, as a browser form button would send
    pub async fn send_post_request_without_body(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .body(Body::empty())?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_upload_request(
        &self,
        body: Vec<u8>,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri("/upload")
            .method("POST")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    /// DELETE with the caller identity in the JSON body
    pub async fn send_delete_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("DELETE")
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string()))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    /// DELETE with the caller identity in the `X-User-Id` header
    pub async fn send_delete_request_with_header(
        &self,
        route: &str,
        user_id: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("DELETE")
            .header("X-User-Id", user_id)
            .body(Body::empty())?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    /// DELETE with no identity at all
    pub async fn send_delete_request_without_identity(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("DELETE")
            .body(Body::empty())?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}
