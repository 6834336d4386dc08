//! Environment configuration for different deployment stages

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion};
use tracing::Level;

/// Application environment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Path of the JSON store file (`STORE_PATH`, defaults to `db.json`)
    #[must_use]
    pub fn store_path() -> PathBuf {
        env::var("STORE_PATH").map_or_else(|_| PathBuf::from("db.json"), PathBuf::from)
    }

    /// Returns the S3 bucket name for uploaded media, if configured
    ///
    /// Production and Staging read `S3_BUCKET_NAME` and return `None` when it
    /// is unset, which disables the upload endpoint rather than crashing the
    /// service. Development falls back to the `LocalStack` bucket.
    #[must_use]
    pub fn media_bucket(&self) -> Option<String> {
        match self {
            Self::Production | Self::Staging => env::var("S3_BUCKET_NAME").ok(),
            Self::Development => Some(
                env::var("S3_BUCKET_NAME").unwrap_or_else(|_| "fanhub-media".to_string()),
            ),
        }
    }

    /// Base URL under which uploaded media is publicly served
    ///
    /// `MEDIA_BASE_URL` overrides the per-environment default.
    #[must_use]
    pub fn media_public_base_url(&self, bucket: &str) -> String {
        env::var("MEDIA_BASE_URL").unwrap_or_else(|_| match self {
            Self::Production | Self::Staging => format!("https://{bucket}.s3.amazonaws.com"),
            Self::Development => format!("http://localhost:4566/{bucket}"),
        })
    }

    /// Browser origins allowed for cross-origin calls
    ///
    /// `ALLOWED_ORIGINS` is a comma-separated list; entries are trimmed and
    /// trailing slashes dropped so `https://a.example/` matches the origin
    /// header the browser actually sends.
    #[must_use]
    pub fn allowed_origins(&self) -> Vec<String> {
        env::var("ALLOWED_ORIGINS").map_or_else(
            |_| match self {
                Self::Production | Self::Staging => Vec::new(),
                Self::Development => vec!["http://localhost:5173".to_string()],
            },
            |raw| {
                raw.split(',')
                    .map(|origin| origin.trim().trim_end_matches('/').to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            },
        )
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            // Regular AWS endpoints for production and staging
            Self::Production | Self::Staging => None,
            // LocalStack endpoint for development
            Self::Development => Some("http://localhost:4566"),
        }
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut config_builder = aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder()
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        config_builder.build()
    }

    /// AWS S3 service configuration
    pub async fn s3_client_config(&self) -> aws_sdk_s3::Config {
        let aws_config = self.aws_config().await;
        let s3_config: aws_sdk_s3::Config = (&aws_config).into();
        let mut builder = s3_config.to_builder();

        // Override "force path style" to true for compatibility with LocalStack
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if matches!(self, Self::Development) {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }

    /// Default log level, overridable via `TRACING_LEVEL`
    #[must_use]
    pub fn tracing_level(&self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production | Self::Staging => Level::INFO,
                Self::Development => Level::DEBUG,
            })
    }
}
