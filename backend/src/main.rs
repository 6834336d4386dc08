use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use fanhub_backend::{media_storage::MediaStorage, server, store::Store, types::Environment};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();

    // Configure logging format based on environment
    // Use JSON format for staging/production, regular format for development
    let env_filter = || {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(environment.tracing_level().to_string()))
    };
    match environment {
        Environment::Production | Environment::Staging => {
            fmt().json().with_env_filter(env_filter()).init();
        }
        Environment::Development => {
            fmt().with_env_filter(env_filter()).init();
        }
    }

    let store = Arc::new(Store::open(Environment::store_path()).await?);

    let media_storage = match environment.media_bucket() {
        Some(bucket) => {
            let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
            let public_base_url = environment.media_public_base_url(&bucket);
            Some(Arc::new(MediaStorage::new(
                s3_client,
                bucket,
                public_base_url,
            )))
        }
        None => {
            tracing::warn!("S3_BUCKET_NAME is not set, image uploads are disabled");
            None
        }
    };

    server::start(environment, store, media_storage).await
}
