mod comments;
mod gallery;
mod poll;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use serde::Serialize;

/// Cap on the upload request body, 15 MiB
const MAX_UPLOAD_BYTES: usize = 15_728_640;

/// Confirmation body for delete endpoints
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Human-readable confirmation
    pub message: &'static str,
}

/// Creates the router with all handler routes
#[must_use]
pub fn handler() -> Router {
    Router::new()
        .route(
            "/upload",
            post(gallery::upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/images", get(gallery::list_images))
        .route("/react/{id}", post(gallery::react_to_image))
        .route("/image/{id}", delete(gallery::delete_image))
        .route("/comment", post(comments::create_comment))
        .route("/comments", get(comments::list_comments))
        .route("/comment/{id}", delete(comments::delete_comment))
        .route("/poll/{choice}", post(poll::vote))
        .route("/poll", get(poll::read))
}
