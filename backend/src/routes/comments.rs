//! Comment endpoints: create, list, delete

use std::sync::Arc;

use axum::{Extension, Json};
use serde::Deserialize;
use tracing::instrument;

use super::DeleteResponse;
use crate::store::{Comment, Store};
use crate::types::{AppError, AppJson, AppPath, Caller};

/// Body of a comment submission
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    /// Author identifier
    #[serde(default)]
    pub user_id: String,
    /// Comment body, trimmed before storing
    #[serde(default)]
    pub text: String,
}

/// Prepends a new comment and returns the created record
#[instrument(skip(store, payload))]
pub async fn create_comment(
    Extension(store): Extension<Arc<Store>>,
    AppJson(payload): AppJson<CommentRequest>,
) -> Result<Json<Comment>, AppError> {
    let text = payload.text.trim();
    if text.is_empty() {
        return Err(AppError::bad_request("Comment cannot be empty"));
    }

    let user_id = if payload.user_id.is_empty() {
        "guest".to_string()
    } else {
        payload.user_id
    };

    let comment = store.insert_comment(user_id, text.to_string()).await?;
    Ok(Json(comment))
}

/// Returns all comments, newest first
pub async fn list_comments(Extension(store): Extension<Arc<Store>>) -> Json<Vec<Comment>> {
    Json(store.comments().await)
}

/// Deletes a comment if the caller is its author
#[instrument(skip(store, caller))]
pub async fn delete_comment(
    Extension(store): Extension<Arc<Store>>,
    AppPath(id): AppPath<i64>,
    caller: Caller,
) -> Result<Json<DeleteResponse>, AppError> {
    let comment = store
        .comment(id)
        .await
        .ok_or_else(|| AppError::not_found("Comment not found"))?;

    if comment.user_id != caller.0 {
        return Err(AppError::forbidden("Forbidden: only author can delete"));
    }

    store.remove_comment(id).await?;
    Ok(Json(DeleteResponse {
        message: "Comment deleted",
    }))
}
