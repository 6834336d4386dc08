//! Gallery endpoints: upload, list, react, delete

use std::sync::Arc;

use axum::{
    extract::{multipart::Field, Multipart},
    Extension, Json,
};
use serde::Deserialize;
use tracing::instrument;

use super::DeleteResponse;
use crate::media_storage::MediaStorage;
use crate::store::{Image, NewImage, ReactionKind, Store};
use crate::types::{AppError, AppJson, AppPath, Caller};

/// Bucket folder grouping all gallery uploads
const GALLERY_FOLDER: &str = "fan-gallery";

/// Body of a reaction request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactRequest {
    /// Voter identifier
    #[serde(default = "default_user")]
    pub user_id: String,
    /// Reaction to record for this voter
    #[serde(rename = "type")]
    pub kind: ReactionKind,
}

fn default_user() -> String {
    "guest".to_string()
}

/// Accepts a multipart form with an `image` file plus optional `caption`
/// and `userId` fields, relays the bytes to media storage, and prepends the
/// resulting record to the gallery.
#[instrument(skip_all)]
pub async fn upload_image(
    Extension(media_storage): Extension<Option<Arc<MediaStorage>>>,
    Extension(store): Extension<Arc<Store>>,
    mut multipart: Multipart,
) -> Result<Json<Image>, AppError> {
    let mut file: Option<(Vec<u8>, String)> = None;
    let mut caption = String::new();
    let mut user_id = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::bad_request(format!("Malformed multipart request: {err}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let content_type = field
                    .content_type()
                    .map_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string(), str::to_string);
                let bytes = field.bytes().await.map_err(|err| {
                    AppError::bad_request(format!("Failed to read uploaded file: {err}"))
                })?;
                file = Some((bytes.to_vec(), content_type));
            }
            "caption" => caption = text_field(field).await?,
            "userId" => user_id = text_field(field).await?,
            _ => {}
        }
    }

    let Some((bytes, content_type)) = file else {
        return Err(AppError::bad_request(
            "No file uploaded. Make sure form field name is 'image'.",
        ));
    };

    let Some(media_storage) = media_storage else {
        return Err(AppError::internal(
            "Server misconfigured: missing media storage credentials.",
        ));
    };

    let stored = media_storage
        .store(GALLERY_FOLDER, bytes, &content_type)
        .await?;
    let storage_key = stored.key.clone();

    let image = store
        .insert_image(NewImage {
            url: stored.url,
            storage_key: stored.key,
            caption,
            user_id: if user_id.is_empty() {
                "guest".to_string()
            } else {
                user_id
            },
        })
        .await
        .map_err(|err| {
            // The object exists remotely but the record was never written
            tracing::error!(%storage_key, "Image uploaded but not recorded: {err}");
            AppError::internal("Image uploaded but could not be saved. Try again.")
        })?;

    tracing::info!(id = image.id, url = %image.url, "Upload success");
    Ok(Json(image))
}

async fn text_field(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|err| AppError::bad_request(format!("Malformed multipart request: {err}")))
}

/// Returns all gallery images, newest first
pub async fn list_images(Extension(store): Extension<Arc<Store>>) -> Json<Vec<Image>> {
    Json(store.images().await)
}

/// Records the caller's reaction on an image and returns the updated record
#[instrument(skip(store, payload))]
pub async fn react_to_image(
    Extension(store): Extension<Arc<Store>>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<ReactRequest>,
) -> Result<Json<Image>, AppError> {
    let image = store.react(id, &payload.user_id, payload.kind).await?;
    Ok(Json(image))
}

/// Deletes an image if the caller is its uploader
///
/// The remote object is removed best effort before the record: a failed
/// remote delete is logged for reconciliation and does not block removal.
#[instrument(skip(store, media_storage, caller))]
pub async fn delete_image(
    Extension(store): Extension<Arc<Store>>,
    Extension(media_storage): Extension<Option<Arc<MediaStorage>>>,
    AppPath(id): AppPath<i64>,
    caller: Caller,
) -> Result<Json<DeleteResponse>, AppError> {
    let image = store
        .image(id)
        .await
        .ok_or_else(|| AppError::not_found("Image not found"))?;

    if image.user_id != caller.0 {
        return Err(AppError::forbidden("Forbidden: only uploader can delete"));
    }

    if let Some(media_storage) = media_storage {
        if let Err(err) = media_storage.remove(&image.storage_key).await {
            tracing::warn!(
                target: "media_reconcile",
                storage_key = %image.storage_key,
                "Remote delete failed, object left behind: {err}"
            );
        }
    }

    store.remove_image(id).await?;
    Ok(Json(DeleteResponse {
        message: "Image deleted",
    }))
}
