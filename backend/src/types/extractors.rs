//! Custom extractors for request handling

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Request,
    },
    http::request::Parts,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};

use crate::types::error::AppError;

/// JSON extractor that rejects with the API error envelope
///
/// Deserializes into closed types, so an out-of-range value (say an unknown
/// reaction kind) fails here with a 400 instead of reaching a handler.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|err| match err {
                JsonRejection::MissingJsonContentType(_) => {
                    AppError::bad_request("Missing Content-Type: application/json header")
                }
                _ => AppError::bad_request("Invalid JSON payload"),
            })?;

        Ok(Self(payload))
    }
}

/// Path extractor that rejects with the API error envelope
///
/// A non-numeric id or an unknown poll choice in the path yields a 400
/// rather than axum's plain-text rejection.
pub struct AppPath<T>(pub T);

impl<T, S> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|err| match err {
                PathRejection::FailedToDeserializePathParams(_) => {
                    AppError::bad_request("Invalid path parameter")
                }
                _ => AppError::internal("Path extraction failed"),
            })?;

        Ok(Self(value))
    }
}

/// Caller identity asserted by the client on delete endpoints
///
/// Resolution order: `userId` in an optional JSON body, then the `X-User-Id`
/// header, then `"unknown"`. Empty strings count as absent. A JSON body that
/// fails to decode rejects with a 400 rather than falling back to the header.
/// This is a bare client-supplied string, not a verified session.
pub struct Caller(pub String);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallerBody {
    #[serde(default)]
    user_id: Option<String>,
}

impl<S> FromRequest<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Capture the header before the body consumes the request
        let header = req
            .headers()
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .filter(|value| !value.is_empty());

        let body = match Json::<CallerBody>::from_request(req, state).await {
            Ok(Json(body)) => body.user_id.filter(|value| !value.is_empty()),
            // No JSON body at all; the header may still identify the caller
            Err(JsonRejection::MissingJsonContentType(_)) => None,
            // A JSON body that does not decode is a client error, not an
            // anonymous caller
            Err(_) => return Err(AppError::bad_request("Invalid JSON payload")),
        };

        Ok(Self(body.or(header).unwrap_or_else(|| "unknown".to_string())))
    }
}
