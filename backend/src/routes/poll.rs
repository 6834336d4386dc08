//! Match poll endpoints: vote and read
//!
//! No per-voter record is kept; repeat voting is a client-side concern.

use std::sync::Arc;

use axum::{Extension, Json};
use tracing::instrument;

use crate::store::{PollChoice, PollTally, Store};
use crate::types::{AppError, AppPath};

/// Adds one vote for the choice in the path and returns the updated counters
#[instrument(skip(store))]
pub async fn vote(
    Extension(store): Extension<Arc<Store>>,
    AppPath(choice): AppPath<PollChoice>,
) -> Result<Json<PollTally>, AppError> {
    let tally = store.vote(choice).await?;
    Ok(Json(tally))
}

/// Returns the current poll counters
pub async fn read(Extension(store): Extension<Arc<Store>>) -> Json<PollTally> {
    Json(store.tally().await)
}
