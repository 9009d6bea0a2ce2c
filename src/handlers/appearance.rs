//! Appearance creation.
//!
//! Checks run in a fixed order so the reported error is deterministic:
//! unknown episode or guest (404), then rating (422), then the write itself (500).

use crate::error::AppError;
use crate::model::NewAppearance;
use crate::response::created;
use crate::service::{RequestValidator, ShowService};
use crate::state::AppState;
use crate::views::AppearanceCreated;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

pub async fn create_appearance(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let body = RequestValidator::object(&body)?;

    let episode = match RequestValidator::id(body, "episode_id") {
        Some(id) => ShowService::find_episode(&state.pool, id).await?,
        None => None,
    };
    let guest = match RequestValidator::id(body, "guest_id") {
        Some(id) => ShowService::find_guest(&state.pool, id).await?,
        None => None,
    };
    let (Some(episode), Some(guest)) = (episode, guest) else {
        return Err(AppError::ReferenceNotFound);
    };

    let rating = RequestValidator::rating(body)?;

    let new = NewAppearance::new(rating, &episode, &guest);
    let appearance = ShowService::create_appearance(&state.pool, &new).await?;
    tracing::info!(
        appearance_id = appearance.id,
        episode_id = episode.id,
        guest_id = guest.id,
        rating = appearance.rating,
        "appearance created"
    );
    Ok(created(AppearanceCreated::new(&appearance, &episode, &guest)))
}
