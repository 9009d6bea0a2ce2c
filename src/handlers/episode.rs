//! Episode list and detail.

use crate::error::AppError;
use crate::response::ok;
use crate::service::ShowService;
use crate::state::AppState;
use crate::views::{EpisodeDetail, EpisodeView};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub async fn list_episodes(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let episodes = ShowService::list_episodes(&state.pool).await?;
    Ok(ok(episodes.iter().map(EpisodeView::from).collect::<Vec<_>>()))
}

/// Only a plain run of digits names an episode (no sign, no spaces); anything else is a 404 like an unknown id.
pub async fn get_episode(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if id_str.is_empty() || !id_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::EpisodeNotFound);
    }
    let id: i64 = id_str.parse().map_err(|_| AppError::EpisodeNotFound)?;
    let (episode, appearances) = ShowService::episode_detail(&state.pool, id)
        .await?
        .ok_or(AppError::EpisodeNotFound)?;
    Ok(ok(EpisodeDetail::new(&episode, &appearances)))
}
