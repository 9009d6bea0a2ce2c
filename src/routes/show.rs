//! Episode, guest and appearance routes.

use crate::handlers::{create_appearance, get_episode, index, list_episodes, list_guests};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn show_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/episodes", get(list_episodes))
        .route("/episodes/:id", get(get_episode))
        .route("/guests", get(list_guests))
        .route("/appearances", post(create_appearance))
        .with_state(state)
}
