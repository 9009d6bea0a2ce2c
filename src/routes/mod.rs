//! Router assembly.

mod ops;
mod show;
pub use ops::ops_routes;
pub use show::show_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Largest accepted request body.
pub const BODY_LIMIT: usize = 64 * 1024;

/// Full application: API routes, operational routes, body limit and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(show_routes(state.clone()))
        .merge(ops_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
}
