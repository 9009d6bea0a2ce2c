//! Typed errors and HTTP mapping.

use crate::response::{ErrorBody, ErrorsBody};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

pub const EPISODE_NOT_FOUND: &str = "Episode not found.";
pub const REFERENCE_NOT_FOUND: &str = "Episode or guest not found.";
pub const RATING_OUT_OF_RANGE: &str = "Rating must be between 1 and 5.";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("seed load: {0}")]
    Seed(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{}", EPISODE_NOT_FOUND)]
    EpisodeNotFound,
    #[error("{}", REFERENCE_NOT_FOUND)]
    ReferenceNotFound,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Db(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Config(_) | AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::EpisodeNotFound | AppError::ReferenceNotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        // The single-episode lookup answers with `error`; everything else uses an `errors` list.
        match self {
            AppError::EpisodeNotFound => (
                status,
                Json(ErrorBody {
                    error: EPISODE_NOT_FOUND.to_string(),
                }),
            )
                .into_response(),
            other => (
                status,
                Json(ErrorsBody {
                    errors: vec![other.to_string()],
                }),
            )
                .into_response(),
        }
    }
}
