use crate::error::AppError;
use crate::response::ok;
use crate::service::ShowService;
use crate::state::AppState;
use crate::views::GuestView;
use axum::{extract::State, response::IntoResponse};

pub async fn list_guests(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let guests = ShowService::list_guests(&state.pool).await?;
    Ok(ok(guests.iter().map(GuestView::from).collect::<Vec<_>>()))
}
