use crate::response::{ok, MessageBody};
use axum::response::IntoResponse;

pub const WELCOME: &str = "Welcome to the lateshow.";

pub async fn index() -> impl IntoResponse {
    ok(MessageBody { message: WELCOME })
}
