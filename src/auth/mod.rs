use crate::state::AppState;
use axum::Router;

mod dto;
pub(crate) mod extractors;
pub mod handlers;
mod jwt;
pub mod password;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
