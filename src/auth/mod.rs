use crate::state::AppState;
use axum::Router;

mod dto;
pub mod extractors;
mod handlers;
pub mod jwt;
pub(crate) mod services;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
