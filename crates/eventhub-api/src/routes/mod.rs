//! Route modules and the assembled application router.

use axum::Router;

use crate::state::AppState;

pub mod booking;
pub mod health;

/// Builds the full application router over `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/booking", booking::router())
        .with_state(state)
}
