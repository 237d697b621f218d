use axum::{Router, routing::get};

use super::handlers::list_active_memberships;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/active", get(list_active_memberships))
}
