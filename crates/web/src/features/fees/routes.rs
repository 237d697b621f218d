use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{create_fee, delete_fee, list_fees, update_fee};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_fee))
        .route("/:id", put(update_fee))
        .route("/:id", delete(delete_fee))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new().route("/", get(list_fees)).merge(protected)
}
