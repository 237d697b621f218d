use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use membership::{ActiveMembership, models::calendar::parse_instant};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{error::WebError, state::AppState};

use super::services;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActiveMembershipsQuery {
    /// Evaluate at this date (`YYYY-MM-DD`) or local datetime instead of now
    pub at: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/memberships/active",
    params(ActiveMembershipsQuery),
    responses(
        (status = 200, description = "Memberships started in the last 30 days, soonest to expire first", body = Vec<ActiveMembership>),
        (status = 400, description = "Invalid `at` parameter"),
        (status = 502, description = "Club API unavailable")
    ),
    tag = "memberships"
)]
pub async fn list_active_memberships(
    State(state): State<AppState>,
    Query(query): Query<ActiveMembershipsQuery>,
) -> Result<Response, WebError> {
    let now = match query.at.as_deref() {
        Some(raw) => parse_instant(raw).map_err(|e| WebError::BadRequest(e.to_string()))?,
        None => chrono::Local::now().naive_local(),
    };

    let active = services::active_memberships(state.api.as_ref(), now).await?;

    Ok(Json(active).into_response())
}
