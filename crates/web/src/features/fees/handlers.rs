use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use membership::{
    Fee,
    dto::fee::{FeeForm, FeeWithAthlete},
};
use validator::Validate;

use crate::{error::WebError, state::AppState};

use super::services;

#[utoipa::path(
    get,
    path = "/api/fees",
    responses(
        (status = 200, description = "List all fees with athlete names", body = Vec<FeeWithAthlete>),
        (status = 502, description = "Club API unavailable")
    ),
    tag = "fees"
)]
pub async fn list_fees(State(state): State<AppState>) -> Result<Response, WebError> {
    let fees = services::list_fees(state.api.as_ref()).await?;

    Ok(Json(fees).into_response())
}

#[utoipa::path(
    post,
    path = "/api/fees",
    request_body = FeeForm,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Fee created successfully", body = Fee),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "fees"
)]
pub async fn create_fee(
    State(state): State<AppState>,
    Json(form): Json<FeeForm>,
) -> Result<Response, WebError> {
    form.validate()?;

    let fee = services::create_fee(state.api.as_ref(), &form).await?;

    Ok((StatusCode::CREATED, Json(fee)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/fees/{id}",
    params(
        ("id" = i64, Path, description = "Fee id")
    ),
    request_body = FeeForm,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Fee updated successfully", body = Fee),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Fee not found")
    ),
    tag = "fees"
)]
pub async fn update_fee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(form): Json<FeeForm>,
) -> Result<Response, WebError> {
    form.validate()?;

    let fee = services::update_fee(state.api.as_ref(), id, &form).await?;

    Ok(Json(fee).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/fees/{id}",
    params(
        ("id" = i64, Path, description = "Fee id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Fee deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Fee not found")
    ),
    tag = "fees"
)]
pub async fn delete_fee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    services::delete_fee(state.api.as_ref(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
