use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use membership::{Athlete, dto::athlete::AthleteForm};
use validator::Validate;

use crate::{error::WebError, state::AppState};

use super::services;

#[utoipa::path(
    get,
    path = "/api/athletes",
    responses(
        (status = 200, description = "List all athletes successfully", body = Vec<Athlete>),
        (status = 502, description = "Club API unavailable")
    ),
    tag = "athletes"
)]
pub async fn list_athletes(State(state): State<AppState>) -> Result<Response, WebError> {
    let athletes = services::list_athletes(state.api.as_ref()).await?;

    Ok(Json(athletes).into_response())
}

#[utoipa::path(
    get,
    path = "/api/athletes/{id}",
    params(
        ("id" = i64, Path, description = "Athlete id")
    ),
    responses(
        (status = 200, description = "Athlete found", body = Athlete),
        (status = 404, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn get_athlete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let athlete = services::get_athlete(state.api.as_ref(), id).await?;

    Ok(Json(athlete).into_response())
}

#[utoipa::path(
    post,
    path = "/api/athletes",
    request_body = AthleteForm,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Athlete created successfully", body = Athlete),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "athletes"
)]
pub async fn create_athlete(
    State(state): State<AppState>,
    Json(form): Json<AthleteForm>,
) -> Result<Response, WebError> {
    form.validate()?;

    let athlete = services::create_athlete(state.api.as_ref(), &form).await?;

    Ok((StatusCode::CREATED, Json(athlete)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/athletes/{id}",
    params(
        ("id" = i64, Path, description = "Athlete id")
    ),
    request_body = AthleteForm,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Athlete updated successfully", body = Athlete),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn update_athlete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(form): Json<AthleteForm>,
) -> Result<Response, WebError> {
    form.validate()?;

    let updated = services::update_athlete(state.api.as_ref(), id, &form).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/athletes/{id}",
    params(
        ("id" = i64, Path, description = "Athlete id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Athlete deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "athletes"
)]
pub async fn delete_athlete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    services::delete_athlete(state.api.as_ref(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
