use axum::{
    Json,
    extract::Query,
    response::{IntoResponse, Response},
};
use membership::{dto::menu::MenuEntry, models::accessible_menu};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MenuQuery {
    /// First role code of the signed-in user; omitted when nobody is signed in
    pub role: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/api/menu",
    params(MenuQuery),
    responses(
        (status = 200, description = "Dashboard sections visible to the role", body = Vec<MenuEntry>)
    ),
    tag = "menu"
)]
pub async fn get_menu(Query(query): Query<MenuQuery>) -> Response {
    let entries: Vec<MenuEntry> = accessible_menu(query.role.as_slice())
        .into_iter()
        .map(MenuEntry::from)
        .collect();

    Json(entries).into_response()
}
