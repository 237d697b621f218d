use std::time::Duration;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ApiDoc;
use crate::features::{athletes, fees, memberships, menu};
use crate::middleware::auth::ApiKeys;
use crate::state::AppState;

pub fn build_router(state: AppState, api_keys: ApiKeys) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let api = Router::new()
        .nest("/athletes", athletes::routes::routes(api_keys.clone()))
        .nest("/fees", fees::routes::routes(api_keys))
        .nest("/memberships", memberships::routes::routes())
        .nest("/menu", menu::routes::routes());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use club_client::memory::InMemoryClub;
    use membership::{Athlete, Fee};
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    use super::*;

    const KEY: &str = "test-key";

    fn athlete(id: i64, name: &str) -> Athlete {
        Athlete {
            id,
            name: name.to_string(),
            last_name: "Hosseini".to_string(),
            father_name: None,
            current_location: None,
            permanent_location: None,
            date_of_birth: None,
            picture: Some(format!("http://cdn.local/{}.jpg", id)),
            nic: None,
            document: None,
        }
    }

    fn fee(id: i64, athlete: i64, starting_date: &str) -> Fee {
        Fee {
            id,
            athlete: Some(athlete),
            starting_date: Some(starting_date.to_string()),
            fee: Decimal::from(2000),
            taken: Decimal::from(1500),
            remainder: Decimal::from(500),
        }
    }

    fn club() -> Arc<InMemoryClub> {
        Arc::new(InMemoryClub::new(
            vec![athlete(1, "Zahra"), athlete(2, "Reza")],
            vec![
                fee(10, 1, "2024-05-25"),
                fee(11, 2, "2024-05-10"),
                fee(12, 7, "2024-05-20"),
                fee(13, 1, "2024-03-01"),
                fee(14, 2, "garbage"),
            ],
        ))
    }

    fn app(club: Arc<InMemoryClub>) -> Router {
        build_router(AppState::new(club), ApiKeys::from_comma_separated(KEY))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, key: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(key) = key {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", key));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_active_memberships_sorted_by_remaining_days() {
        let (status, body) = send(app(club()), get("/api/memberships/active?at=2024-06-01")).await;

        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![11, 12, 10]);

        assert_eq!(rows[0]["remaining_days"], 8);
        assert_eq!(rows[0]["athlete"]["name"], "Reza");
        assert_eq!(rows[1]["athlete"], Value::Null);
        assert_eq!(rows[1]["athlete_id"], 7);
        assert_eq!(rows[2]["expires_on"], "2024-06-24");
    }

    #[tokio::test]
    async fn test_active_memberships_rejects_bad_instant() {
        let (status, body) = send(app(club()), get("/api/memberships/active?at=tomorrow")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("tomorrow"));
    }

    #[tokio::test]
    async fn test_active_memberships_upstream_failure() {
        let club = Arc::new(InMemoryClub::new(vec![athlete(1, "Zahra")], vec![]).with_failing_fees());

        let (status, _) = send(app(club), get("/api/memberships/active")).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_fee_listing_includes_athlete_names() {
        let (status, body) = send(app(club()), get("/api/fees")).await;

        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0]["id"], 10);
        assert_eq!(rows[0]["athlete_name"], "Zahra Hosseini");
        assert_eq!(rows[2]["athlete_name"], Value::Null);
    }

    #[tokio::test]
    async fn test_create_fee_requires_api_key() {
        let club = club();
        let payload = json!({"athlete": 1, "fee": "900", "taken": "400", "starting_date": "2024-06-02"});

        let (status, _) = send(
            app(club.clone()),
            json_request("POST", "/api/fees", None, payload.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            app(club.clone()),
            json_request("POST", "/api/fees", Some("wrong"), payload),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(club.fees().len(), 5);
    }

    #[tokio::test]
    async fn test_create_fee_computes_remainder() {
        let club = club();
        let payload = json!({"athlete": 1, "fee": "900", "taken": "400", "starting_date": "2024-06-02"});

        let (status, body) = send(
            app(club.clone()),
            json_request("POST", "/api/fees", Some(KEY), payload),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["athlete"], 1);
        let stored = club.fees().pop().unwrap();
        assert_eq!(stored.remainder, Decimal::from(500));
        assert_eq!(stored.starting_date.as_deref(), Some("2024-06-02"));
    }

    #[tokio::test]
    async fn test_create_fee_validation_error() {
        let payload = json!({"athlete": 1, "fee": "-5", "starting_date": "2024-06-02"});

        let (status, body) = send(
            app(club()),
            json_request("POST", "/api/fees", Some(KEY), payload),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
    }

    #[tokio::test]
    async fn test_update_and_delete_fee() {
        let club = club();
        let payload = json!({"athlete": 2, "fee": "1000", "taken": "1000", "starting_date": "2024-05-30"});

        let (status, body) = send(
            app(club.clone()),
            json_request("PUT", "/api/fees/10", Some(KEY), payload),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["athlete"], 2);

        let (status, _) = send(
            app(club.clone()),
            json_request("DELETE", "/api/fees/10", Some(KEY), Value::Null),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(club.fees().iter().all(|f| f.id != 10));
    }

    #[tokio::test]
    async fn test_athlete_crud() {
        let club = club();

        let (status, body) = send(app(club.clone()), get("/api/athletes/2")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Reza");

        let (status, _) = send(app(club.clone()), get("/api/athletes/99")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            app(club.clone()),
            json_request(
                "POST",
                "/api/athletes",
                Some(KEY),
                json!({"name": "Mahsa", "last_name": "Noori", "date_of_birth": "2003-01-15"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["date_of_birth"], "2003-01-15");

        let (status, _) = send(
            app(club.clone()),
            json_request("POST", "/api/athletes", Some(KEY), json!({"name": "", "last_name": "Noori"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let update = json!({"name": "Reza", "last_name": "Karimi", "current_location": "Herat"});
        let (status, _) = send(
            app(club.clone()),
            json_request("PUT", "/api/athletes/2", None, update.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(
            app(club.clone()),
            json_request("PUT", "/api/athletes/2", Some(KEY), update),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["last_name"], "Karimi");
        assert_eq!(body["current_location"], "Herat");

        let (_, body) = send(app(club.clone()), get("/api/athletes/2")).await;
        assert_eq!(body["last_name"], "Karimi");

        let (status, _) = send(
            app(club.clone()),
            json_request("DELETE", "/api/athletes/1", Some(KEY), Value::Null),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(app(club.clone()), get("/api/athletes")).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Reza", "Mahsa"]);
    }

    #[tokio::test]
    async fn test_menu_by_role() {
        let (status, body) = send(app(club()), get("/api/menu?role=3")).await;
        assert_eq!(status, StatusCode::OK);
        let values: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["value"].as_str().unwrap())
            .collect();
        assert_eq!(values, vec!["home", "signout"]);

        let (_, body) = send(app(club()), get("/api/menu?role=0")).await;
        assert_eq!(body.as_array().unwrap().len(), 6);

        let (_, body) = send(app(club()), get("/api/menu")).await;
        assert_eq!(body, json!([{"value": "signout", "label": "Sign out"}]));
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(club()), get("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
