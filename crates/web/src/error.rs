use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use club_client::ClientError;
use serde_json::{Value, json};
use std::fmt;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Upstream(ClientError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upstream(e) => write!(f, "Upstream error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

fn validation_body(errors: &ValidationErrors) -> Value {
    let field_errors: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                format!(
                    "{}: {}",
                    field,
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                )
            })
        })
        .collect();

    json!({
        "error": "Validation failed",
        "details": field_errors
    })
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status_code, body) = match &self {
            Self::Upstream(e) if e.is_not_found() => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "Resource not found"
                }),
            ),
            Self::Upstream(ClientError::ValidationError(errors)) | Self::Validation(errors) => {
                (StatusCode::BAD_REQUEST, validation_body(errors))
            }
            Self::Upstream(ClientError::StatusError { status, body }) if status.is_client_error() => {
                // the backend's own field errors are worth passing on
                let details = serde_json::from_str::<Value>(body)
                    .unwrap_or_else(|_| Value::String(body.clone()));
                (
                    *status,
                    json!({
                        "error": "Club API rejected the request",
                        "details": details
                    }),
                )
            }
            Self::Upstream(e) => {
                tracing::error!("Upstream error: {:?}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "error": "Club API unavailable"
                    }),
                )
            }
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": msg
                }),
            ),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "error": "Unauthorized"
                }),
            ),
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<ClientError> for WebError {
    fn from(error: ClientError) -> Self {
        Self::Upstream(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(error: WebError) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn test_upstream_status_mapping() {
        let not_found = ClientError::StatusError {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        };
        let rejected = ClientError::StatusError {
            status: StatusCode::BAD_REQUEST,
            body: r#"{"starting_date": ["This field is required."]}"#.to_string(),
        };
        let down = ClientError::StatusError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };

        assert_eq!(status_of(not_found.into()), StatusCode::NOT_FOUND);
        assert_eq!(status_of(rejected.into()), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(down.into()), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_local_errors() {
        assert_eq!(
            status_of(WebError::BadRequest("nope".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(WebError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(ClientError::ConfigError("bad".to_string()).into()),
            StatusCode::BAD_GATEWAY
        );
    }
}
