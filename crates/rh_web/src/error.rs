use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rh_core::Error;
use serde_json::json;

/// Maps core errors onto the generic bodies the API exposes.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::InvalidSection(_) => (StatusCode::BAD_REQUEST, "Invalid section"),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
            Error::UpstreamFetch(_) | Error::UpstreamParse(_) => {
                tracing::error!("Error fetching articles: {}", self.0);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch articles")
            }
            Error::InvalidCredentials | Error::Config(_) => {
                tracing::error!("Unexpected error: {}", self.0);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
