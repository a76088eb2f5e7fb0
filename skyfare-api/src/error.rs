use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use skyfare_core::SearchError;

#[derive(Debug)]
pub enum AppError {
    Search(SearchError),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, error_message) = match self {
            AppError::Search(err) => {
                let status = match &err {
                    SearchError::Validation(_) => StatusCode::BAD_REQUEST,
                    SearchError::Network(_) => StatusCode::SERVICE_UNAVAILABLE,
                    SearchError::Server { .. } => StatusCode::BAD_GATEWAY,
                    SearchError::Processing(_) => {
                        tracing::error!("Search processing failed: {}", err);
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, err.kind(), err.message().to_string())
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "kind": kind,
        }));

        (status, body).into_response()
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        Self::Search(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}
