use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shopfront_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let message = err.to_string();
    if !err.is_client_error() {
        tracing::error!(error = %message, "request failed");
    }

    match err {
        DomainError::NotFound => {
            json_error(StatusCode::NOT_FOUND, "not_found", "the item is not currently available")
        }
        DomainError::InvalidId(_) => json_error(StatusCode::BAD_REQUEST, "invalid_id", message),
        DomainError::InvalidRequest(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_request", message)
        }
        DomainError::InsufficientStock { .. } => {
            json_error(StatusCode::BAD_REQUEST, "insufficient_stock", message)
        }
        DomainError::SourceLoad(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "source_load_failed", message)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
