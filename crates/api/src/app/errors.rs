use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use agendum_core::DomainError;
use agendum_infra::service::ServiceError;

/// Map a service outcome to the boundary's error shape.
///
/// "Not found" (404) stays distinct from "found but not permitted" (401);
/// rule rejections and bad input are 400s. Infrastructure failures stay 500
/// and never leak details beyond the message.
pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::Store(msg) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg),
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let status = match err {
        DomainError::NotFound => StatusCode::NOT_FOUND,
        DomainError::NotOwner => StatusCode::UNAUTHORIZED,
        DomainError::Validation(_)
        | DomainError::InvalidId(_)
        | DomainError::DuplicateTime
        | DomainError::PastTime
        | DomainError::AlreadyOccurred => StatusCode::BAD_REQUEST,
    };
    json_error(status, err.code(), err.to_string())
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
