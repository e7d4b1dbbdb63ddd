use axum::{Extension, Json, http::StatusCode, response::IntoResponse};

use crate::context::CurrentUser;

pub async fn health() -> axum::response::Response {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"}))).into_response()
}

pub async fn whoami(Extension(user): Extension<CurrentUser>) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({"user_id": user.user_id().to_string()})),
    )
        .into_response()
}
