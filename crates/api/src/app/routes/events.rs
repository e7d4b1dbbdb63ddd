use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use agendum_core::EventId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/", post(store).get(index))
        .route("/:id", get(show).put(update).patch(update).delete(destroy))
        .route("/:id/share", post(share))
}

pub async fn index(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<dto::PageQuery>,
) -> axum::response::Response {
    let page = query.page.unwrap_or(1);
    match services.events.list(user.user_id(), page).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn store(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<dto::EventRequest>,
) -> axum::response::Response {
    let draft = match body.into_draft() {
        Ok(d) => d,
        Err(response) => return response,
    };

    match services.events.create(user.user_id(), draft).await {
        Ok(event) => (StatusCode::CREATED, Json(event)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn show(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let event_id = match parse_id(&id) {
        Ok(v) => v,
        Err(response) => return response,
    };

    match services.events.show(event_id, user.user_id()).await {
        Ok(event) => (StatusCode::OK, Json(event)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<dto::EventRequest>,
) -> axum::response::Response {
    let event_id = match parse_id(&id) {
        Ok(v) => v,
        Err(response) => return response,
    };
    let draft = match body.into_draft() {
        Ok(d) => d,
        Err(response) => return response,
    };

    match services.events.update(event_id, user.user_id(), draft).await {
        Ok(event) => (StatusCode::OK, Json(event)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn destroy(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let event_id = match parse_id(&id) {
        Ok(v) => v,
        Err(response) => return response,
    };

    match services.events.delete(event_id, user.user_id()).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn share(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<dto::ShareEventRequest>,
) -> axum::response::Response {
    let event_id = match parse_id(&id) {
        Ok(v) => v,
        Err(response) => return response,
    };
    if let Err(response) = dto::validate_email(&body.email) {
        return response;
    }

    match services
        .events
        .share(event_id, user.user_id(), body.email)
        .await
    {
        Ok(event) => (StatusCode::OK, Json(event)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

fn parse_id(id: &str) -> Result<EventId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid event id")
    })
}
