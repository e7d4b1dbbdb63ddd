//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: infrastructure wiring (store, clock, job queue, worker)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use sqlx::PgPool;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router against the in-memory store (dev/tests).
pub async fn build_app(jwt_secret: String) -> Router {
    let services = Arc::new(services::build_services());
    router_for(jwt_secret, services)
}

/// Build the full HTTP router against Postgres.
pub async fn build_app_with_postgres(
    jwt_secret: String,
    pool: PgPool,
) -> anyhow::Result<Router> {
    let services = Arc::new(services::build_postgres_services(pool).await?);
    Ok(router_for(jwt_secret, services))
}

fn router_for(jwt_secret: String, services: Arc<services::AppServices>) -> Router {
    let jwt = Arc::new(agendum_auth::Hs256JwtValidator::new(jwt_secret.into_bytes()));
    let auth_state = middleware::AuthState { jwt };

    // Protected routes: require a valid bearer token.
    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
}
