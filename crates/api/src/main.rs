#[tokio::main]
async fn main() -> anyhow::Result<()> {
    agendum_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });

    let app = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = sqlx::PgPool::connect(&url).await?;
            agendum_api::app::build_app_with_postgres(jwt_secret, pool).await?
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; events are stored in memory only");
            agendum_api::app::build_app(jwt_secret).await
        }
    };

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
