//! API server: ensures the database and table exist, then mounts common and
//! scale routes behind tracing and a request body limit.

use axum::Router;
use scales_api::{
    common_routes_with_ready, ensure_database_exists, ensure_scales_table, scale_routes, AppState,
};
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("scales_api=info".parse()?))
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/scales".into());
    ensure_database_exists(&database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(25)
        .connect(&database_url)
        .await?;

    ensure_scales_table(&pool).await?;

    let state = AppState::new(pool);

    let app = Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest("/v1", scale_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(1024 * 1024));

    let addr = std::env::var("ADDR").unwrap_or_else(|_| "0.0.0.0:4000".into());
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
