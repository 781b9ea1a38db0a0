//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors go through each crate's own error type.

mod pages;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use auth::application::config::DEFAULT_ROLE_ID;
use auth::{AuthConfig, PgAuthRepository, SESSION_SWEEP_INTERVAL, SessionSweeper, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use items::{PgItemRepository, items_router};
use settings::{ConfigCache, PgConfigSource, keys};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,items=info,settings=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Required environment
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let secret_key = env::var("SECRET_KEY").context("SECRET_KEY must be set")?;
    if secret_key.is_empty() {
        anyhow::bail!("SECRET_KEY must not be empty");
    }

    let cookie_secure = match env::var("COOKIE_SECURE") {
        Ok(value) => value
            .parse::<bool>()
            .with_context(|| format!("COOKIE_SECURE must be true or false, got {value:?}"))?,
        Err(_) => false,
    };

    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .context("BIND_ADDR must be a socket address")?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Expired session cleanup: once now, then periodically
    // Errors here should not prevent server startup
    let auth_repo = PgAuthRepository::new(pool.clone());
    let sweeper = SessionSweeper::new(Arc::new(auth_repo.clone()), SESSION_SWEEP_INTERVAL);
    if let Err(e) = sweeper.sweep_at(chrono::Utc::now().timestamp_millis()).await {
        tracing::warn!(error = %e, "Auth session cleanup failed, continuing anyway");
    }
    sweeper.spawn();

    // Configuration cache: loaded once, before serving
    let settings = Arc::new(
        ConfigCache::load(PgConfigSource::new(pool.clone()))
            .await
            .context("Failed to load configuration table")?,
    );

    let default_role_id = settings
        .get_parsed::<i32>(keys::DEFAULT_ROLE_ID)
        .await?
        .unwrap_or(DEFAULT_ROLE_ID);

    // Auth configuration
    let auth_config = AuthConfig::new(secret_key.into_bytes())
        .with_cookie_secure(cookie_secure)
        .with_default_role_id(default_role_id);

    tracing::info!(
        default_role_id,
        cookie_secure,
        session_ttl_secs = auth_config.session_ttl.as_secs(),
        "Auth configured"
    );

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:8080,http://127.0.0.1:8080".to_string());

    let allowed_origins = parse_origins(&frontend_origins)?;

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .merge(pages::pages_router(
            settings,
            Arc::new(auth_repo.clone()),
            Arc::new(auth_config.clone()),
        ))
        .nest("/auth", auth_router(auth_repo, auth_config))
        .nest("/api/items", items_router(PgItemRepository::new(pool)))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", bind_addr);

    let listener = TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Comma-separated origin list; one malformed entry rejects the whole list
fn parse_origins(list: &str) -> anyhow::Result<Vec<http::HeaderValue>> {
    list.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            origin
                .parse::<http::HeaderValue>()
                .with_context(|| format!("FRONTEND_ORIGINS entry is not a valid origin: {origin:?}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_origins;

    #[test]
    fn origins_are_trimmed_and_blanks_skipped() {
        let origins = parse_origins(" http://localhost:8080 ,, http://127.0.0.1:8080").unwrap();
        assert_eq!(origins, ["http://localhost:8080", "http://127.0.0.1:8080"]);
    }

    #[test]
    fn malformed_origin_fails_startup() {
        let err = parse_origins("http://localhost:8080,http://bad\nhost").unwrap_err();
        assert!(err.to_string().contains("FRONTEND_ORIGINS"));
    }
}
