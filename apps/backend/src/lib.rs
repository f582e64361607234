pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use review_core::{Clock, Sm2, SpacedRepetitionAlgorithm, SystemClock};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub scheduler: Arc<dyn SpacedRepetitionAlgorithm>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// State with the default SM-2 scheduler and the wall clock
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(db),
            scheduler: Arc::new(Sm2::default()),
            clock: Arc::new(SystemClock),
        }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // Learn routes
        .route(
            "/api/learn",
            get(routes::learn::session).post(routes::learn::review),
        )
        // Deck routes
        .route("/api/decks", get(routes::decks::list))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url, config.max_connections).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let state = AppState::new(db);
    tracing::info!("Scheduling reviews with {}", state.scheduler.name());

    let app = build_router(state);

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
