//! Bump Baby Dashboard Backend
//!
//! A small REST backend for a family pregnancy dashboard, persisting
//! every collection as a flat JSON file on disk.

mod api;
mod auth;
mod config;
mod errors;
mod images;
mod models;
mod sanitize;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use store::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Bump Baby Dashboard Backend");
    tracing::info!("Data directory: {:?}", config.data_dir);
    tracing::info!("Uploads directory: {:?}", config.uploads_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if the admin PIN is not configured
    if config.admin_pin.is_none() {
        tracing::warn!("No admin PIN configured (BUMP_ADMIN_PIN). Admin routes are open!");
    }

    // Create the data and uploads directories
    store::init_store(&config).await?;
    let repo = Arc::new(Repository::new(config.data_dir.clone()));

    // Create application state
    let state = AppState {
        repo,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Names
        .route("/names", get(api::list_names))
        .route("/names", post(api::create_name))
        .route("/names/{id}", delete(api::delete_name))
        .route("/vote", post(api::vote))
        // Wishlist
        .route("/wishlist", get(api::list_wishlist))
        .route("/wishlist", post(api::create_wishlist_item))
        .route("/wishlist/reserve", post(api::reserve_wishlist_item))
        .route("/wishlist/{id}", delete(api::delete_wishlist_item))
        // Bets
        .route("/bets", get(api::list_bets))
        .route("/bets", post(api::create_bet))
        .route("/bets/{id}", delete(api::delete_bet))
        // Offers
        .route("/offers", get(api::list_offers))
        .route("/offers", post(api::create_offer))
        .route("/offers/{id}", delete(api::delete_offer))
        // Meta
        .route("/verify-pin", get(api::verify_pin))
        .route("/config", get(api::get_config));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .nest_service("/uploads", ServeDir::new(&state.config.uploads_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
