mod models;
mod handlers;
mod routes;
mod docs;
mod config;
mod auth;
mod services;
mod classroom;
mod relay;
mod websocket;
mod utils;

use std::sync::Arc;
use routes::create_app;
use config::Config;
use relay::BroadcastRelay;
use tracing::{info, error, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use std::panic;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<BroadcastRelay>,
    pub config: Arc<Config>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {

    // Set panic hook for better error messages
    panic::set_hook(Box::new(|info| {
        eprintln!("PANIC: {info}");
    }));

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Default to info level, but allow debug for our app
            "codecast=debug,tower_http=debug,axum::rejection=trace,info".into()
        }))
        .init();

    info!("Starting server...");

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        warn!("Using default configuration");
        Config::default()
    });

    if config.auth_jwt_secret.is_none() {
        warn!("No AUTH_JWT_SECRET configured - every authenticated route will answer 500");
    }
    if config.is_development() {
        info!("Running in development mode (log level {})", config.log_level);
    }

    let state = AppState {
        relay: Arc::new(BroadcastRelay::new(config.teacher_channel_capacity)),
        config: Arc::new(config.clone()),
    };

    let app_routes = create_app(state);

    let listener = match bind_listener(&config.server_address()).await {
        Ok(listener) => listener,
        Err(e) => panic!("Failed to bind to {}: {}", config.server_address(), e),
    };

    info!("🚀 {} running on http://{}", config.service_name, config.server_address());
    info!("📡 Student channel at ws://{}/ws", config.server_address());
    info!("📡 Teacher channel at ws://{}/ws/teach", config.server_address());
    info!("📚 Swagger UI available at http://{}/swagger", config.server_address());

    if let Err(e) = axum::serve(listener, app_routes).await {
        error!("Server stopped: {}", e);
        panic!("Server failed: {}", e);
    }
}

async fn bind_listener(addr: &str) -> std::io::Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind(addr).await.inspect_err(|e| {
        error!("Failed to bind to {}: {}", addr, e);
    })
}
