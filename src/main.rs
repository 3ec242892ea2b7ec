use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use voicerelay_backend::config::Config;
use voicerelay_backend::retention;
use voicerelay_backend::routes;
use voicerelay_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("voicerelay_backend=debug,tower_http=debug")),
        )
        .init();

    // Load configuration - try multiple paths
    let config_paths: Vec<String> = vec![
        std::env::var("CONFIG_PATH").ok(),
        Some("conf.yaml".to_string()),
        Some("config/conf.yaml".to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut config = None;
    for path in &config_paths {
        match Config::load(path) {
            Ok(cfg) => {
                info!("Loaded configuration from: {}", path);
                config = Some(cfg);
                break;
            }
            Err(e) => {
                tracing::debug!("Failed to load config from {}: {}", path, e);
            }
        }
    }

    let config = config.unwrap_or_else(|| {
        info!("No config file found, using built-in defaults");
        Config::default()
    });

    // Initialize app state (creates the audio directory)
    let app_state = AppState::new(config)?;

    if app_state.config.retention.enabled {
        retention::spawn_output_sweep(
            app_state.audio_store.clone(),
            app_state.config.retention.clone(),
        );
        info!(
            max_age_secs = app_state.config.retention.max_age_secs,
            "Output retention sweep enabled"
        );
    }

    let cors = match &app_state.config.server.cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    };

    // Build application
    let app = Router::new()
        .merge(routes::create_routes(app_state.clone()))
        .layer(DefaultBodyLimit::max(app_state.config.server.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state.clone());

    // Start server
    let addr: SocketAddr = format!(
        "{}:{}",
        app_state.config.server.host, app_state.config.server.port
    )
    .parse()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
