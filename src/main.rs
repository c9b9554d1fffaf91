mod config;
mod error;
mod game;
mod models;
mod recognition;
mod routes;
mod verbs;
mod websocket;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use config::Config;
use recognition::{GeminiClient, RecognitionClient};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use verbs::VerbPool;

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    /// Catalog every new connection starts from
    pub verbs: VerbPool,
    pub recognizer: Arc<dyn RecognitionClient>,
}

impl AppState {
    pub fn new(config: Config, verbs: VerbPool, recognizer: Arc<dyn RecognitionClient>) -> Self {
        Self {
            config,
            verbs,
            recognizer,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "verb_bingo_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Verb Bingo backend server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Load verb catalog
    let verbs = match &config.game.verbs_path {
        Some(path) => match VerbPool::load(path).await {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!(
                    "Failed to load verbs from {}: {}. Using the built-in catalog.",
                    path,
                    e
                );
                VerbPool::default_catalog()
            }
        },
        None => VerbPool::default_catalog(),
    };
    tracing::info!("Verb catalog ready with {} verbs", verbs.len());

    if config.recognition.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; handwriting recognition will fail");
    }

    // Create shared HTTP client for reusing connections
    let http_client = reqwest::Client::builder()
        .timeout(config.recognition.timeout())
        .build()
        .context("Failed to build HTTP client")?;
    tracing::info!("HTTP client initialized");

    let recognizer: Arc<dyn RecognitionClient> =
        Arc::new(GeminiClient::new(http_client, config.recognition.clone()));

    // Create application state
    let state = Arc::new(AppState::new(config.clone(), verbs, recognizer));

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Serve frontend static files
    let frontend_service = ServeDir::new(&config.server.frontend_dir);

    // Build router
    let app = Router::new()
        // WebSocket endpoint
        .route("/ws", get(websocket::handle_websocket))
        // API routes
        .merge(routes::create_routes())
        .fallback_service(frontend_service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Game frontend: http://{}/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
