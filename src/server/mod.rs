//! HTTP server for the ComfyUI-Copilot plugin
//!
//! Routes are grouped the way the plugin reaches them:
//!
//! - `/api/...`: standalone layout (chat, workflow generation, templates,
//!   uploads, node metadata, health)
//! - `/workspace/...` and `/nodes/...`: routes the plugin calls when this
//!   service runs inside the ComfyUI host
//!
//! Both groups share one [`AppState`], so a session written through one
//! layout is visible through the other.

use crate::config::Config;
use crate::error::Result;
use crate::reply::StreamEmitter;
use crate::session::{InMemorySessionStore, SessionStore};
use crate::templates::WorkflowCatalog;
use crate::upload::{LocalUploadStore, UploadStore};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod conversation;
pub mod error;
pub mod nodes;

pub use error::{ApiError, ErrorResponse};

/// Room left in the upload request body for multipart boundaries and part
/// headers on top of the file size limit
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    pub emitter: Arc<StreamEmitter>,
    pub catalog: Arc<WorkflowCatalog>,
    pub uploads: Arc<dyn UploadStore>,
    /// Largest accepted uploaded file (bytes)
    pub upload_limit: usize,
    /// Frames buffered per streamed reply
    pub stream_capacity: usize,
}

impl AppState {
    /// Build state from configuration with a fresh in-memory session store
    pub fn from_config(config: &Config) -> Self {
        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        Self::with_sessions(config, sessions)
    }

    /// Build state around an existing session store
    pub fn with_sessions(config: &Config, sessions: Arc<dyn SessionStore>) -> Self {
        let emitter = StreamEmitter::new(Arc::clone(&sessions), config.stream.char_delay());
        let uploads = LocalUploadStore::new(
            config.upload.dir.clone(),
            config.upload.public_base_url.clone(),
            config.upload.max_bytes,
        );

        Self {
            sessions,
            emitter: Arc::new(emitter),
            catalog: Arc::new(WorkflowCatalog::new(config.templates.dir.clone())),
            uploads: Arc::new(uploads),
            upload_limit: config.upload.max_bytes,
            stream_capacity: config.stream.channel_capacity,
        }
    }
}

/// Routes of the standalone layout, mounted under `/api`
pub fn api_routes(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/fetch-messages/:session_id",
            get(conversation::fetch_messages),
        )
        .route("/workflow-gen", post(conversation::workflow_gen))
        .route(
            "/upload",
            post(conversation::upload).layer(DefaultBodyLimit::max(
                upload_limit.saturating_add(MULTIPART_OVERHEAD_BYTES),
            )),
        )
        .route("/chat", post(conversation::chat))
        .route("/templates", get(conversation::templates))
        .nest("/nodes", nodes::node_routes())
}

/// Routes the plugin uses when hosted inside ComfyUI
pub fn plugin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/workspace/fetch_messages_by_id",
            get(conversation::fetch_messages_by_query),
        )
        .route("/workspace/workflow_gen", post(conversation::workflow_gen))
        .route("/nodes/fetch_repos", get(nodes::node_repos))
        .route("/nodes/git-info/:node_type", get(nodes::git_info))
        .route("/nodes/builtin-types", get(nodes::builtin_types))
}

/// Build the full router
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes(state.upload_limit))
        .merge(plugin_routes())
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "ComfyUI-Copilot API is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}

/// Run the server until Ctrl+C or SIGTERM
///
/// # Errors
///
/// Returns error if the bind address is invalid or the listener fails
pub async fn serve(config: &Config) -> Result<()> {
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid host:port combination: {}", e))?;

    let state = AppState::from_config(config);
    tracing::info!(
        templates_dir = %config.templates.dir.display(),
        upload_dir = %config.upload.dir.display(),
        char_delay_ms = config.stream.char_delay_ms,
        "Starting ComfyUI-Copilot server"
    );

    let app = router(state).layer(TraceLayer::new_for_http());
    let app = if config.server.cors_permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };

    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        },
    }
}
