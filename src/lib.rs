//! comfy-copilot - backend service for the ComfyUI-Copilot plugin
//!
//! This library provides the request handling behind the plugin's chat
//! panel: session history, streamed canned replies, node metadata lookup,
//! workflow templates and uploads.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: per-session message history shared by all handlers
//! - `reply`: keyword-driven reply selection and frame-by-frame streaming
//! - `nodes`: builtin node registry and repository descriptors
//! - `chat`: non-streaming chat replies
//! - `templates`: workflow template catalog
//! - `upload`: upload storage seam
//! - `server`: axum router and handlers
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use comfy_copilot::{cli::Cli, server, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Cli::default())?;
//!     config.validate()?;
//!     server::serve(&config).await
//! }
//! ```

pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod nodes;
pub mod reply;
pub mod server;
pub mod session;
pub mod templates;
pub mod upload;

// Re-export commonly used types
pub use config::Config;
pub use error::{CopilotError, Result};
pub use reply::{ChatResponseFrame, ReplyKind, StreamEmitter};
pub use server::{router, AppState};
pub use session::{InMemorySessionStore, Message, Role, SessionStore};

#[cfg(test)]
pub mod test_utils;
