//! Configuration management for comfy-copilot
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::cli::{Cli, Commands};
use crate::error::{CopilotError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for comfy-copilot
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Streamed reply pacing
    #[serde(default)]
    pub stream: StreamConfig,
    /// Workflow template catalog location
    #[serde(default)]
    pub templates: TemplatesConfig,
    /// Upload storage settings
    #[serde(default)]
    pub upload: UploadConfig,
    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allow any origin, method and header (development setup)
    #[serde(default = "default_cors_permissive")]
    pub cors_permissive: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_permissive() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_permissive: default_cors_permissive(),
        }
    }
}

/// Streaming reply configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Pause after each character frame (milliseconds)
    #[serde(default = "default_char_delay_ms")]
    pub char_delay_ms: u64,

    /// Frames buffered between the emitter and the response body
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_char_delay_ms() -> u64 {
    10
}

fn default_channel_capacity() -> usize {
    32
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            char_delay_ms: default_char_delay_ms(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl StreamConfig {
    /// Per-character delay as a `Duration`
    pub fn char_delay(&self) -> Duration {
        Duration::from_millis(self.char_delay_ms)
    }
}

/// Workflow template catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Directory scanned for `*.json` workflow templates
    #[serde(default = "default_templates_dir")]
    pub dir: PathBuf,
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("public/workflows")
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: default_templates_dir(),
        }
    }
}

/// Upload storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory uploaded files are written to
    #[serde(default = "default_upload_dir")]
    pub dir: PathBuf,

    /// Base URL prepended to stored file names in responses
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Largest accepted upload (bytes)
    #[serde(default = "default_max_upload_bytes")]
    pub max_bytes: usize,
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_public_base_url() -> String {
    "http://localhost:8000/uploads".to_string()
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024 // 20 MB
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            public_base_url: default_public_base_url(),
            max_bytes: default_max_upload_bytes(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    /// Whether JSON log output is requested, without logging anything
    ///
    /// Lets the binary pick its log format before [`Config::load`] runs, so
    /// warnings raised while loading reach the installed subscriber. The
    /// environment wins over the file; unreadable input means `false`.
    pub fn json_logs_requested(path: &str) -> bool {
        if let Some(value) = std::env::var("COMFY_COPILOT_JSON_LOGS")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
        {
            return value;
        }

        std::fs::read_to_string(path)
            .ok()
            .and_then(|contents| serde_yaml::from_str::<Config>(&contents).ok())
            .is_some_and(|config| config.logging.json)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CopilotError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| CopilotError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(host) = std::env::var("COMFY_COPILOT_HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("COMFY_COPILOT_PORT") {
            match port.parse() {
                Ok(value) => self.server.port = value,
                Err(_) => tracing::warn!("Invalid COMFY_COPILOT_PORT: {}", port),
            }
        }

        if let Ok(delay) = std::env::var("COMFY_COPILOT_CHAR_DELAY_MS") {
            match delay.parse() {
                Ok(value) => {
                    self.stream.char_delay_ms = value;
                    tracing::debug!(char_delay_ms = value, "Env override: COMFY_COPILOT_CHAR_DELAY_MS");
                }
                Err(_) => tracing::warn!("Invalid COMFY_COPILOT_CHAR_DELAY_MS: {}", delay),
            }
        }

        if let Ok(dir) = std::env::var("COMFY_COPILOT_TEMPLATES_DIR") {
            self.templates.dir = PathBuf::from(dir);
        }

        if let Ok(dir) = std::env::var("COMFY_COPILOT_UPLOAD_DIR") {
            self.upload.dir = PathBuf::from(dir);
        }

        if let Ok(base) = std::env::var("COMFY_COPILOT_UPLOAD_BASE_URL") {
            self.upload.public_base_url = base;
        }

        if let Ok(json_logs) = std::env::var("COMFY_COPILOT_JSON_LOGS") {
            match json_logs.parse::<bool>() {
                Ok(v) => self.logging.json = v,
                Err(_) => {
                    tracing::warn!("Invalid value for COMFY_COPILOT_JSON_LOGS: {}", json_logs)
                }
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Commands::Serve { host, port } = &cli.command {
            if let Some(host) = host {
                self.server.host = host.clone();
            }
            if let Some(port) = port {
                self.server.port = *port;
            }
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(CopilotError::Config("server.host cannot be empty".to_string()).into());
        }

        if self.server.port == 0 {
            return Err(
                CopilotError::Config("server.port must be greater than 0".to_string()).into(),
            );
        }

        if self.stream.char_delay_ms > 1000 {
            return Err(CopilotError::Config(
                "stream.char_delay_ms must be less than or equal to 1000".to_string(),
            )
            .into());
        }

        if self.stream.channel_capacity == 0 {
            return Err(CopilotError::Config(
                "stream.channel_capacity must be greater than 0".to_string(),
            )
            .into());
        }

        if self.upload.max_bytes == 0 {
            return Err(
                CopilotError::Config("upload.max_bytes must be greater than 0".to_string()).into(),
            );
        }

        if self.upload.public_base_url.trim().is_empty() {
            return Err(CopilotError::Config(
                "upload.public_base_url cannot be empty".to_string(),
            )
            .into());
        }

        Ok(())
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
