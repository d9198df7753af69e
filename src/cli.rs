//! Command-line interface definition for comfy-copilot
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for running the server and inspecting node metadata.

use clap::{Parser, Subcommand};

/// comfy-copilot - backend service for the ComfyUI-Copilot plugin
///
/// Serves chat, workflow template and node metadata endpoints for the
/// node-editor plugin UI.
#[derive(Parser, Debug, Clone)]
#[command(name = "comfy-copilot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for comfy-copilot
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Override the bind host from config
        #[arg(long)]
        host: Option<String>,

        /// Override the bind port from config
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Inspect the builtin node registry
    Nodes {
        /// Node inspection subcommand
        #[command(subcommand)]
        command: NodeCommand,
    },
}

/// Node inspection subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum NodeCommand {
    /// List all builtin node types
    Builtin {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show repository information for a node type
    Info {
        /// Node type name
        node_type: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            command: Commands::Serve {
                host: None,
                port: None,
            },
        }
    }
}
