//! comfy-copilot - backend service for the ComfyUI-Copilot plugin
//!
#![doc = "Main entry point for the comfy-copilot server and CLI."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use comfy_copilot::cli::{Cli, Commands, NodeCommand};
use comfy_copilot::commands;
use comfy_copilot::config::Config;
use comfy_copilot::reply::metrics::init_metrics_exporter;
use comfy_copilot::server;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");

    // Initialize tracing before config load
    init_tracing(cli.verbose, Config::json_logs_requested(config_path));

    // Load configuration
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    match cli.command {
        Commands::Serve { .. } => {
            tracing::info!("Starting server mode");
            init_metrics_exporter();
            server::serve(&config).await?;
            Ok(())
        }
        Commands::Nodes { command } => match command {
            NodeCommand::Builtin { json } => {
                commands::nodes::list_builtin(json)?;
                Ok(())
            }
            NodeCommand::Info { node_type, json } => {
                commands::nodes::show_node_info(&node_type, json)?;
                Ok(())
            }
        },
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose {
        "comfy_copilot=debug,tower_http=debug"
    } else {
        "comfy_copilot=info,tower_http=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
