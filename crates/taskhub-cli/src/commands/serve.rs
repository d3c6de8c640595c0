//! Start the TaskHub server.

use clap::Args;

use taskhub_core::config::AppConfig;
use taskhub_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load(&args.config)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    println!("Starting TaskHub server...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);
    println!("  Database backend: {}", config.database.backend);

    taskhub_api::app::run_server(config).await
}
