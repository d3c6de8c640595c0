//! CLI command definitions and dispatch.

pub mod auth;
pub mod serve;
pub mod task;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use taskhub_client::{ApiClient, ClientError, FileTokenStore, SessionController};
use taskhub_core::error::{AppError, ErrorKind};

use crate::output::OutputFormat;

/// TaskHub — task manager with token-refreshing API client
#[derive(Debug, Parser)]
#[command(name = "taskhub", version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the TaskHub server
    #[arg(short, long, default_value = "http://127.0.0.1:8000")]
    pub server: String,

    /// Credentials file (defaults to the platform config directory)
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the TaskHub server
    Serve(serve::ServeArgs),
    /// Create an account
    Register(auth::RegisterArgs),
    /// Sign in and store the token pair
    Login(auth::LoginArgs),
    /// Sign out and clear stored tokens
    Logout,
    /// Show the signed-in user
    Me,
    /// Task management
    Task(task::TaskArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args).await,
            Commands::Register(args) => auth::register(args, &self.session()?, self.format).await,
            Commands::Login(args) => auth::login(args, &self.session()?, self.format).await,
            Commands::Logout => auth::logout(&self.session()?).await,
            Commands::Me => auth::me(&self.session()?, self.format).await,
            Commands::Task(args) => task::execute(args, &self.session()?, self.format).await,
        }
    }

    fn session(&self) -> Result<SessionController, AppError> {
        let path = match &self.credentials {
            Some(path) => path.clone(),
            None => default_credentials_path()?,
        };
        let store = Arc::new(FileTokenStore::new(path));
        let client = Arc::new(ApiClient::new(self.server.clone(), store));
        Ok(SessionController::new(client))
    }
}

/// Default credentials location: `<config dir>/taskhub/credentials.json`.
fn default_credentials_path() -> Result<PathBuf, AppError> {
    let base = dirs::config_dir()
        .ok_or_else(|| AppError::configuration("Could not determine a config directory"))?;
    Ok(base.join("taskhub").join("credentials.json"))
}

/// Maps a client-side failure onto the shared error type so `main` prints
/// the server's message verbatim.
pub fn client_err(err: ClientError) -> AppError {
    match &err {
        ClientError::Validation(msg) => AppError::validation(msg.clone()),
        ClientError::Api { status, message } => {
            let kind = match status.as_u16() {
                401 => ErrorKind::Authentication,
                403 => ErrorKind::Authorization,
                404 => ErrorKind::NotFound,
                409 => ErrorKind::Conflict,
                422 => ErrorKind::Validation,
                _ => ErrorKind::Internal,
            };
            AppError::new(kind, message.clone())
        }
        ClientError::Transport(_) | ClientError::Refresh(_) | ClientError::Storage(_) => {
            AppError::internal(err.to_string())
        }
    }
}
