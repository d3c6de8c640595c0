//! Account and session CLI commands.

use clap::Args;
use dialoguer::Password;
use serde::Serialize;
use tabled::Tabled;

use taskhub_client::SessionController;
use taskhub_core::error::AppError;
use taskhub_entity::User;

use crate::commands::client_err;
use crate::output::{self, OutputFormat};

/// Arguments for the register command
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Display name
    #[arg(short, long)]
    pub name: String,

    /// Email address
    #[arg(short, long)]
    pub email: String,

    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Email address
    #[arg(short, long)]
    pub email: String,

    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Display name
    name: String,
    /// Email
    email: String,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute the register command
pub async fn register(
    args: &RegisterArgs,
    session: &SessionController,
    format: OutputFormat,
) -> Result<(), AppError> {
    let password = match &args.password {
        Some(p) => p.clone(),
        None => prompt_password(true)?,
    };

    let user = session
        .register(&args.name, &args.email, &password, &password)
        .await
        .map_err(client_err)?;

    output::print_success(&format!("Account created for '{}'", user.email));
    output::print_item(UserRow::from(&user), format);
    Ok(())
}

/// Execute the login command
pub async fn login(
    args: &LoginArgs,
    session: &SessionController,
    format: OutputFormat,
) -> Result<(), AppError> {
    let password = match &args.password {
        Some(p) => p.clone(),
        None => prompt_password(false)?,
    };

    let user = session
        .login(&args.email, &password)
        .await
        .map_err(client_err)?;

    output::print_success(&format!("Signed in as '{}'", user.email));
    output::print_item(UserRow::from(&user), format);
    Ok(())
}

/// Execute the logout command
pub async fn logout(session: &SessionController) -> Result<(), AppError> {
    session.logout().await.map_err(client_err)?;
    output::print_success("Signed out");
    Ok(())
}

/// Execute the me command
pub async fn me(session: &SessionController, format: OutputFormat) -> Result<(), AppError> {
    let user = session
        .fetch_current_user()
        .await
        .map_err(client_err)?
        .ok_or_else(|| AppError::authentication("Not signed in"))?;

    match format {
        OutputFormat::Table => {
            output::print_kv("ID", &user.id.to_string());
            output::print_kv("Name", &user.name);
            output::print_kv("Email", &user.email);
            output::print_kv(
                "Created",
                &user.created_at.format("%Y-%m-%d %H:%M").to_string(),
            );
        }
        OutputFormat::Json => output::print_item(UserRow::from(&user), format),
    }
    Ok(())
}

fn prompt_password(confirm: bool) -> Result<String, AppError> {
    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    prompt
        .interact()
        .map_err(|e| AppError::internal(format!("Failed to read password: {}", e)))
}
