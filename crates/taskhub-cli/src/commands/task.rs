//! Task management CLI commands.

use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use taskhub_client::{SessionController, TaskClient};
use taskhub_core::error::AppError;
use taskhub_entity::{Task, TaskStatus, UpdateTask};

use crate::commands::client_err;
use crate::output::{self, OutputFormat};

/// Arguments for task commands
#[derive(Debug, Args)]
pub struct TaskArgs {
    /// Task subcommand
    #[command(subcommand)]
    pub command: TaskCommand,
}

/// Task subcommands
#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// List all tasks
    List,
    /// Show a single task
    Get {
        /// Task ID
        id: Uuid,
    },
    /// Create a task
    Add {
        /// Task name
        name: String,
        /// Initial status
        #[arg(short, long, value_enum, default_value = "todo")]
        status: StatusArg,
    },
    /// Update a task
    Update {
        /// Task ID
        id: Uuid,
        /// New task name
        #[arg(short, long)]
        name: Option<String>,
        /// New status
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Delete a task
    Rm {
        /// Task ID
        id: Uuid,
    },
}

/// Status values accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Todo,
    InProgress,
    Done,
}

impl From<StatusArg> for TaskStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Todo => TaskStatus::Todo,
            StatusArg::InProgress => TaskStatus::InProgress,
            StatusArg::Done => TaskStatus::Done,
        }
    }
}

/// Task display row for table output
#[derive(Debug, Serialize, Tabled)]
struct TaskRow {
    /// Task ID
    id: String,
    /// Task name
    task_name: String,
    /// Status
    status: String,
    /// Created at
    create_at: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            task_name: task.task_name.clone(),
            status: format!("{:?}", task.status),
            create_at: task.create_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute task commands
pub async fn execute(
    args: &TaskArgs,
    session: &SessionController,
    format: OutputFormat,
) -> Result<(), AppError> {
    let tasks = TaskClient::new(session.client().clone());

    match &args.command {
        TaskCommand::List => {
            let items = tasks.list().await.map_err(client_err)?;
            let rows: Vec<TaskRow> = items.iter().map(TaskRow::from).collect();
            output::print_list(&rows, format);
        }
        TaskCommand::Get { id } => {
            let task = tasks.get(*id).await.map_err(client_err)?;
            output::print_item(TaskRow::from(&task), format);
        }
        TaskCommand::Add { name, status } => {
            let task = tasks
                .create(name, TaskStatus::from(*status))
                .await
                .map_err(client_err)?;
            output::print_success(&format!("Task '{}' created", task.task_name));
            output::print_item(TaskRow::from(&task), format);
        }
        TaskCommand::Update { id, name, status } => {
            let update = UpdateTask {
                task_name: name.clone(),
                status: status.map(TaskStatus::from),
            };
            let task = tasks.update(*id, &update).await.map_err(client_err)?;
            output::print_success(&format!("Task '{}' updated", task.id));
            output::print_item(TaskRow::from(&task), format);
        }
        TaskCommand::Rm { id } => {
            tasks.delete(*id).await.map_err(client_err)?;
            output::print_success(&format!("Task '{}' deleted", id));
        }
    }

    Ok(())
}
