//! CLI command definitions.

pub mod health;
pub mod items;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the todo-list API.
#[derive(Debug, Parser)]
#[command(name = "todo-list-client")]
#[command(about = "CLI client for the todo-list API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "TODO_LIST_URL", default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Todo item management.
    Items(items::ItemsCommand),
    /// Server health checks.
    Health(health::HealthCommand),
}
