//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "revoo", version, about = "Track habits, weekly goals and progress from the terminal")]
pub struct Cli {
    /// Backend origin, e.g. http://192.168.0.100:8080/api (overrides config and REVOO_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print lists as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Keep the session token in memory only; nothing is saved to disk or keychain
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and remember the session token
    Login {
        #[arg(long)]
        email: Option<String>,
        /// Read from REVOO_PASSWORD, or prompted for when omitted
        #[arg(long, env = "REVOO_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the saved session token
    Logout,
    /// Show the configured backend and whether a session token is saved
    Status,
    /// Manage habits
    #[command(subcommand)]
    Habits(HabitCommand),
    /// Manage weekly goals
    #[command(subcommand)]
    Goals(GoalCommand),
    /// Record progress against a weekly goal
    Progress(ProgressArgs),
}

#[derive(Debug, Subcommand)]
pub enum HabitCommand {
    /// List all habits
    List,
    /// Show one habit
    Show { id: i64 },
    /// Create a habit
    Add {
        #[arg(long)]
        titulo: String,
        #[arg(long, default_value = "")]
        descricao: String,
        /// Points the habit is worth (defaults to 1)
        #[arg(long, default_value = "")]
        pontos: String,
    },
    /// Edit a habit; omitted fields keep their current value
    Edit {
        id: i64,
        #[arg(long)]
        titulo: Option<String>,
        #[arg(long)]
        descricao: Option<String>,
        #[arg(long)]
        pontos: Option<String>,
    },
    /// Delete a habit
    Remove {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum GoalCommand {
    /// List all weekly goals
    List,
    /// Create a weekly goal
    Add {
        #[arg(long, value_name = "ID")]
        colaborador: String,
        #[arg(long, value_name = "ID")]
        habito: String,
        /// Week start, YYYY-MM-DD
        #[arg(long, value_name = "DATE")]
        inicio: String,
        /// Week end, YYYY-MM-DD
        #[arg(long, value_name = "DATE")]
        fim: String,
        #[arg(long)]
        quantidade: String,
    },
}

#[derive(Debug, Args)]
pub struct ProgressArgs {
    /// Weekly goal id; picked interactively when omitted
    #[arg(long, value_name = "ID")]
    pub meta: Option<i64>,
    /// Date of the record, YYYY-MM-DD
    #[arg(long, value_name = "DATE", default_value = "")]
    pub data: String,
    #[arg(long, default_value = "")]
    pub quantidade: String,
    #[arg(long, default_value = "")]
    pub observacao: String,
}
