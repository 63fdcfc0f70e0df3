use clap::{Parser, Subcommand};
use taskflow_core::error::AppError;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in with a display name
    ///
    /// Example: taskflow login Rin
    Login {
        name: String,
    },
    /// Sign out
    Logout,
    /// Print the signed-in display name
    Whoami,
    /// Add a new task
    ///
    /// Example: taskflow add "Buy milk" --due 2026-01-15 --priority high
    Add {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Due date, RFC3339 or YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
        /// low, medium or high
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Edit fields of an existing task
    ///
    /// Example: taskflow edit task-1 --title "Buy oat milk"
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,
        #[arg(long)]
        clear_due: bool,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long, conflicts_with = "clear_category")]
        category: Option<String>,
        #[arg(long)]
        clear_category: bool,
    },
    /// Flip a task between pending and completed
    ///
    /// Example: taskflow toggle task-1
    Toggle {
        id: String,
    },
    /// Delete a task
    ///
    /// Example: taskflow delete task-1
    Delete {
        id: String,
    },
    /// List tasks
    ///
    /// Example: taskflow list --filter overdue --sort priority
    /// Example: taskflow list --search milk --category Shopping
    List {
        /// all, completed, pending or overdue
        #[arg(long, default_value = "all")]
        filter: String,
        /// Case-insensitive substring of the title or description
        #[arg(long, default_value = "")]
        search: String,
        /// Category name, or "all"
        #[arg(long, default_value = "all")]
        category: String,
        /// newest, oldest, priority, dueDate or alphabetical
        #[arg(long, default_value = "newest")]
        sort: String,
    },
    /// Show aggregate statistics
    Stats,
    /// Drop the persisted collection
    Reset,
}

/// Accepts a full RFC3339 timestamp, or a plain date which is taken as
/// midnight UTC.
pub fn parse_due_argument(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("due date is required"));
    }

    if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return parsed
            .format(&Rfc3339)
            .map_err(|err| AppError::invalid_data(err.to_string()));
    }

    let format = time::macros::format_description!("[year]-[month]-[day]");
    let date = Date::parse(trimmed, &format)
        .map_err(|_| AppError::invalid_input("due date must be RFC3339 or YYYY-MM-DD"))?;
    PrimitiveDateTime::new(date, Time::MIDNIGHT)
        .assume_utc()
        .format(&Rfc3339)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}
