mod commands;
mod render;
mod utils;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use taskdesk_core::Settings;
use taskdesk_core::model::CategoryKind;
use taskdesk_core::views::DueFilter;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taskdesk")]
#[command(about = "Manage your taskdesk todos, categories and events from the terminal")]
struct Cli {
    /// Show debug logs (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Create a new account
    Register,
    /// Show who is signed in
    Whoami,
    /// Profile, password and account removal
    #[command(subcommand)]
    Account(AccountCommand),
    /// Task statistics plus recent active and completed tasks
    Dashboard,
    /// List, create, edit and delete tasks
    #[command(subcommand)]
    Todos(TodoCommand),
    /// High-priority and overdue tasks that are not done
    Vital,
    /// Manage task statuses
    #[command(subcommand)]
    Statuses(CategoryCommand),
    /// Manage task priorities
    #[command(subcommand)]
    Priorities(CategoryCommand),
    /// List, create and delete events
    #[command(subcommand)]
    Events(EventCommand),
    /// Month view of events and due tasks
    Calendar {
        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
}

#[derive(Subcommand)]
enum AccountCommand {
    /// Update profile fields; omitted fields keep their value
    Edit {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        user_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        position: Option<String>,
        /// New profile picture
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Change your password
    Password,
    /// Deactivate your account
    Deactivate {
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum TodoCommand {
    /// List tasks, optionally filtered
    List {
        /// Match title or description
        #[arg(short, long)]
        search: Option<String>,
        /// Status id
        #[arg(long)]
        status: Option<i64>,
        /// Priority id
        #[arg(long)]
        priority: Option<i64>,
        /// overdue, today, week or no-date
        #[arg(long)]
        due: Option<DueFilter>,
        /// Print the matching tasks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one task
    Show { id: i64 },
    /// Create a task
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Status id
        #[arg(long)]
        status: i64,
        /// Priority id
        #[arg(long)]
        priority: i64,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Attach an image
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Edit a task; omitted fields keep their value
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<i64>,
        #[arg(long)]
        priority: Option<i64>,
        /// Due date (YYYY-MM-DD, or "none" to clear)
        #[arg(long)]
        due: Option<String>,
        /// Replace the image
        #[arg(long, conflicts_with = "remove_image")]
        image: Option<PathBuf>,
        /// Remove the current image
        #[arg(long)]
        remove_image: bool,
    },
    /// Move tasks to another status
    Move {
        /// Target status id
        #[arg(long)]
        to: i64,
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Delete tasks
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum CategoryCommand {
    List,
    Add { name: String },
    Rename { id: i64, name: String },
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum EventCommand {
    /// List events, soonest first
    List {
        /// Only events on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
    },
    /// Create an event
    Add {
        title: String,
        /// Start (e.g., "2025-03-20" or "2025-03-20T15:00")
        #[arg(short, long)]
        start: String,
        /// End (defaults to one hour after start)
        #[arg(short, long)]
        end: Option<String>,
        #[arg(short, long)]
        location: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        all_day: bool,
        #[arg(long)]
        reminder: bool,
    },
    /// Delete an event
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let settings = Settings::load()?;
    debug!(api = %settings.api_base_url, "loaded settings");

    match cli.command {
        Commands::Login { email } => commands::auth::login(&settings, email).await,
        Commands::Logout => commands::auth::logout(&settings).await,
        Commands::Register => commands::auth::register(&settings).await,
        Commands::Whoami => commands::auth::whoami(&settings).await,
        Commands::Account(cmd) => match cmd {
            AccountCommand::Edit {
                first_name,
                last_name,
                user_name,
                phone,
                position,
                image,
            } => {
                let edits = commands::account::ProfileEdits {
                    first_name,
                    last_name,
                    user_name,
                    phone,
                    position,
                    image,
                };
                commands::account::edit(&settings, edits).await
            }
            AccountCommand::Password => commands::account::change_password(&settings).await,
            AccountCommand::Deactivate { force } => {
                commands::account::deactivate(&settings, force).await
            }
        },
        Commands::Dashboard => commands::dashboard::run(&settings).await,
        Commands::Todos(cmd) => match cmd {
            TodoCommand::List {
                search,
                status,
                priority,
                due,
                json,
            } => {
                let filter = taskdesk_core::views::TaskFilter {
                    search: search.unwrap_or_default(),
                    status_id: status,
                    priority_id: priority,
                    due,
                };
                commands::todos::list(&settings, filter, json).await
            }
            TodoCommand::Show { id } => commands::todos::show(&settings, id).await,
            TodoCommand::Add {
                title,
                description,
                status,
                priority,
                due,
                image,
            } => {
                let new = commands::todos::NewTodo {
                    title,
                    description,
                    status,
                    priority,
                    due,
                    image,
                };
                commands::todos::add(&settings, new).await
            }
            TodoCommand::Edit {
                id,
                title,
                description,
                status,
                priority,
                due,
                image,
                remove_image,
            } => {
                let edits = commands::todos::TodoEdits {
                    title,
                    description,
                    status,
                    priority,
                    due,
                    image,
                    remove_image,
                };
                commands::todos::edit(&settings, id, edits).await
            }
            TodoCommand::Move { to, ids } => commands::todos::move_to(&settings, to, &ids).await,
            TodoCommand::Delete { ids, force } => {
                commands::todos::delete(&settings, &ids, force).await
            }
        },
        Commands::Vital => commands::dashboard::vital(&settings).await,
        Commands::Statuses(cmd) => commands::categories::run(&settings, CategoryKind::Status, cmd).await,
        Commands::Priorities(cmd) => {
            commands::categories::run(&settings, CategoryKind::Priority, cmd).await
        }
        Commands::Events(cmd) => match cmd {
            EventCommand::List { from } => commands::events::list(&settings, from).await,
            EventCommand::Add {
                title,
                start,
                end,
                location,
                description,
                all_day,
                reminder,
            } => {
                let new = commands::events::NewEvent {
                    title,
                    start,
                    end,
                    location,
                    description,
                    all_day,
                    reminder,
                };
                commands::events::add(&settings, new).await
            }
            EventCommand::Delete { id } => commands::events::delete(&settings, id).await,
        },
        Commands::Calendar { month } => commands::calendar::run(&settings, month).await,
    }
}

/// Logs go to stderr so command output stays pipeable.
fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "taskdesk=debug,taskdesk_core=debug" } else { "warn" };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG filter: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))
}
