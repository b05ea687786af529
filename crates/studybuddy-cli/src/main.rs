use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "studybuddy-cli", version, about = "StudyBuddy CLI")]
struct Cli {
    /// User whose records are read and written
    #[arg(long, global = true, default_value = "default")]
    user: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Study task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Timetable event management
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Dashboard widgets as JSON
    Widget {
        #[command(subcommand)]
        action: commands::widget::WidgetAction,
    },
    /// Print the grounding text given to the assistant
    Context {
        /// Current time, e.g. "2024-03-11T09:00" (defaults to now, UTC)
        #[arg(long)]
        now: Option<String>,
    },
    /// Show which records a question would load
    Intent {
        question: String,
    },
    /// Ask the study assistant a question
    Ask {
        question: String,
        /// Current time, e.g. "2024-03-11T09:00" (defaults to now, UTC)
        #[arg(long)]
        now: Option<String>,
    },
    /// API key management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let user = cli.user.as_str();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(user, action),
        Commands::Event { action } => commands::event::run(user, action),
        Commands::Widget { action } => commands::widget::run(user, action),
        Commands::Context { now } => commands::context::run(user, now.as_deref()),
        Commands::Intent { question } => commands::intent::run(&question),
        Commands::Ask { question, now } => commands::ask::run(user, &question, now.as_deref()).await,
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
