//! slacky - Slack Web API from the command line
//!
//! Main entry point for the slacky CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{call, channels, history, methods, post, users};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// slacky - Slack Web API from the command line
#[derive(Parser)]
#[command(name = "slacky")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Slack token (default: keyring, SLACK_BOT_TOKEN, then config file)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Config file layered over the discovered ones
    #[arg(long, global = true, env = "SLACKY_CONFIG")]
    pub config: Option<std::path::PathBuf>,

    /// Slack API root (default: https://slack.com/api/)
    #[arg(long, global = true, env = "SLACKY_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Channel management
    Channels(channels::ChannelsArgs),

    /// Look up workspace users
    Users(users::UsersArgs),

    /// Post a message to a channel
    Post(post::PostArgs),

    /// Show recent messages of a channel
    History(history::HistoryArgs),

    /// Call any Slack method with key=value parameters
    Call(call::CallArgs),

    /// List the Slack methods with typed support
    Methods(methods::MethodsArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing: console (human-readable) + rotating JSON file
    let filter = if cli.verbose {
        "slacky=debug,slacky_cli=debug,slacky_config=debug,info"
    } else {
        "slacky=info,slacky_cli=info,warn"
    };

    let log_dir = slacky_config::config_dir()
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "slacky.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "slacky=trace,slacky_cli=trace,slacky_config=trace,info",
                )),
        )
        .init();

    let ctx = commands::Context {
        token: cli.token,
        config_file: cli.config,
        base_url: cli.base_url,
        json_output: cli.json,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Channels(args) => channels::run(args, &ctx).await,
        Commands::Users(args) => users::run(args, &ctx).await,
        Commands::Post(args) => post::run(args, &ctx).await,
        Commands::History(args) => history::run(args, &ctx).await,
        Commands::Call(args) => call::run(args, &ctx).await,
        Commands::Methods(args) => methods::run(args, &ctx),
    }
}
