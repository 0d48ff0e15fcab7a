use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsplus_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "newsplus")]
#[command(author, version, about = "Top headlines in the terminal, with locally persisted likes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and show the current top headlines (default)
    Headlines {
        /// Only show liked articles
        #[arg(short = 'l', long)]
        liked_only: bool,
    },
    /// Mark an article as liked
    Like {
        /// Article URL
        url: String,
    },
    /// Remove the like from an article
    Unlike {
        /// Article URL
        url: String,
    },
    /// List the URLs of all liked articles
    Liked,
    /// Open a headline in the default browser
    Open {
        /// Position in the headline list, starting at 1
        index: usize,
    },
    /// Print the configuration file path
    ConfigPath,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    if let Some(Commands::ConfigPath) = cli.command {
        println!("{}", AppConfig::config_path().display());
        return Ok(());
    }

    let ctx = commands::Context::open(&config).await?;

    let result = match cli.command {
        Some(Commands::Headlines { liked_only }) => {
            commands::headlines::run(&ctx, liked_only).await
        }
        None => commands::headlines::run(&ctx, false).await,
        Some(Commands::Like { url }) => commands::like::run(&ctx, &url, true).await,
        Some(Commands::Unlike { url }) => commands::like::run(&ctx, &url, false).await,
        Some(Commands::Liked) => commands::liked::run(&ctx).await,
        Some(Commands::Open { index }) => commands::open::run(&ctx, index).await,
        Some(Commands::ConfigPath) => Ok(()),
    };

    ctx.close().await;
    result
}
