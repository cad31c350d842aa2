mod commands;

use clap::{Parser, Subcommand};
use reelscout_intel::ReelScout;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "reelscout")]
#[command(about = "Multi-source search and channel content intelligence")]
struct Cli {
    /// Print compact single-line JSON instead of pretty output
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search every provider for a query and summarise the results
    Research {
        /// Free-text topic or incident to research
        query: String,
    },
    /// Show the top trending news headlines
    Trending {
        /// Time window: today, yesterday, 3days, week or month
        #[arg(long, default_value = "today")]
        period: String,
    },
    /// Show the content profile of a channel
    Profile {
        /// Channel handle (e.g., techdaily)
        channel: String,
        /// Ignore any cached profile and re-analyse the channel
        #[arg(long)]
        refresh: bool,
    },
    /// Ranked trending content and a reel brief for a channel
    Channel {
        /// Channel handle (e.g., techdaily)
        channel: String,
        /// Ignore any cached profile and re-analyse the channel
        #[arg(long)]
        refresh: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = reelscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    config.credential_report();
    let scout = ReelScout::from_config(&config)?;

    match cli.command {
        Commands::Research { query } => {
            commands::run_research(&scout, &query, cli.compact).await
        }
        Commands::Trending { period } => {
            commands::run_trending(&scout, &period, cli.compact).await
        }
        Commands::Profile { channel, refresh } => {
            commands::run_profile(&scout, &channel, refresh, cli.compact).await
        }
        Commands::Channel { channel, refresh } => {
            commands::run_channel(&scout, &channel, refresh, cli.compact).await
        }
    }
}

#[cfg(test)]
mod tests;
