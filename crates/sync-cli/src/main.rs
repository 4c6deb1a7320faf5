use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use sync_core::badge::BadgeTier;

mod commands;
mod logging;

#[derive(Parser, Debug)]
#[command(
    name = "sync-badges",
    version,
    about = "Recommendation badges for SynC storefronts"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Reputation store to use instead of the configured one
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Init {
        #[arg(long)]
        path: Option<PathBuf>,
        #[arg(long)]
        force: bool,
    },
    Config {
        #[arg(long)]
        print: bool,
    },
    /// Tier earned by a review count and positive percentage
    Classify {
        #[arg(allow_negative_numbers = true)]
        count: i64,
        #[arg(allow_negative_numbers = true)]
        percentage: f64,
    },
    /// Reviews needed to reach the next tier
    NextTier {
        #[arg(allow_negative_numbers = true)]
        count: i64,
        #[arg(allow_negative_numbers = true)]
        percentage: f64,
        #[arg(long)]
        current: Option<BadgeTier>,
        #[arg(long)]
        json: bool,
    },
    Business {
        #[command(subcommand)]
        action: BusinessCommand,
    },
    Status {
        business: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum BusinessCommand {
    /// Import reputation snapshots from a JSON file
    Import { input: PathBuf },
    /// Record one newly approved review
    Review {
        business: String,
        #[arg(long, conflicts_with = "negative")]
        positive: bool,
        #[arg(long)]
        negative: bool,
    },
}

fn main() -> Result<()> {
    logging::init_tracing();
    let cli = Cli::parse();
    let overrides = commands::Overrides {
        config_path: cli.config,
        store_path: cli.store,
    };

    match cli.command {
        Commands::Init { path, force } => commands::config::init(path, force),
        Commands::Config { print } => {
            if print {
                commands::config::print_effective(&overrides)
            } else {
                Ok(())
            }
        }
        Commands::Classify { count, percentage } => commands::badge::classify(count, percentage),
        Commands::NextTier {
            count,
            percentage,
            current,
            json,
        } => commands::badge::next_tier(count, percentage, current, json),
        Commands::Business { action } => {
            let action = match action {
                BusinessCommand::Import { input } => {
                    commands::business::BusinessAction::Import { input }
                }
                BusinessCommand::Review {
                    business,
                    positive,
                    negative,
                } => {
                    if positive == negative {
                        return Err(anyhow::anyhow!(
                            "pass exactly one of --positive or --negative"
                        ));
                    }
                    commands::business::BusinessAction::Review { business, positive }
                }
            };
            commands::business::execute(&overrides, action)
        }
        Commands::Status { business, json } => {
            commands::status::execute(&overrides, business, json)
        }
    }
}
