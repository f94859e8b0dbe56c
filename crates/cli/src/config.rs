//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use bouquet_core::EventId;
use bouquet_observability::LogFormat;

/// Bouquet event packaging planner
#[derive(Debug, Parser)]
#[command(name = "bouquet", about = "Plan flower package purchases for events", long_about = None)]
pub struct CliConfig {
    /// Catalog fixture (JSON) to load
    #[arg(short, long, env = "BOUQUET_CATALOG")]
    pub catalog: PathBuf,

    /// Output format for command results
    #[arg(short, long, env = "BOUQUET_OUTPUT", value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact or json)
    #[arg(long, env = "BOUQUET_LOG_FORMAT", default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the packages to buy for one event
    Plan {
        /// Event id
        event_id: EventId,
    },

    /// List events in the catalog
    Events {
        /// Only events whose name contains this text
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table.
    Text,

    /// Pretty-printed JSON.
    Json,
}

impl CliConfig {
    /// Load configuration from `.env`, the environment and CLI arguments.
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
