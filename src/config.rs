//! Desk configuration
//!
//! Command-line arguments with environment fallbacks. A `.env` file in the
//! working directory is read first when present.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    desk::DeskSettings,
    pricing::{self, PriceError},
    sequence::{DEFAULT_PREFIX, DEFAULT_SEED},
};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Repair desk configuration
#[derive(Debug, Parser)]
#[command(name = "repair-desk", about = "Repair shop service orders", long_about = None)]
pub struct DeskConfig {
    /// ISO code of the currency orders are priced in
    #[arg(long, env = "REPAIR_DESK_CURRENCY", default_value = "BRL", global = true)]
    pub currency: String,

    /// Prefix of generated order numbers
    #[arg(long, env = "REPAIR_DESK_SEQUENCE_PREFIX", default_value = DEFAULT_PREFIX, global = true)]
    pub sequence_prefix: String,

    /// First sequence value, before any fixture moves it forward
    #[arg(long, env = "REPAIR_DESK_SEQUENCE_SEED", default_value_t = DEFAULT_SEED, global = true)]
    pub sequence_seed: u64,

    /// YAML fixture to load instead of the bundled sample orders
    #[arg(long, env = "REPAIR_DESK_FIXTURE", global = true)]
    pub fixture: Option<PathBuf>,

    /// Start with an empty desk
    #[arg(long, conflicts_with = "fixture", global = true)]
    pub no_sample: bool,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// What to do
    #[command(subcommand)]
    pub command: DeskCommand,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum DeskCommand {
    /// List orders, optionally filtered by a search term
    List {
        /// Case-insensitive term matched against number, customer, model, status and priority
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Show one order's details
    View {
        /// Order number (e.g. PED-001000)
        number: String,
    },

    /// Replay a YAML script of desk steps
    Run {
        /// Path to the script
        script: PathBuf,
    },
}

impl DeskConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Desk settings derived from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::UnknownCurrency`] for an unsupported currency code.
    pub fn settings(&self) -> Result<DeskSettings, PriceError> {
        Ok(DeskSettings {
            currency: pricing::currency(&self.currency)?,
            sequence_prefix: self.sequence_prefix.clone(),
            sequence_seed: self.sequence_seed,
        })
    }
}
