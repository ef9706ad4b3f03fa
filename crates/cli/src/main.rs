//! Shop CLI - record validation and fixture loading.
//!
//! # Usage
//!
//! ```bash
//! # Check one record's field rules
//! shop-cli validate customer customer.yaml
//!
//! # Load a whole fixture into an in-memory store and report rejected entries
//! shop-cli load fixtures/shop.json
//! ```
//!
//! # Commands
//!
//! - `validate` - Check a single record file
//! - `load` - Load a fixture file with references and uniqueness checks
//!
//! Both commands exit with status 1 on any failure. Set `SHOP_LOG_FORMAT=json`
//! for structured log output.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::validate::RecordKind;
use config::{CliConfig, DEFAULT_LOG_FILTER, LogFormat};

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Shop record and fixture checks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a single record file (JSON or YAML)
    Validate {
        /// Kind of record in the file
        #[arg(value_enum)]
        kind: RecordKind,

        /// Path to the record file
        file: PathBuf,
    },
    /// Load a fixture file into an in-memory store
    ///
    /// References in the file use the ids the store assigns in load order:
    /// customers, sellers, categories, products, orders, order items,
    /// payments. Customers and sellers share one sequence. A rejected entry
    /// takes no id, so later entries of its sequence shift down by one and
    /// references written against the intended ids may fail as
    /// `does_not_exist`.
    Load {
        /// Path to the fixture file
        file: PathBuf,
    },
}

fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let is_json = format == LogFormat::Json;
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Validate { kind, file } => commands::validate::run(kind, &file).await?,
        Commands::Load { file } => commands::load::run(&file).await?,
    }
    Ok(())
}
