#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the maptools address normalizer.
//!
//! Uses `indicatif-log-bridge` (via [`maptools_cli_utils::init_logger`])
//! so that per-row warnings and the batch progress bar share the terminal.

mod batch;
mod config;

use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use maptools_address::{AddressParser, street_type};
use maptools_cli_utils::IndicatifProgress;

#[derive(Parser)]
#[command(name = "maptools", about = "US postal address normalizer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse single-line addresses (e.g. "W 22 St, New York, NY 10011") and
    /// print each as JSON
    Parse {
        /// Addresses in `STREET, CITY, STATE ZIP` form
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// Print the USPS street suffix of each street
    Suffix {
        /// Street lines (e.g. "179 Livingston St")
        #[arg(required = true)]
        streets: Vec<String>,
    },
    /// Normalize the address column of a CSV file
    Batch {
        /// Input CSV file
        #[arg(long)]
        input: PathBuf,
        /// Output CSV file (defaults to stdout)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Address column name (overrides the config file)
        #[arg(long)]
        column: Option<String>,
        /// TOML config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = maptools_cli_utils::init_logger();
    let cli = Cli::parse();
    let parser = AddressParser::usps();

    match cli.command {
        Commands::Parse { addresses } => {
            for raw in &addresses {
                match parser.parse(raw) {
                    Ok(addr) => println!("{}", serde_json::to_string(&addr)?),
                    Err(e) => {
                        log::warn!("Invalid address {raw:?}: {e}");
                        println!(
                            "{}",
                            serde_json::json!({ "input": raw, "error": e.to_string() })
                        );
                    }
                }
            }
        }
        Commands::Suffix { streets } => {
            for street in &streets {
                println!("{street}\t{}", street_type(parser.table(), street));
            }
        }
        Commands::Batch {
            input,
            output,
            column,
            config: config_path,
        } => {
            let mut config = config::load_config(config_path.as_deref())?;
            if let Some(column) = column {
                config.address_column = column;
            }

            log::info!(
                "Normalizing column {:?} of {}",
                config.address_column,
                input.display()
            );

            let reader = File::open(&input)?;
            let progress = IndicatifProgress::rows_bar(&multi, "Parsing addresses");
            let summary = match output {
                Some(path) => batch::normalize_csv(
                    &parser,
                    &config,
                    reader,
                    File::create(path)?,
                    &progress,
                )?,
                None => batch::normalize_csv(
                    &parser,
                    &config,
                    reader,
                    io::stdout().lock(),
                    &progress,
                )?,
            };

            if summary.failed > 0 {
                log::warn!("{} of {} rows could not be parsed", summary.failed, summary.total);
            }
        }
    }

    Ok(())
}
