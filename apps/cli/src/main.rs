//! # pawcart
//!
//! Command-line front end for the storefront pricing and feeding engine.
//!
//! ```text
//! pawcart cart    -i order.json [--client-total 26.250]   ──► CartTotals JSON
//! pawcart feeding -i pet.json                             ──► FeedingGuide JSON
//! pawcart config                                          ──► effective settings
//! ```
//!
//! Input defaults to stdin, output to stdout. Logs go to stderr and honour
//! `RUST_LOG`.

mod config;

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pawcart_core::{pricing, subscription, CheckoutRequest, Money, PetProfile};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

#[derive(Parser, Debug)]
#[command(name = "pawcart", version, about = "Storefront pricing and feeding calculator")]
struct Cli {
    /// Output file (default: stdout)
    #[arg(short = 'o', long = "output", global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recompute checkout totals from a cart submission
    Cart {
        /// Input file (default: stdin)
        #[arg(short = 'i', long = "input")]
        input: Option<PathBuf>,

        /// Total the storefront displayed; a mismatch fails the command
        #[arg(long = "client-total")]
        client_total: Option<Decimal>,
    },
    /// Build the feeding guide and subscription quotes for a pet
    Feeding {
        /// Input file (default: stdin)
        #[arg(short = 'i', long = "input")]
        input: Option<PathBuf>,
    },
    /// Print the effective settings
    Config,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = CliConfig::load().context("failed to load configuration")?;

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };

    match cli.command {
        Command::Cart {
            input,
            client_total,
        } => {
            let request: CheckoutRequest = read_json(input)?;
            info!(items = request.items.len(), "recomputing cart");

            let totals = pricing::recompute_order(&request, &config.pricing)?;
            write_json(&mut writer, &totals)?;

            if let Some(submitted) = client_total {
                pricing::verify_client_total(Money::from_decimal(submitted), &totals)?;
                info!(total = %totals.total, "client total verified");
            }
        }
        Command::Feeding { input } => {
            let profile: PetProfile = read_json(input)?;
            info!(species = ?profile.species, "building feeding guide");

            let guide = subscription::feeding_guide(&profile, &config.feeding)?;
            write_json(&mut writer, &guide)?;
        }
        Command::Config => write_json(&mut writer, &config)?,
    }

    writer.flush()?;
    Ok(())
}

/// Initializes the tracing subscriber on stderr.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pawcart_core=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_json<T: serde::de::DeserializeOwned>(input: Option<PathBuf>) -> anyhow::Result<T> {
    let reader: Box<dyn Read> = match &input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
        ),
        None => Box::new(io::stdin()),
    };
    serde_json::from_reader(BufReader::new(reader)).context("malformed JSON input")
}

fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cart_args() {
        let cli = Cli::try_parse_from([
            "pawcart",
            "cart",
            "-i",
            "order.json",
            "--client-total",
            "26.250",
        ])
        .unwrap();
        match cli.command {
            Command::Cart {
                input,
                client_total,
            } => {
                assert_eq!(input, Some(PathBuf::from("order.json")));
                assert_eq!(client_total, Some(Decimal::new(26_250, 3)));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_write_json_appends_newline() {
        let mut buf: Vec<u8> = Vec::new();
        write_json(&mut buf, &Money::from_fils(1_500)).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\"1.500\"\n");
    }
}
