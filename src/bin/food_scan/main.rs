// ABOUTME: food-scan CLI - scan food photos and query the nutrition table
// ABOUTME: Parses arguments, initializes logging and configuration, dispatches subcommands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Scan a photo with the hosted Food-101 model
//! food-scan scan lunch.jpg
//!
//! # Scan without any network access (stand-in recognizer)
//! food-scan scan lunch.jpg --offline --json
//!
//! # Resolve a classifier label as if the model had returned it
//! food-scan label "Beef Tartare" --score 0.8
//!
//! # Query the nutrition table directly
//! food-scan lookup apple
//! food-scan lookup apple_pie --exact
//!
//! # List table entries and their aliases
//! food-scan foods
//! ```

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use food_scan::config::ScannerConfig;
use food_scan::formatters::OutputFormat;
use food_scan::logging::LoggingConfig;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "food-scan",
    version,
    about = "Food photo nutrition scanner",
    long_about = "Recognizes the food in a photo and resolves it to nutrition facts using a Food-101 classifier, a class mapping, and a curated nutrition table."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Recognize the food in a photo
    Scan {
        /// Image file path or `data:` URI
        input: String,

        /// Skip the remote classifier and use the stand-in recognizer
        #[arg(long)]
        offline: bool,
    },

    /// Resolve a classifier label and score to a nutrition record
    Label {
        /// Label as a classifier would report it, e.g. "Beef Tartare"
        label: String,

        /// Classifier score in [0, 1]
        #[arg(long, default_value = "1.0")]
        score: f64,
    },

    /// Look up a food in the nutrition table
    Lookup {
        /// Food key or fragment, e.g. "apple"
        query: String,

        /// Only accept an exact key match
        #[arg(long)]
        exact: bool,
    },

    /// List nutrition table entries
    Foods,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    let config = ScannerConfig::from_env().context("Invalid scanner configuration")?;
    debug!(fallback_policy = %config.fallback_policy, "Configuration loaded");
    let format = OutputFormat::from_json_flag(cli.json);

    let output = match cli.command {
        Command::Scan { input, offline } => {
            commands::scan::scan(&config, &input, offline, format).await?
        }
        Command::Label { label, score } => commands::scan::label(&config, &label, score, format)?,
        Command::Lookup { query, exact } => {
            commands::lookup::lookup(&config, &query, exact, format)?
        }
        Command::Foods => commands::lookup::foods(&config, format)?,
    };

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
