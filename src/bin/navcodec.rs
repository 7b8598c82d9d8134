// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Navcodec CLI
//!
//! Command-line tool for navigation files.
//!
//! ## Usage
//!
//! ```sh
//! # Show detected format and routes
//! navcodec inspect info ride.csv
//!
//! # List positions of the second route
//! navcodec inspect positions tour.geojson --route 2
//!
//! # Convert, splitting across two files
//! navcodec convert ride.geojson part1.csv part2.csv --to CSV
//!
//! # List formats
//! navcodec formats
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{ConvertCmd, FormatsCmd, InspectCmd};
use common::Result;

/// Navcodec - Navigation format toolkit
///
/// Read routes, tracks and waypoint lists with format auto-detection and
/// write them to other formats.
#[derive(Parser, Clone)]
#[command(name = "navcodec")]
#[command(about = "Navigation format toolkit for routes, tracks and waypoints", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Inspect file contents (info, positions)
    #[command(subcommand)]
    Inspect(InspectCmd),

    /// Convert to another format
    Convert(ConvertCmd),

    /// List registered formats
    Formats(FormatsCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    common::init_logging(cli.verbose);

    match cli.command {
        Commands::Inspect(cmd) => cmd.run(),
        Commands::Convert(cmd) => cmd.run(),
        Commands::Formats(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        if let Some(codec_error) = e.downcast_ref::<navcodec::CodecError>() {
            for (key, value) in codec_error.log_fields() {
                tracing::debug!(key, value = %value, "Error detail");
            }
        }
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
