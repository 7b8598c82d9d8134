// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - show detected format, routes and positions.

use std::path::{Path, PathBuf};

use anyhow::bail;
use clap::Subcommand;

use crate::common::{format_position, format_time, open_parser, Result};
use navcodec::ParserResult;

/// Inspect file contents.
#[derive(Subcommand, Clone, Debug)]
pub enum InspectCmd {
    /// Show the detected format and a summary of every route
    Info {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List the positions of one route
    Positions {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Route to list, starting at 1
        #[arg(short, long, default_value_t = 1)]
        route: usize,
    },
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        match self {
            InspectCmd::Info { input } => cmd_info(input),
            InspectCmd::Positions { input, route } => cmd_positions(input, route),
        }
    }
}

fn read(input: &Path) -> Result<ParserResult> {
    let result = open_parser(None)?.read_path(input)?;
    if !result.is_successful() {
        bail!("No format recognized for {}", input.display());
    }
    Ok(result)
}

/// Cmd: Show file info
fn cmd_info(input: PathBuf) -> Result<()> {
    let result = read(&input)?;

    println!("=== {} ===", input.display());
    if let Some(format) = result.format() {
        println!("Format: {}", format.name());
    }
    println!("Routes: {}", result.routes().len());

    println!();
    for (index, route) in result.routes().iter().enumerate() {
        println!(
            "  [{}] {} | {} | {} positions",
            index + 1,
            route.name().unwrap_or("-"),
            route.characteristics(),
            route.position_count()
        );
        if let (Some(first), Some(last)) = (route.positions().first(), route.positions().last()) {
            println!("      Start: {}", format_time(first.time));
            println!("      End:   {}", format_time(last.time));
        }
    }

    Ok(())
}

/// Cmd: List positions
fn cmd_positions(input: PathBuf, route: usize) -> Result<()> {
    let result = read(&input)?;
    let Some(selected) = route.checked_sub(1).and_then(|i| result.routes().get(i)) else {
        bail!(
            "Route {route} not found, {} has {} route(s)",
            input.display(),
            result.routes().len()
        );
    };

    println!("=== {} ===", selected.name().unwrap_or("-"));
    for (index, position) in selected.positions().iter().enumerate() {
        println!(
            "  {:>5}  {}  {}  {}",
            index + 1,
            format_position(position),
            format_time(position.time),
            position.description.as_deref().unwrap_or("")
        );
    }

    Ok(())
}
