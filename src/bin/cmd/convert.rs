// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Convert command - read with format detection and write in another format.

use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use tracing::warn;

use crate::common::{open_parser, Result};
use navcodec::OutputTarget;

/// Convert a navigation file to another format.
///
/// The first route is split across the given outputs when the target format
/// limits the positions per file.
#[derive(Args, Clone, Debug)]
pub struct ConvertCmd {
    /// Input file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output files, one per chunk
    #[arg(value_name = "OUTPUT", required = true)]
    outputs: Vec<PathBuf>,

    /// Target format name (see `navcodec formats`)
    #[arg(short, long, value_name = "FORMAT")]
    to: String,

    /// Insert the format's duplicate of the first position
    #[arg(long)]
    duplicate_first_position: bool,

    /// Write all positions even if they exceed the per-file maximum
    #[arg(long)]
    ignore_max_positions: bool,

    /// Write every route into a single multi-route output
    #[arg(long)]
    all_routes: bool,

    /// Parser configuration file (TOML)
    #[arg(short, long, value_name = "TOML")]
    config: Option<PathBuf>,
}

impl ConvertCmd {
    pub fn run(self) -> Result<()> {
        let parser = open_parser(self.config.as_deref())?;
        let format = parser.format_by_name(&self.to)?;

        let result = parser.read_path(&self.input)?;
        let Some(source_format) = result.format() else {
            bail!("No format recognized for {}", self.input.display());
        };

        println!("Converting {} to {}:", source_format.name(), format.name());
        println!("  Input:  {}", self.input.display());

        if self.all_routes {
            let [output] = self.outputs.as_slice() else {
                bail!("--all-routes writes exactly one output");
            };
            println!("  Output: {}", output.display());
            parser.write_routes(result.routes(), &format, &mut OutputTarget::file(output))?;
            println!("  Routes: {}", result.routes().len());
            return Ok(());
        }

        if result.routes().len() > 1 {
            warn!(
                routes = result.routes().len(),
                "Only the first route is converted, use --all-routes to keep all"
            );
        }
        let Some(route) = result.the_route() else {
            bail!("{} contains no route", self.input.display());
        };

        let mut options = parser.config().write;
        options.duplicate_first_position |= self.duplicate_first_position;
        options.ignore_maximum_position_count |= self.ignore_max_positions;

        let mut targets: Vec<OutputTarget> = self.outputs.iter().map(OutputTarget::file).collect();
        let report = parser.write_route_to(route, &format, options, None, &mut targets)?;

        for (output, chunk) in self.outputs.iter().zip(&report.chunks) {
            println!(
                "  Output: {} (positions {}..{})",
                output.display(),
                chunk.start,
                chunk.end
            );
        }
        println!("  Positions: {}", report.positions);
        Ok(())
    }
}
