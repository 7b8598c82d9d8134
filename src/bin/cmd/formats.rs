// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Formats command - list registered formats.

use clap::Args;

use crate::common::{describe_format, open_parser, Result};

/// List the registered formats in detection order.
#[derive(Args, Clone, Debug)]
pub struct FormatsCmd {}

impl FormatsCmd {
    pub fn run(self) -> Result<()> {
        let parser = open_parser(None)?;
        let registry = parser.registry();

        println!("Formats in detection order:");
        for format in registry.all_candidates()? {
            println!("  {}", describe_format(&format));
        }
        println!();
        println!(
            "Default for multiple routes: {}",
            registry.multi_route_default().name()
        );
        Ok(())
    }
}
