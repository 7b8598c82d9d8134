// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing_subscriber::EnvFilter;

use navcodec::io::ParserConfig;
use navcodec::{FormatRef, NavParser, Position};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins over `verbose` when set.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Create a parser over the bundled formats, configured from `config` if given.
pub fn open_parser(config: Option<&Path>) -> Result<NavParser> {
    let config = match config {
        Some(path) => ParserConfig::from_toml_file(path)?,
        None => ParserConfig::default(),
    };
    Ok(NavParser::from_config(config)?)
}

/// Format a per-file capacity.
pub fn format_capacity(capacity: usize) -> String {
    if capacity == usize::MAX {
        "unlimited".to_string()
    } else {
        capacity.to_string()
    }
}

/// Format an optional timestamp.
pub fn format_time(time: Option<DateTime<Utc>>) -> String {
    match time {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "-".to_string(),
    }
}

/// Format a position as `lon, lat [ele m]`.
pub fn format_position(position: &Position) -> String {
    match position.elevation {
        Some(e) => format!("{:.6}, {:.6} [{e:.1} m]", position.longitude, position.latitude),
        None => format!("{:.6}, {:.6}", position.longitude, position.latitude),
    }
}

/// One line summary of a format's capabilities.
pub fn describe_format(format: &FormatRef) -> String {
    format!(
        "{:<12} max positions: {:<10} multiple routes: {:<3} extensions: {}",
        format.name(),
        format_capacity(format.max_positions_per_output()),
        if format.supports_multiple_routes() {
            "yes"
        } else {
            "no"
        },
        format.extensions().join(", ")
    )
}
