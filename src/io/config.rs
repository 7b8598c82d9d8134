// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Parser configuration.
//!
//! Configuration is plain data with defaults for every field, so a TOML file
//! only needs to name what it changes:
//!
//! ```toml
//! total_buffer_size = 4194304
//!
//! [write]
//! duplicate_first_position = true
//!
//! [csv]
//! max_positions = 500
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::io::writer::WriteOptions;
use crate::{CodecError, Result};

/// Default replay budget when the input size is unknown (1 MiB).
pub const DEFAULT_TOTAL_BUFFER_SIZE: usize = 1024 * 1024;

/// Default read chunk size (8 KiB).
pub const DEFAULT_CHUNK_BUFFER_SIZE: usize = 8 * 1024;

/// Configuration for a [`NavParser`](crate::io::parser::NavParser).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Size hint used for the replay budget when the input length is unknown
    pub total_buffer_size: usize,
    /// Read chunk size; twice this is added to every replay budget
    pub chunk_buffer_size: usize,
    /// Options applied by default to chunked writes
    pub write: WriteOptions,
    /// Settings of the bundled CSV format
    pub csv: CsvConfig,
}

/// Settings of the bundled [`CsvFormat`](crate::io::formats::CsvFormat).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    /// Maximum positions per CSV file, unlimited if unset
    pub max_positions: Option<usize>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            total_buffer_size: DEFAULT_TOTAL_BUFFER_SIZE,
            chunk_buffer_size: DEFAULT_CHUNK_BUFFER_SIZE,
            write: WriteOptions::default(),
            csv: CsvConfig::default(),
        }
    }
}

impl ParserConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size hint used when the input length is unknown.
    pub fn total_buffer_size(mut self, size: usize) -> Self {
        self.total_buffer_size = size;
        self
    }

    /// Set the read chunk size.
    pub fn chunk_buffer_size(mut self, size: usize) -> Self {
        self.chunk_buffer_size = size;
        self
    }

    /// Set the default write options.
    pub fn write_options(mut self, options: WriteOptions) -> Self {
        self.write = options;
        self
    }

    /// Replay budget for an input of `size_hint` bytes.
    pub fn mark_budget(&self, size_hint: Option<usize>) -> usize {
        size_hint
            .unwrap_or(self.total_buffer_size)
            .saturating_add(self.chunk_buffer_size.saturating_mul(2))
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CodecError::Other(format!("Invalid configuration: {e}")))
    }

    /// Limit CSV files to `max_positions` positions.
    pub fn csv_max_positions(mut self, max_positions: usize) -> Self {
        self.csv.max_positions = Some(max_positions);
        self
    }

    /// Load a configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            CodecError::Other(format!("Cannot read configuration {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }
}
