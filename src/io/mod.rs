// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer for navigation formats.
//!
//! This module provides the codec trait, the rewindable input used for format
//! detection, and the reader, resolver and writer built on top of them.

pub mod config;
pub mod context;
pub mod detection;
pub mod formats;
pub mod parser;
pub mod resolver;
pub mod stream;

// Traits for format codecs and parse listeners
pub mod traits;
pub use traits::{FormatCodec, FormatRef, ParserListener};

// Chunked route writer
pub mod writer;

// Re-exports
pub use config::{CsvConfig, ParserConfig};
pub use context::ParseContext;
pub use detection::{extension_of, FormatTrialReader, TrialOutcome};
pub use parser::{NavParser, ParserResult};
pub use resolver::{ResolvedResult, RouteModelResolver};
pub use stream::RewindableReader;
pub use writer::{files_to_write_for, ChunkedWriter, OutputTarget, WriteOptions, WriteReport};
