// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Navcodec
//!
//! Navigation format library for routes, tracks and waypoint lists.
//!
//! The library detects the format of a byte stream by trying an ordered list
//! of candidate codecs, resolves the decoded routes into one format, and
//! writes routes back out, split across several outputs when a format limits
//! the number of positions per file.
//!
//! ## Architecture
//!
//! - `core/` - Errors, route model, format registry, route comments
//! - `io/` - Codec trait, rewindable input, trial reader, resolver, chunked
//!   writer and the [`NavParser`] facade
//! - `io/formats/` - Bundled GeoJSON and CSV codecs
//!
//! ## Example: Converting a file
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use navcodec::NavParser;
//!
//! let parser = NavParser::with_defaults();
//! let result = parser.read_path("ride.csv")?;
//! if let Some(route) = result.the_route() {
//!     let geojson = parser.format_by_name("GeoJSON")?;
//!     parser.write_route(route, &geojson, "ride.geojson")?;
//! }
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{CodecError, FormatRegistry, Position, Result, Route, RouteCharacteristics};

// I/O types (codec trait, detection, resolution, writing)
pub mod io;

// Re-export key I/O types
pub use io::traits::{FormatCodec, FormatRef};
pub use io::writer::{OutputTarget, WriteOptions};
pub use io::{NavParser, ParserResult, ResolvedResult};
