// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Bundled navigation formats.
//!
//! - [`geojson`]: GeoJSON feature collections, any number of routes per file
//! - [`csv`]: plain comma separated position lists, one route per file

pub mod csv;
pub mod geojson;

pub use self::csv::CsvFormat;
pub use self::geojson::GeoJsonFormat;
