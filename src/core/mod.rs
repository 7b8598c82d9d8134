// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout navcodec.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Error handling
//! - [`Route`] and [`Position`] - The unified route model
//! - [`FormatRegistry`] - Ordered registry of known formats
//! - [`RouteComments`] - Position descriptions and route names

pub mod comments;
pub mod error;
pub mod registry;
pub mod route;

pub use comments::{DefaultRouteComments, RouteComments};
pub use error::{CodecError, Result};
pub use registry::FormatRegistry;
pub use route::{Position, Route, RouteCharacteristics};
