// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Shared state of one detection attempt.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::core::route::Route;
use crate::io::traits::FormatRef;

/// Routes and contributing formats accumulated while decoding one input.
///
/// Decoders append routes; the trial reader records which format produced
/// them. The start time is a hint for decoders whose format has no absolute
/// timestamps of its own.
#[derive(Debug, Default)]
pub struct ParseContext {
    routes: Vec<Route>,
    formats: Vec<FormatRef>,
    start_time: Option<DateTime<Utc>>,
    source: Option<PathBuf>,
}

impl ParseContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context for a file with a start-time hint.
    pub fn with_source(source: Option<PathBuf>, start_time: Option<DateTime<Utc>>) -> Self {
        Self {
            source,
            start_time,
            ..Self::default()
        }
    }

    /// Add a decoded route.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Add several decoded routes.
    pub fn append_routes(&mut self, routes: impl IntoIterator<Item = Route>) {
        self.routes.extend(routes);
    }

    /// Record a format that contributed routes.
    pub fn add_format(&mut self, format: FormatRef) {
        self.formats.push(format);
    }

    /// Routes decoded so far.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Formats recorded as contributors, in the order they were tried.
    pub fn formats(&self) -> &[FormatRef] {
        &self.formats
    }

    /// Start-time hint for decoders without absolute timestamps.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    /// File the input came from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Split the context into its routes and contributing formats.
    pub fn into_parts(self) -> (Vec<Route>, Vec<FormatRef>) {
        (self.routes, self.formats)
    }
}
