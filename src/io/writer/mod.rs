// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Chunked writer for navigation formats.
//!
//! A route longer than a format's per-file capacity is split into contiguous
//! slices, one per output target. Format specific pre-processing runs once on
//! a converted copy of the route before splitting and is undone afterwards.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use navcodec::core::comments::DefaultRouteComments;
//! use navcodec::io::formats::CsvFormat;
//! use navcodec::io::traits::FormatRef;
//! use navcodec::io::writer::{ChunkedWriter, OutputTarget, WriteOptions};
//! # fn route() -> navcodec::Route { unimplemented!() }
//!
//! let csv: FormatRef = Arc::new(CsvFormat::with_max_positions(500));
//! let mut targets = vec![OutputTarget::file("part1.csv"), OutputTarget::file("part2.csv")];
//! let report = ChunkedWriter::new(csv, WriteOptions::new(), &DefaultRouteComments)
//!     .write(&route(), None, &mut targets)?;
//! println!("wrote {:?}", report.chunks);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod options;
pub mod target;

pub use options::WriteOptions;
pub use target::OutputTarget;

use std::ops::Range;

use tracing::info;

use crate::core::comments::RouteComments;
use crate::core::route::Route;
use crate::io::resolver::as_format;
use crate::io::traits::FormatRef;
use crate::{CodecError, Result};

/// Caller hook run once on the whole route after format pre-processing.
pub type ParserCallback<'a> = &'a mut dyn FnMut(&mut Route, &FormatRef);

/// Summary of a chunked write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// Name of the written format
    pub format: String,
    /// Positions written after pre-processing
    pub positions: usize,
    /// Position range written to each target, in target order
    pub chunks: Vec<Range<usize>>,
}

/// Number of outputs needed to write `route` in `format` without exceeding its capacity.
pub fn files_to_write_for(route: &Route, format: &FormatRef, duplicate_first_position: bool) -> usize {
    let positions = route.position_count() + usize::from(duplicate_first_position);
    let capacity = format.max_positions_per_output().max(1);
    positions.div_ceil(capacity).max(1)
}

/// Writes one route across one or more outputs of a single format.
pub struct ChunkedWriter<'a> {
    format: FormatRef,
    options: WriteOptions,
    comments: &'a dyn RouteComments,
}

impl<'a> ChunkedWriter<'a> {
    /// Create a writer for `format`.
    pub fn new(format: FormatRef, options: WriteOptions, comments: &'a dyn RouteComments) -> Self {
        Self {
            format,
            options,
            comments,
        }
    }

    /// Convert, comment and pre-process a copy of `route` for writing.
    ///
    /// Returns the copy and whether a duplicate first position was inserted.
    fn prepare(
        &self,
        route: &Route,
        duplicate_first_position: bool,
        callback: Option<ParserCallback<'_>>,
    ) -> (Route, bool) {
        let mut route_to_write = as_format(route, &self.format);
        self.comments
            .comment_positions(route_to_write.positions_mut());
        self.comments.comment_route_name(&mut route_to_write);

        if self.format.removes_duplicate_positions() {
            route_to_write.remove_duplicates();
        }

        let mut inserted_duplicate = false;
        if duplicate_first_position {
            if let Some(position) = self.format.duplicate_first_position(&route_to_write) {
                route_to_write.insert(0, position);
                inserted_duplicate = true;
            }
        }

        if self.format.requires_increasing_time() {
            route_to_write.ensure_increasing_time();
        }

        if let Some(callback) = callback {
            callback(&mut route_to_write, &self.format);
        }

        (route_to_write, inserted_duplicate)
    }

    /// Write `route` split across `targets`.
    ///
    /// # Errors
    ///
    /// - [`CodecError::NoTargets`] if `targets` is empty
    /// - [`CodecError::CapacityOverflow`] if the positions do not fit and
    ///   the capacity is not ignored
    /// - any encode error of a chunk; earlier chunks stay written
    pub fn write(
        &self,
        route: &Route,
        callback: Option<ParserCallback<'_>>,
        targets: &mut [OutputTarget],
    ) -> Result<WriteReport> {
        if targets.is_empty() {
            return Err(CodecError::NoTargets);
        }

        info!(
            format = self.format.name(),
            positions = route.position_count(),
            "Writing position list with 1 route"
        );

        let (mut route_to_write, inserted_duplicate) =
            self.prepare(route, self.options.duplicate_first_position, callback);

        let positions = route_to_write.position_count();
        let capacity = if self.options.ignore_maximum_position_count {
            positions
        } else {
            self.format.max_positions_per_output()
        };
        if !self.options.ignore_maximum_position_count
            && positions > targets.len().saturating_mul(capacity)
        {
            return Err(CodecError::capacity_overflow(
                self.format.name(),
                positions,
                capacity,
                targets.len(),
            ));
        }

        let rename = self.format.renames_fragments_from(route.format().as_ref());
        let fragments = targets.len();
        let mut chunks = Vec::with_capacity(fragments);
        let mut start: usize = 0;
        for (index, target) in targets.iter_mut().enumerate() {
            let end = start.saturating_add(capacity).min(positions);

            if rename {
                let mut name = self
                    .comments
                    .create_route_name(&route_to_write.positions()[start..end]);
                if fragments > 1 {
                    name = format!("Track{}: {}", index + 1, name);
                }
                route_to_write.set_name(name);
            }

            target.write_chunk(&self.format, &route_to_write, start, end)?;
            info!(start, end, "Wrote position list");
            chunks.push(start..end);
            start = end;
        }

        if inserted_duplicate {
            route_to_write.remove(0);
        }

        Ok(WriteReport {
            format: self.format.name().to_string(),
            positions,
            chunks,
        })
    }

    /// Write several routes into one output of a multi-route format.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Unsupported`] if the format cannot hold several routes.
    pub fn write_routes(&self, routes: &[Route], target: &mut OutputTarget) -> Result<()> {
        if !self.format.supports_multiple_routes() {
            return Err(CodecError::unsupported(format!(
                "{} cannot store multiple routes in one file",
                self.format.name()
            )));
        }

        info!(
            format = self.format.name(),
            routes = routes.len(),
            positions = ?routes.iter().map(Route::position_count).collect::<Vec<_>>(),
            "Writing routes"
        );

        let routes_to_write: Vec<Route> = routes
            .iter()
            .map(|route| self.prepare(route, false, None).0)
            .collect();

        target.write_routes(&self.format, &routes_to_write)
    }
}
