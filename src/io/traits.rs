// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core trait for navigation format codecs.
//!
//! Every supported file format implements [`FormatCodec`]. The trial reader,
//! the resolver and the chunked writer only ever talk to this trait; format
//! specific behavior is expressed through capability methods with defaults,
//! so a codec only overrides what applies to it.

use std::fmt;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

use crate::core::route::{Position, Route};
use crate::io::context::ParseContext;
use crate::{CodecError, Result};

/// Shared handle to a format codec.
pub type FormatRef = Arc<dyn FormatCodec>;

/// Trait for decoding and encoding one navigation file format.
///
/// # Example
///
/// ```no_run
/// use navcodec::io::traits::FormatCodec;
///
/// fn describe(format: &dyn FormatCodec) {
///     println!(
///         "{}: {} positions per file, multiple routes: {}",
///         format.name(),
///         format.max_positions_per_output(),
///         format.supports_multiple_routes()
///     );
/// }
/// ```
pub trait FormatCodec: Send + Sync {
    /// Human readable format name. Two codecs with the same name are the same format.
    fn name(&self) -> &str;

    /// File extensions (lowercase, without dot) this format is usually stored with.
    fn extensions(&self) -> &[&str] {
        &[]
    }

    /// Decode routes from `source` and add them to `context`.
    ///
    /// Adding no route and returning `Ok` means the input was well formed but empty.
    fn decode(&self, source: &mut dyn Read, context: &mut ParseContext) -> Result<()>;

    /// Encode the positions `start..end` of `route` to `target`.
    fn encode(&self, route: &Route, target: &mut dyn Write, start: usize, end: usize)
        -> Result<()>;

    /// Encode several routes into a single output.
    ///
    /// Only meaningful for formats that [support multiple routes](Self::supports_multiple_routes).
    fn encode_routes(&self, routes: &[Route], target: &mut dyn Write) -> Result<()> {
        let _ = (routes, target);
        Err(CodecError::unsupported(format!(
            "{} cannot store multiple routes in one file",
            self.name()
        )))
    }

    /// Maximum number of positions in one physical output.
    fn max_positions_per_output(&self) -> usize {
        usize::MAX
    }

    /// Whether one physical output can hold several logical routes.
    fn supports_multiple_routes(&self) -> bool {
        false
    }

    /// Whether this format delegates to an external converter and is held
    /// internally by a single-route container.
    fn is_single_route_via_external_converter(&self) -> bool {
        false
    }

    /// Whether consecutive positions with equal coordinates must be dropped before writing.
    fn removes_duplicate_positions(&self) -> bool {
        false
    }

    /// Position to insert in front of `route` when the first position is to be duplicated.
    ///
    /// `None` means this format has no duplicate-insertion rule.
    fn duplicate_first_position(&self, route: &Route) -> Option<Position> {
        let _ = route;
        None
    }

    /// Whether timestamps must be strictly increasing.
    fn requires_increasing_time(&self) -> bool {
        false
    }

    /// Whether routes originating from this format get a descriptive name per written fragment.
    fn names_route_fragments(&self) -> bool {
        false
    }

    /// Whether fragments written in this format from a route of `source` are renamed.
    fn renames_fragments_from(&self, source: &dyn FormatCodec) -> bool {
        source.names_route_fragments()
    }

    /// Whether this format writes into an existing file instead of a fresh output stream.
    fn modifies_target_in_place(&self) -> bool {
        false
    }

    /// Encode `start..end` of `route` into the existing file at `path`.
    fn encode_in_place(&self, route: &Route, path: &Path, start: usize, end: usize) -> Result<()> {
        let _ = (route, path, start, end);
        Err(CodecError::unsupported(format!(
            "{} does not modify files in place",
            self.name()
        )))
    }

    /// Format specific attribute translation applied when a route is converted to this format.
    fn adapt_route(&self, route: &mut Route) {
        let _ = route;
    }

    /// Whether this format can extract positions from the given URL text.
    fn parses_url(&self, url: &str) -> bool {
        let _ = url;
        false
    }
}

impl fmt::Debug for dyn FormatCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatCodec")
            .field("name", &self.name())
            .finish()
    }
}

/// Whether two codec handles denote the same format.
pub fn same_format(a: &FormatRef, b: &FormatRef) -> bool {
    Arc::ptr_eq(a, b) || a.name() == b.name()
}

/// Observer notified before each decode attempt.
pub trait ParserListener: Send + Sync {
    /// Called synchronously right before `format` tries to decode the input.
    fn on_attempting_format(&self, format: &FormatRef);
}

impl<F> ParserListener for F
where
    F: Fn(&FormatRef) + Send + Sync,
{
    fn on_attempting_format(&self, format: &FormatRef) {
        self(format)
    }
}
