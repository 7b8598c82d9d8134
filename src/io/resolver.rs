// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Picks one target format for a decoded set of routes and converts them to it.

use tracing::info;

use crate::core::comments::RouteComments;
use crate::core::route::{Route, RouteCharacteristics};
use crate::io::context::ParseContext;
use crate::io::traits::FormatRef;

/// A single target format and the routes converted to it.
#[derive(Debug, Clone)]
pub struct ResolvedResult {
    format: FormatRef,
    routes: Vec<Route>,
}

impl ResolvedResult {
    /// The format every route conforms to.
    pub fn format(&self) -> &FormatRef {
        &self.format
    }

    /// The converted routes, never empty.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Take ownership of the routes.
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }

    /// Position counts per route.
    pub fn position_counts(&self) -> Vec<usize> {
        self.routes.iter().map(Route::position_count).collect()
    }
}

/// Convert a copy of `route` to `format`.
pub fn as_format(route: &Route, format: &FormatRef) -> Route {
    let mut converted = route.clone();
    if !route.is_format(format) {
        converted.set_format(format.clone());
        format.adapt_route(&mut converted);
    }
    converted
}

/// Convert copies of all `routes` to `format`.
pub fn convert_routes(routes: &[Route], format: &FormatRef) -> Vec<Route> {
    routes.iter().map(|r| as_format(r, format)).collect()
}

/// Pick the format all `routes` are converted to, starting from `preferred`.
///
/// The candidate survives a route of a different format if it can hold
/// several routes, or if it is a single-route format produced through an
/// external converter. Otherwise `multi_route_default` takes over.
pub fn determine_format(
    routes: &[Route],
    preferred: &FormatRef,
    multi_route_default: &FormatRef,
) -> FormatRef {
    let mut result = preferred.clone();
    for route in routes {
        if route.is_format(&result) {
            continue;
        }
        if result.supports_multiple_routes() {
            continue;
        }
        if result.is_single_route_via_external_converter() {
            continue;
        }
        result = multi_route_default.clone();
    }
    result
}

/// Turns the outcome of a detection attempt into a [`ResolvedResult`].
pub struct RouteModelResolver<'a> {
    multi_route_default: FormatRef,
    comments: &'a dyn RouteComments,
}

impl<'a> RouteModelResolver<'a> {
    /// Create a resolver with the container used for heterogeneous routes.
    pub fn new(multi_route_default: FormatRef, comments: &'a dyn RouteComments) -> Self {
        Self {
            multi_route_default,
            comments,
        }
    }

    /// Resolve the routes in `context`.
    ///
    /// Returns `None` when no format was recorded.
    pub fn resolve(&self, context: ParseContext) -> Option<ResolvedResult> {
        let (source, formats) = context.into_parts();
        let preferred = formats.first()?;

        let format = determine_format(&source, preferred, &self.multi_route_default);
        let mut routes = convert_routes(&source, &format);
        info!(
            format = format.name(),
            routes = routes.len(),
            positions = ?routes.iter().map(Route::position_count).collect::<Vec<_>>(),
            "Detected format"
        );

        if routes.is_empty() {
            routes.push(Route::new(
                format.clone(),
                RouteCharacteristics::Route,
                Vec::new(),
            ));
        }

        for route in &mut routes {
            self.comments.comment_positions(route.positions_mut());
            self.comments.comment_route_name(route);
        }

        Some(ResolvedResult { format, routes })
    }
}
