// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use navcodec::core::comments::RouteComments;
use navcodec::io::ParseContext;
use navcodec::{CodecError, FormatCodec, FormatRef, Position, Result, Route, RouteCharacteristics};

// ============================================================================
// Mock Format
// ============================================================================

/// How a [`MockFormat`] reacts to input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeBehavior {
    /// Decode input that starts with the format's tag line
    Recognize,
    /// Always fail
    Fail,
    /// Always succeed without producing a route
    ZeroRoutes,
}

/// Line based test format.
///
/// Documents start with a line holding the format tag, followed by one
/// `lon,lat` line per position. Lines starting with `#` hold route names.
#[derive(Debug, Clone)]
pub struct MockFormat {
    pub name: String,
    pub behavior: DecodeBehavior,
    pub max_positions: usize,
    pub multiple_routes: bool,
    pub external_converter: bool,
    pub removes_duplicates: bool,
    pub duplicates_first: bool,
    pub increasing_time: bool,
    pub names_fragments: bool,
    pub in_place: bool,
}

impl MockFormat {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            behavior: DecodeBehavior::Recognize,
            max_positions: usize::MAX,
            multiple_routes: false,
            external_converter: false,
            removes_duplicates: false,
            duplicates_first: false,
            increasing_time: false,
            names_fragments: false,
            in_place: false,
        }
    }

    pub fn failing(mut self) -> Self {
        self.behavior = DecodeBehavior::Fail;
        self
    }

    pub fn zero_routes(mut self) -> Self {
        self.behavior = DecodeBehavior::ZeroRoutes;
        self
    }

    pub fn max_positions(mut self, max: usize) -> Self {
        self.max_positions = max;
        self
    }

    pub fn multi_route(mut self) -> Self {
        self.multiple_routes = true;
        self
    }

    pub fn external_converter(mut self) -> Self {
        self.external_converter = true;
        self
    }

    pub fn removes_duplicates(mut self) -> Self {
        self.removes_duplicates = true;
        self
    }

    pub fn duplicates_first(mut self) -> Self {
        self.duplicates_first = true;
        self
    }

    pub fn increasing_time(mut self) -> Self {
        self.increasing_time = true;
        self
    }

    pub fn names_fragments(mut self) -> Self {
        self.names_fragments = true;
        self
    }

    pub fn in_place(mut self) -> Self {
        self.in_place = true;
        self
    }

    pub fn into_ref(self) -> FormatRef {
        Arc::new(self)
    }

    fn write_route(&self, route: &Route, target: &mut dyn Write, start: usize, end: usize) -> Result<()> {
        if let Some(name) = route.name() {
            writeln!(target, "# {name}")?;
        }
        for position in &route.positions()[start..end] {
            writeln!(target, "{},{}", position.longitude, position.latitude)?;
        }
        Ok(())
    }
}

impl FormatCodec for MockFormat {
    fn name(&self) -> &str {
        &self.name
    }

    fn extensions(&self) -> &[&str] {
        &["mock"]
    }

    fn decode(&self, source: &mut dyn Read, context: &mut ParseContext) -> Result<()> {
        let mut text = String::new();
        source.read_to_string(&mut text)?;

        match self.behavior {
            DecodeBehavior::Fail => return Err(CodecError::decode(&self.name, "always fails")),
            DecodeBehavior::ZeroRoutes => return Ok(()),
            DecodeBehavior::Recognize => {}
        }

        let mut lines = text.lines();
        if lines.next() != Some(self.name.as_str()) {
            return Err(CodecError::decode(&self.name, "missing tag"));
        }

        let mut route: Option<Route> = None;
        for line in lines {
            if let Some(name) = line.strip_prefix("# ") {
                if let Some(done) = route.take() {
                    context.add_route(done);
                }
                route = Some(
                    Route::new(self.clone().into_ref(), RouteCharacteristics::Track, Vec::new())
                        .with_name(name),
                );
                continue;
            }
            let (lon, lat) = line
                .split_once(',')
                .ok_or_else(|| CodecError::decode(&self.name, "bad line"))?;
            let position = Position::new(
                lon.parse().map_err(|_| CodecError::decode(&self.name, "bad longitude"))?,
                lat.parse().map_err(|_| CodecError::decode(&self.name, "bad latitude"))?,
            );
            route
                .get_or_insert_with(|| {
                    Route::new(self.clone().into_ref(), RouteCharacteristics::Track, Vec::new())
                })
                .add(position);
        }
        if let Some(done) = route {
            context.add_route(done);
        }
        Ok(())
    }

    fn encode(&self, route: &Route, target: &mut dyn Write, start: usize, end: usize) -> Result<()> {
        writeln!(target, "{}", self.name)?;
        self.write_route(route, target, start, end)
    }

    fn encode_routes(&self, routes: &[Route], target: &mut dyn Write) -> Result<()> {
        if !self.multiple_routes {
            return Err(CodecError::unsupported("multiple routes"));
        }
        writeln!(target, "{}", self.name)?;
        for route in routes {
            self.write_route(route, target, 0, route.position_count())?;
        }
        Ok(())
    }

    fn max_positions_per_output(&self) -> usize {
        self.max_positions
    }

    fn supports_multiple_routes(&self) -> bool {
        self.multiple_routes
    }

    fn is_single_route_via_external_converter(&self) -> bool {
        self.external_converter
    }

    fn removes_duplicate_positions(&self) -> bool {
        self.removes_duplicates
    }

    fn duplicate_first_position(&self, route: &Route) -> Option<Position> {
        if !self.duplicates_first {
            return None;
        }
        route
            .positions()
            .first()
            .map(|p| Position::new(p.longitude, p.latitude).with_description("Start"))
    }

    fn requires_increasing_time(&self) -> bool {
        self.increasing_time
    }

    fn names_route_fragments(&self) -> bool {
        self.names_fragments
    }

    fn modifies_target_in_place(&self) -> bool {
        self.in_place
    }

    fn encode_in_place(&self, route: &Route, path: &Path, start: usize, end: usize) -> Result<()> {
        let mut file = OpenOptions::new().append(true).open(path)?;
        self.write_route(route, &mut file, start, end)
    }
}

// ============================================================================
// Route Helpers
// ============================================================================

/// Route of `n` positions on the diagonal, owned by `format`.
pub fn diagonal_route(format: &FormatRef, n: usize) -> Route {
    Route::new(
        format.clone(),
        RouteCharacteristics::Track,
        (0..n)
            .map(|i| Position::new(i as f64 * 0.5, i as f64 * 0.25))
            .collect(),
    )
}

/// Mock document for `tag` with the given coordinates.
pub fn mock_document(tag: &str, coordinates: &[(f64, f64)]) -> String {
    let mut text = format!("{tag}\n");
    for (lon, lat) in coordinates {
        text.push_str(&format!("{lon},{lat}\n"));
    }
    text
}

/// Parse the positions back out of a mock document, skipping tag and names.
pub fn mock_coordinates(text: &str) -> Vec<(f64, f64)> {
    text.lines()
        .skip(1)
        .filter(|l| !l.starts_with('#'))
        .filter_map(|l| {
            let (lon, lat) = l.split_once(',')?;
            Some((lon.parse().ok()?, lat.parse().ok()?))
        })
        .collect()
}

// ============================================================================
// Output Helpers
// ============================================================================

/// Cloneable in-memory output.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// Counting Comments
// ============================================================================

/// Route comments that count how often each pass runs.
#[derive(Debug, Default)]
pub struct CountingComments {
    pub position_passes: Mutex<usize>,
    pub name_passes: Mutex<usize>,
}

impl RouteComments for CountingComments {
    fn comment_positions(&self, positions: &mut [Position]) {
        *self.position_passes.lock().unwrap() += 1;
        for position in positions {
            position.description = Some("commented".to_string());
        }
    }

    fn comment_route_name(&self, route: &mut Route) {
        *self.name_passes.lock().unwrap() += 1;
        let name = self.create_route_name(route.positions());
        route.set_name(name);
    }

    fn create_route_name(&self, positions: &[Position]) -> String {
        format!("{} positions", positions.len())
    }
}
