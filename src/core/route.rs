// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Unified in-memory route model.
//!
//! Every decoder produces [`Route`]s made of [`Position`]s, and every encoder
//! consumes them. A route always knows which format it currently conforms to.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::io::traits::FormatRef;

/// A single point of a route, track or waypoint list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Longitude in degrees
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
    /// Elevation in meters
    pub elevation: Option<f64>,
    /// Timestamp
    pub time: Option<DateTime<Utc>>,
    /// Free text description
    pub description: Option<String>,
}

impl Position {
    /// Create a position from coordinates only.
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            elevation: None,
            time: None,
            description: None,
        }
    }

    /// Set the elevation.
    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    /// Set the timestamp.
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether both positions share longitude, latitude and elevation.
    pub fn has_same_coordinates(&self, other: &Position) -> bool {
        self.longitude == other.longitude
            && self.latitude == other.latitude
            && self.elevation == other.elevation
    }
}

/// Semantic category of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteCharacteristics {
    /// Planned path
    Route,
    /// Recorded trace
    Track,
    /// Unordered point list
    Waypoints,
}

impl fmt::Display for RouteCharacteristics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteCharacteristics::Route => write!(f, "route"),
            RouteCharacteristics::Track => write!(f, "track"),
            RouteCharacteristics::Waypoints => write!(f, "waypoints"),
        }
    }
}

impl std::str::FromStr for RouteCharacteristics {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "route" | "rte" => Ok(RouteCharacteristics::Route),
            "track" | "trk" => Ok(RouteCharacteristics::Track),
            "waypoints" | "wpt" => Ok(RouteCharacteristics::Waypoints),
            _ => Err(()),
        }
    }
}

/// An ordered sequence of positions conforming to one format.
#[derive(Clone)]
pub struct Route {
    format: FormatRef,
    characteristics: RouteCharacteristics,
    name: Option<String>,
    positions: Vec<Position>,
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("format", &self.format.name())
            .field("characteristics", &self.characteristics)
            .field("name", &self.name)
            .field("positions", &self.positions.len())
            .finish()
    }
}

impl Route {
    /// Create a new route owned by `format`.
    pub fn new(
        format: FormatRef,
        characteristics: RouteCharacteristics,
        positions: Vec<Position>,
    ) -> Self {
        Self {
            format,
            characteristics,
            name: None,
            positions,
        }
    }

    /// Set the route name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The format this route currently conforms to.
    pub fn format(&self) -> &FormatRef {
        &self.format
    }

    /// Whether this route conforms to `format`.
    pub fn is_format(&self, format: &FormatRef) -> bool {
        crate::io::traits::same_format(&self.format, format)
    }

    pub(crate) fn set_format(&mut self, format: FormatRef) {
        self.format = format;
    }

    /// Semantic category of this route.
    pub fn characteristics(&self) -> RouteCharacteristics {
        self.characteristics
    }

    /// Change the semantic category.
    pub fn set_characteristics(&mut self, characteristics: RouteCharacteristics) {
        self.characteristics = characteristics;
    }

    /// Route name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Replace the route name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// All positions in order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Mutable access to the positions.
    pub fn positions_mut(&mut self) -> &mut Vec<Position> {
        &mut self.positions
    }

    /// Number of positions.
    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// Whether the route has no positions.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Append a position.
    pub fn add(&mut self, position: Position) {
        self.positions.push(position);
    }

    /// Insert a position at `index`.
    pub fn insert(&mut self, index: usize, position: Position) {
        self.positions.insert(index, position);
    }

    /// Remove the position at `index`, if it exists.
    pub fn remove(&mut self, index: usize) -> Option<Position> {
        (index < self.positions.len()).then(|| self.positions.remove(index))
    }

    /// Remove consecutive positions with identical coordinates.
    ///
    /// Returns the number of removed positions.
    pub fn remove_duplicates(&mut self) -> usize {
        let before = self.positions.len();
        self.positions.dedup_by(|b, a| a.has_same_coordinates(b));
        before - self.positions.len()
    }

    /// Make timestamps strictly increasing.
    ///
    /// A timestamp that is not later than its predecessor is moved to one
    /// second after it. Positions without a timestamp are left alone.
    pub fn ensure_increasing_time(&mut self) {
        let mut previous: Option<DateTime<Utc>> = None;
        for position in &mut self.positions {
            let Some(time) = position.time else {
                continue;
            };
            let time = match previous {
                Some(prev) if time <= prev => {
                    let bumped = prev + Duration::seconds(1);
                    position.time = Some(bumped);
                    bumped
                }
                _ => time,
            };
            previous = Some(time);
        }
    }
}
