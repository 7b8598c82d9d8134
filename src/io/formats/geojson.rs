// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! GeoJSON feature collections.
//!
//! Routes and tracks are `LineString` features, waypoint lists are
//! `MultiPoint` features. Per-position timestamps and descriptions are kept
//! in parallel arrays in the feature properties. Any number of routes fits in
//! one file, which makes this the default container for mixed results.

use std::io::{Read, Write};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::route::{Position, Route, RouteCharacteristics};
use crate::io::context::ParseContext;
use crate::io::traits::FormatCodec;
use crate::{CodecError, Result};

const FEATURE_COLLECTION: &str = "FeatureCollection";
const FEATURE: &str = "Feature";
const LINE_STRING: &str = "LineString";
const MULTI_POINT: &str = "MultiPoint";

#[derive(Debug, Serialize, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: String,
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Serialize, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: serde_json::Value,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Properties {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    characteristics: Option<RouteCharacteristics>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    times: Vec<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    descriptions: Vec<Option<String>>,
}

/// Multi-route GeoJSON format.
#[derive(Debug, Clone, Default)]
pub struct GeoJsonFormat;

impl GeoJsonFormat {
    /// Create the format.
    pub fn new() -> Self {
        Self
    }

    fn feature(route: &Route, start: usize, end: usize) -> Feature {
        let positions = &route.positions()[start..end];
        let coordinates: Vec<Vec<f64>> = positions
            .iter()
            .map(|p| match p.elevation {
                Some(e) => vec![p.longitude, p.latitude, e],
                None => vec![p.longitude, p.latitude],
            })
            .collect();

        let kind = match route.characteristics() {
            RouteCharacteristics::Waypoints => MULTI_POINT,
            RouteCharacteristics::Route | RouteCharacteristics::Track => LINE_STRING,
        };

        let times = if positions.iter().any(|p| p.time.is_some()) {
            positions.iter().map(|p| p.time).collect()
        } else {
            Vec::new()
        };
        let descriptions = if positions.iter().any(|p| p.description.is_some()) {
            positions.iter().map(|p| p.description.clone()).collect()
        } else {
            Vec::new()
        };

        Feature {
            kind: FEATURE.to_string(),
            geometry: Some(Geometry {
                kind: kind.to_string(),
                coordinates: serde_json::json!(coordinates),
            }),
            properties: Properties {
                name: route.name().map(str::to_string),
                characteristics: Some(route.characteristics()),
                times,
                descriptions,
            },
        }
    }

    fn route(&self, feature: Feature) -> Result<Option<Route>> {
        let Some(geometry) = feature.geometry else {
            return Ok(None);
        };
        let default_characteristics = match geometry.kind.as_str() {
            LINE_STRING => RouteCharacteristics::Track,
            MULTI_POINT => RouteCharacteristics::Waypoints,
            other => {
                debug!(geometry = other, "Skipping unsupported GeoJSON geometry");
                return Ok(None);
            }
        };

        let coordinates: Vec<Vec<f64>> = serde_json::from_value(geometry.coordinates)
            .map_err(|e| CodecError::decode(self.name(), e.to_string()))?;

        let properties = feature.properties;
        let mut positions = Vec::with_capacity(coordinates.len());
        for (index, coordinate) in coordinates.into_iter().enumerate() {
            let [longitude, latitude, rest @ ..] = coordinate.as_slice() else {
                return Err(CodecError::decode(
                    self.name(),
                    format!("position {index} has fewer than two coordinates"),
                ));
            };
            let mut position = Position::new(*longitude, *latitude);
            position.elevation = rest.first().copied();
            position.time = properties.times.get(index).copied().flatten();
            position.description = properties.descriptions.get(index).cloned().flatten();
            positions.push(position);
        }

        let mut route = Route::new(
            Arc::new(self.clone()),
            properties.characteristics.unwrap_or(default_characteristics),
            positions,
        );
        if let Some(name) = properties.name {
            route.set_name(name);
        }
        Ok(Some(route))
    }

    fn write_collection(&self, features: Vec<Feature>, target: &mut dyn Write) -> Result<()> {
        let collection = FeatureCollection {
            kind: FEATURE_COLLECTION.to_string(),
            features,
        };
        serde_json::to_writer_pretty(&mut *target, &collection)
            .map_err(|e| CodecError::encode(self.name(), e.to_string()))?;
        target.write_all(b"\n")?;
        Ok(())
    }
}

impl FormatCodec for GeoJsonFormat {
    fn name(&self) -> &str {
        "GeoJSON"
    }

    fn extensions(&self) -> &[&str] {
        &["geojson", "json"]
    }

    fn decode(&self, source: &mut dyn Read, context: &mut ParseContext) -> Result<()> {
        let collection: FeatureCollection = serde_json::from_reader(source)
            .map_err(|e| CodecError::decode(self.name(), e.to_string()))?;
        if collection.kind != FEATURE_COLLECTION {
            return Err(CodecError::decode(
                self.name(),
                format!("expected {FEATURE_COLLECTION}, found {}", collection.kind),
            ));
        }

        let mut routes = Vec::new();
        for feature in collection.features {
            if let Some(route) = self.route(feature)? {
                routes.push(route);
            }
        }
        context.append_routes(routes);
        Ok(())
    }

    fn encode(
        &self,
        route: &Route,
        target: &mut dyn Write,
        start: usize,
        end: usize,
    ) -> Result<()> {
        self.write_collection(vec![Self::feature(route, start, end)], target)
    }

    fn encode_routes(&self, routes: &[Route], target: &mut dyn Write) -> Result<()> {
        let features = routes
            .iter()
            .map(|r| Self::feature(r, 0, r.position_count()))
            .collect();
        self.write_collection(features, target)
    }

    fn supports_multiple_routes(&self) -> bool {
        true
    }
}
