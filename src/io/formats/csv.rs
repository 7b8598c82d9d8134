// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Plain position list stored as comma separated values.
//!
//! One position per line: `longitude,latitude,elevation,time,description`.
//! Only the coordinates are required. `time` is RFC 3339, or a bare time of
//! day that is placed on the date of the context's start time. Lines starting
//! with `#` are ignored. The route is named after the file it was read from.

use std::io::{Read, Write};
use std::sync::Arc;

use chrono::{DateTime, NaiveTime, Utc};

use crate::core::route::{Position, Route, RouteCharacteristics};
use crate::io::context::ParseContext;
use crate::io::traits::FormatCodec;
use crate::{CodecError, Result};

/// Single-route CSV position list.
#[derive(Debug, Clone)]
pub struct CsvFormat {
    name: String,
    max_positions: usize,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormat {
    /// Unlimited CSV format.
    pub fn new() -> Self {
        Self {
            name: "CSV".to_string(),
            max_positions: usize::MAX,
        }
    }

    /// CSV format limited to `max_positions` positions per file.
    pub fn with_max_positions(max_positions: usize) -> Self {
        Self {
            max_positions,
            ..Self::new()
        }
    }

    /// CSV format registered under another name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new()
        }
    }

    fn parse_coordinate(&self, field: Option<&str>, what: &str, limit: f64) -> Result<f64> {
        let field = field.unwrap_or_default();
        let value: f64 = field
            .parse()
            .map_err(|_| CodecError::decode(&self.name, format!("invalid {what} '{field}'")))?;
        if !value.is_finite() || value.abs() > limit {
            return Err(CodecError::decode(
                &self.name,
                format!("{what} {value} out of range"),
            ));
        }
        Ok(value)
    }

    fn parse_time(
        &self,
        time: &str,
        start_time: Option<DateTime<Utc>>,
    ) -> Result<Option<DateTime<Utc>>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(time) {
            return Ok(Some(parsed.with_timezone(&Utc)));
        }
        let time_of_day = NaiveTime::parse_from_str(time, "%H:%M:%S%.f")
            .map_err(|e| CodecError::decode(&self.name, format!("invalid time '{time}': {e}")))?;
        Ok(start_time.map(|start| start.date_naive().and_time(time_of_day).and_utc()))
    }

    fn parse_position(
        &self,
        record: &csv::StringRecord,
        start_time: Option<DateTime<Utc>>,
    ) -> Result<Position> {
        let longitude = self.parse_coordinate(record.get(0), "longitude", 180.0)?;
        let latitude = self.parse_coordinate(record.get(1), "latitude", 90.0)?;
        let mut position = Position::new(longitude, latitude);

        if let Some(elevation) = record.get(2).filter(|s| !s.is_empty()) {
            position.elevation = Some(elevation.parse().map_err(|_| {
                CodecError::decode(&self.name, format!("invalid elevation '{elevation}'"))
            })?);
        }
        if let Some(time) = record.get(3).filter(|s| !s.is_empty()) {
            position.time = self.parse_time(time, start_time)?;
        }
        if let Some(description) = record.get(4).filter(|s| !s.is_empty()) {
            position.description = Some(description.to_string());
        }
        Ok(position)
    }
}

impl FormatCodec for CsvFormat {
    fn name(&self) -> &str {
        &self.name
    }

    fn extensions(&self) -> &[&str] {
        &["csv"]
    }

    fn decode(&self, source: &mut dyn Read, context: &mut ParseContext) -> Result<()> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(source);

        let mut positions = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| CodecError::decode(&self.name, e.to_string()))?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            positions.push(self.parse_position(&record, context.start_time())?);
        }

        if !positions.is_empty() {
            let mut route = Route::new(
                Arc::new(self.clone()),
                RouteCharacteristics::Track,
                positions,
            );
            if let Some(stem) = context
                .source()
                .and_then(|path| path.file_stem())
                .and_then(|stem| stem.to_str())
            {
                route.set_name(stem);
            }
            context.add_route(route);
        }
        Ok(())
    }

    fn encode(
        &self,
        route: &Route,
        target: &mut dyn Write,
        start: usize,
        end: usize,
    ) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(target);

        for position in &route.positions()[start..end] {
            let elevation = position.elevation.map(|e| e.to_string()).unwrap_or_default();
            let time = position.time.map(|t| t.to_rfc3339()).unwrap_or_default();
            writer
                .write_record([
                    position.longitude.to_string(),
                    position.latitude.to_string(),
                    elevation,
                    time,
                    position.description.clone().unwrap_or_default(),
                ])
                .map_err(|e| CodecError::encode(&self.name, e.to_string()))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn max_positions_per_output(&self) -> usize {
        self.max_positions
    }

    fn names_route_fragments(&self) -> bool {
        true
    }
}
