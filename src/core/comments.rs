// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Generated descriptions for positions and route names.

use crate::core::route::{Position, Route};

/// Text generation for positions and routes that lack descriptions.
pub trait RouteComments: Send + Sync {
    /// Fill in missing position descriptions.
    fn comment_positions(&self, positions: &mut [Position]);

    /// Fill in a missing route name.
    fn comment_route_name(&self, route: &mut Route);

    /// Build a name for a slice of positions.
    fn create_route_name(&self, positions: &[Position]) -> String;
}

/// Numbers anonymous positions and names routes after their end points.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRouteComments;

impl DefaultRouteComments {
    fn describe(position: &Position) -> String {
        match &position.description {
            Some(d) if !d.trim().is_empty() => d.clone(),
            _ => format!("{:.6},{:.6}", position.longitude, position.latitude),
        }
    }
}

impl RouteComments for DefaultRouteComments {
    fn comment_positions(&self, positions: &mut [Position]) {
        for (index, position) in positions.iter_mut().enumerate() {
            let missing = position
                .description
                .as_deref()
                .map_or(true, |d| d.trim().is_empty());
            if missing {
                position.description = Some(format!("Position {}", index + 1));
            }
        }
    }

    fn comment_route_name(&self, route: &mut Route) {
        let missing = route.name().map_or(true, |n| n.trim().is_empty());
        if missing {
            let name = self.create_route_name(route.positions());
            route.set_name(name);
        }
    }

    fn create_route_name(&self, positions: &[Position]) -> String {
        match (positions.first(), positions.last()) {
            (Some(first), Some(last)) if positions.len() > 1 => {
                format!("{} to {}", Self::describe(first), Self::describe(last))
            }
            (Some(only), _) => Self::describe(only),
            _ => "Empty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::route::RouteCharacteristics;
    use crate::io::formats::CsvFormat;
    use std::sync::Arc;

    #[test]
    fn test_comment_positions_keeps_existing() {
        let mut positions = vec![
            Position::new(1.0, 1.0).with_description("Home"),
            Position::new(2.0, 2.0),
        ];
        DefaultRouteComments.comment_positions(&mut positions);
        assert_eq!(positions[0].description.as_deref(), Some("Home"));
        assert_eq!(positions[1].description.as_deref(), Some("Position 2"));
    }

    #[test]
    fn test_route_name_from_end_points() {
        let mut route = Route::new(
            Arc::new(CsvFormat::new()),
            RouteCharacteristics::Route,
            vec![
                Position::new(1.0, 1.0).with_description("Bremen"),
                Position::new(2.0, 2.0),
                Position::new(3.0, 3.0).with_description("Hamburg"),
            ],
        );
        DefaultRouteComments.comment_route_name(&mut route);
        assert_eq!(route.name(), Some("Bremen to Hamburg"));

        route.set_name("Kept");
        DefaultRouteComments.comment_route_name(&mut route);
        assert_eq!(route.name(), Some("Kept"));
    }

    #[test]
    fn test_create_route_name_edge_cases() {
        assert_eq!(DefaultRouteComments.create_route_name(&[]), "Empty");
        let single = [Position::new(8.5, 53.25)];
        assert_eq!(
            DefaultRouteComments.create_route_name(&single),
            "8.500000,53.250000"
        );
    }
}
