//! Hit-testing: corner handles are checked before the body they overlap.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geometry::{Direction, Geometry, Point};

/// Which part of the rectangle was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Handle(Direction),
}

/// Test which part of the rectangle (if any) is under `point`.
///
/// Handles are squares of half-side `handle_radius` centered on each corner.
/// They straddle the body's edges, so they are checked first.
#[must_use]
pub fn hit_test(point: Point, geometry: &Geometry, handle_radius: f64) -> Option<HitPart> {
    let handle = Direction::ALL.into_iter().find(|direction| {
        let corner = direction.corner_of(geometry);
        (point.x - corner.x).abs() <= handle_radius && (point.y - corner.y).abs() <= handle_radius
    });
    if let Some(direction) = handle {
        return Some(HitPart::Handle(direction));
    }

    geometry.contains(point).then_some(HitPart::Body)
}
