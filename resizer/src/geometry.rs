//! Geometry primitives and the resize/drag delta math.
//!
//! Everything here is pure. [`apply_delta`] is the single source of truth for
//! how a pointer delta moves edges; it never clamps. Callers decide whether
//! to run the result through [`clamp_resized`].

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::ParseDirectionError;

/// A pointer location in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of the rectangle. This is also the wire shape exchanged
/// with the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Sum of all four sides.
    #[must_use]
    pub fn perimeter(self) -> f64 {
        2.0 * (self.width + self.height)
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self { width: DEFAULT_WIDTH, height: DEFAULT_HEIGHT }
    }
}

/// Top-left corner of the rectangle. Free, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Dimensions and position together; the snapshot a gesture works from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub dimensions: Dimensions,
    pub position: Position,
}

impl Geometry {
    #[must_use]
    pub fn new(dimensions: Dimensions, position: Position) -> Self {
        Self { dimensions, position }
    }

    /// Whether `point` lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let Position { x, y } = self.position;
        let Dimensions { width, height } = self.dimensions;
        point.x >= x && point.x <= x + width && point.y >= y && point.y <= y + height
    }
}

/// Vertical half of a corner handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vertical {
    Top,
    Bottom,
}

/// Horizontal half of a corner handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizontal {
    Left,
    Right,
}

/// Identity of a resize handle, composed from independent axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
}

impl Direction {
    pub const TOP_LEFT: Self = Self { vertical: Vertical::Top, horizontal: Horizontal::Left };
    pub const TOP_RIGHT: Self = Self { vertical: Vertical::Top, horizontal: Horizontal::Right };
    pub const BOTTOM_LEFT: Self = Self { vertical: Vertical::Bottom, horizontal: Horizontal::Left };
    pub const BOTTOM_RIGHT: Self = Self { vertical: Vertical::Bottom, horizontal: Horizontal::Right };

    /// All four handles, in hit-test priority order.
    pub const ALL: [Self; 4] = [Self::TOP_LEFT, Self::TOP_RIGHT, Self::BOTTOM_LEFT, Self::BOTTOM_RIGHT];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match (self.vertical, self.horizontal) {
            (Vertical::Top, Horizontal::Left) => "top-left",
            (Vertical::Top, Horizontal::Right) => "top-right",
            (Vertical::Bottom, Horizontal::Left) => "bottom-left",
            (Vertical::Bottom, Horizontal::Right) => "bottom-right",
        }
    }

    /// The corner of `geometry` this handle sits on.
    #[must_use]
    pub fn corner_of(self, geometry: &Geometry) -> Point {
        let Position { x, y } = geometry.position;
        let Dimensions { width, height } = geometry.dimensions;
        let cx = match self.horizontal {
            Horizontal::Left => x,
            Horizontal::Right => x + width,
        };
        let cy = match self.vertical {
            Vertical::Top => y,
            Vertical::Bottom => y + height,
        };
        Point::new(cx, cy)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "top-left" => Ok(Self::TOP_LEFT),
            "top-right" => Ok(Self::TOP_RIGHT),
            "bottom-left" => Ok(Self::BOTTOM_LEFT),
            "bottom-right" => Ok(Self::BOTTOM_RIGHT),
            other => Err(ParseDirectionError(other.to_owned())),
        }
    }
}

/// Move edges of `snapshot` by a pointer delta.
///
/// With a direction, each axis of the handle adjusts exactly one edge:
/// `right`/`bottom` grow the size, `left`/`top` shrink it and shift the
/// position by the same amount. Without a direction the whole rectangle is
/// dragged and its dimensions are untouched.
#[must_use]
pub fn apply_delta(snapshot: Geometry, direction: Option<Direction>, dx: f64, dy: f64) -> Geometry {
    let Some(direction) = direction else {
        return Geometry {
            dimensions: snapshot.dimensions,
            position: Position::new(snapshot.position.x + dx, snapshot.position.y + dy),
        };
    };

    let mut next = snapshot;
    match direction.horizontal {
        Horizontal::Right => next.dimensions.width = snapshot.dimensions.width + dx,
        Horizontal::Left => {
            next.dimensions.width = snapshot.dimensions.width - dx;
            next.position.x = snapshot.position.x + dx;
        }
    }
    match direction.vertical {
        Vertical::Bottom => next.dimensions.height = snapshot.dimensions.height + dy,
        Vertical::Top => {
            next.dimensions.height = snapshot.dimensions.height - dy;
            next.position.y = snapshot.position.y + dy;
        }
    }
    next
}

/// Clamp a resize result to `min` on both axes.
///
/// When a `left` or `top` edge hits the minimum, the position is pinned so
/// the opposite edge stays where the snapshot had it. Drags pass through.
#[must_use]
pub fn clamp_resized(snapshot: Geometry, direction: Option<Direction>, resized: Geometry, min: f64) -> Geometry {
    let Some(direction) = direction else {
        return resized;
    };

    let mut clamped = resized;
    clamped.dimensions.width = resized.dimensions.width.max(min);
    clamped.dimensions.height = resized.dimensions.height.max(min);

    if direction.horizontal == Horizontal::Left {
        let right = snapshot.position.x + snapshot.dimensions.width;
        clamped.position.x = right - clamped.dimensions.width;
    }
    if direction.vertical == Vertical::Top {
        let bottom = snapshot.position.y + snapshot.dimensions.height;
        clamped.position.y = bottom - clamped.dimensions.height;
    }
    clamped
}

/// Clamp both dimensions to `min` without touching position.
#[must_use]
pub fn clamp_dimensions(dimensions: Dimensions, min: f64) -> Dimensions {
    Dimensions::new(dimensions.width.max(min), dimensions.height.max(min))
}
