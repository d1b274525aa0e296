//! Input model: mouse buttons, cursors, and the gesture session.
//!
//! `GestureKind` captures what a pointer-down grabbed (the body or one of the
//! corner handles). `GestureSession` is everything needed to turn later
//! pointer positions into geometry: where the pointer started and the
//! geometry at that moment. Sessions are created at pointer-down, dropped at
//! pointer-up, and never persisted.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::{Direction, Geometry, Horizontal, Point, Vertical, apply_delta};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Pointer cursor the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    /// Over the body, or while dragging it.
    Move,
    /// Top-left / bottom-right handles.
    NwseResize,
    /// Top-right / bottom-left handles.
    NeswResize,
}

impl Cursor {
    /// CSS `cursor` value.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Move => "move",
            Self::NwseResize => "nwse-resize",
            Self::NeswResize => "nesw-resize",
        }
    }

    /// Cursor for a resize handle.
    #[must_use]
    pub fn for_direction(direction: Direction) -> Self {
        match (direction.vertical, direction.horizontal) {
            (Vertical::Top, Horizontal::Left) | (Vertical::Bottom, Horizontal::Right) => Self::NwseResize,
            (Vertical::Top, Horizontal::Right) | (Vertical::Bottom, Horizontal::Left) => Self::NeswResize,
        }
    }
}

/// What a gesture is manipulating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Moving the whole rectangle by its body.
    Drag,
    /// Resizing from one corner handle.
    Resize(Direction),
}

impl GestureKind {
    /// The handle being dragged, or `None` for a body drag.
    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Drag => None,
            Self::Resize(direction) => Some(direction),
        }
    }

    #[must_use]
    pub fn cursor(self) -> Cursor {
        match self {
            Self::Drag => Cursor::Move,
            Self::Resize(direction) => Cursor::for_direction(direction),
        }
    }
}

/// State captured at pointer-down for one gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Drag or resize, and which handle.
    pub kind: GestureKind,
    /// Pointer position at pointer-down.
    pub start: Point,
    /// Dimensions and position at pointer-down.
    pub snapshot: Geometry,
}

impl GestureSession {
    #[must_use]
    pub fn new(kind: GestureKind, start: Point, snapshot: Geometry) -> Self {
        Self { kind, start, snapshot }
    }

    /// Pointer travel since pointer-down.
    #[must_use]
    pub fn delta(&self, pointer: Point) -> (f64, f64) {
        (pointer.x - self.start.x, pointer.y - self.start.y)
    }

    /// Unclamped geometry for the pointer at `pointer`.
    #[must_use]
    pub fn geometry_at(&self, pointer: Point) -> Geometry {
        let (dx, dy) = self.delta(pointer);
        apply_delta(self.snapshot, self.kind.direction(), dx, dy)
    }
}
