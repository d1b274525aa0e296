//! Display model handed to the host renderer.
//!
//! The host never reads the store or the pipeline directly; it renders a
//! [`View`] and nothing else.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use crate::geometry::{Dimensions, Direction, Geometry, Position};
use crate::input::Cursor;
use crate::sync::SyncStatus;

/// Rectangle fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Normal,
    /// An error message is being shown.
    Error,
}

impl Fill {
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Normal => "lightblue",
            Self::Error => "lightcoral",
        }
    }
}

/// Status line above the rectangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Validating,
    Error(String),
}

impl Banner {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Validating => "Validating...",
            Self::Error(message) => message,
        }
    }
}

/// One corner handle, positioned relative to the rectangle's top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleView {
    pub direction: Direction,
    pub left: f64,
    pub top: f64,
    pub size: f64,
    pub cursor: Cursor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub perimeter_label: String,
    pub fill: Fill,
    /// Validating and error banners can both be up; validating comes first.
    pub banners: Vec<Banner>,
    pub aria_label: String,
    pub cursor: Cursor,
    pub handles: [HandleView; 4],
}

impl View {
    #[must_use]
    pub fn build(geometry: Geometry, status: &SyncStatus, handle_radius: f64) -> Self {
        let Geometry { dimensions, position } = geometry;

        let mut banners = Vec::new();
        if status.in_flight {
            banners.push(Banner::Validating);
        }
        if let Some(message) = &status.error {
            banners.push(Banner::Error(message.clone()));
        }

        let size = handle_radius * 2.0;
        let handles = Direction::ALL.map(|direction| {
            let corner = direction.corner_of(&Geometry::new(dimensions, Position::default()));
            HandleView {
                direction,
                left: corner.x - handle_radius,
                top: corner.y - handle_radius,
                size,
                cursor: Cursor::for_direction(direction),
            }
        });

        Self {
            left: position.x,
            top: position.y,
            width: dimensions.width,
            height: dimensions.height,
            perimeter_label: perimeter_label(dimensions),
            fill: if status.error.is_some() { Fill::Error } else { Fill::Normal },
            banners,
            aria_label: format!(
                "Rectangle at {}, {} with width {}px and height {}px",
                position.x, position.y, dimensions.width, dimensions.height
            ),
            cursor: Cursor::Move,
            handles,
        }
    }

    /// The banner with the highest priority, if any.
    #[must_use]
    pub fn banner(&self) -> Option<&Banner> {
        self.banners.first()
    }
}

#[must_use]
pub fn perimeter_label(dimensions: Dimensions) -> String {
    format!("Perimeter: {} px", dimensions.perimeter())
}
