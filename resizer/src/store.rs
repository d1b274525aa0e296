//! Canonical geometry store.
//!
//! `DimensionStore` is a cheap, cloneable handle to one shared cell. Every
//! clone sees every write immediately, so a task that was scheduled before a
//! write still reads the newest value when it finally runs. There are no
//! shadow copies: whoever needs the current geometry asks the store.
//!
//! The store is single-threaded (`Rc`/`RefCell`). Borrows never escape a
//! method, so no borrow can be held across an `.await` by callers.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::{Dimensions, Geometry, Position};

#[derive(Debug, Default)]
struct StoreState {
    geometry: Geometry,
    revision: u64,
    dimensions_revision: u64,
}

impl StoreState {
    fn write_dimensions(&mut self, dimensions: Dimensions) {
        if self.geometry.dimensions != dimensions {
            self.geometry.dimensions = dimensions;
            self.dimensions_revision += 1;
        }
    }
}

/// Shared handle to the current dimensions and position.
#[derive(Debug, Clone, Default)]
pub struct DimensionStore {
    inner: Rc<RefCell<StoreState>>,
}

impl DimensionStore {
    /// A store holding the default `100 x 50` rectangle at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_geometry(geometry: Geometry) -> Self {
        Self { inner: Rc::new(RefCell::new(StoreState { geometry, revision: 0, dimensions_revision: 0 })) }
    }

    // --- Reads ---

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.inner.borrow().geometry.dimensions
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.inner.borrow().geometry.position
    }

    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.inner.borrow().geometry
    }

    /// Number of writes since the store was created.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.inner.borrow().revision
    }

    /// Number of writes that actually changed the dimensions. Position-only
    /// writes (drags) leave it alone.
    #[must_use]
    pub fn dimensions_revision(&self) -> u64 {
        self.inner.borrow().dimensions_revision
    }

    // --- Writes ---

    pub fn set_dimensions(&self, dimensions: Dimensions) {
        let mut state = self.inner.borrow_mut();
        state.write_dimensions(dimensions);
        state.revision += 1;
    }

    pub fn set_position(&self, position: Position) {
        let mut state = self.inner.borrow_mut();
        state.geometry.position = position;
        state.revision += 1;
    }

    pub fn set_geometry(&self, geometry: Geometry) {
        let mut state = self.inner.borrow_mut();
        state.write_dimensions(geometry.dimensions);
        state.geometry.position = geometry.position;
        state.revision += 1;
    }

    /// Replace dimensions only if they have not changed since
    /// `dimensions_revision` was read.
    ///
    /// Returns whether the write happened. Used to apply a late initial fetch
    /// without clobbering a resize or field edit made while it was in flight.
    /// Moving the rectangle does not count as a change.
    pub fn set_dimensions_if_unchanged(&self, dimensions_revision: u64, dimensions: Dimensions) -> bool {
        let mut state = self.inner.borrow_mut();
        if state.dimensions_revision != dimensions_revision {
            return false;
        }
        state.write_dimensions(dimensions);
        state.revision += 1;
        true
    }
}
