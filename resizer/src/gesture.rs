//! Pointer gesture controller: Idle → Active → Idle.
//!
//! DESIGN
//! ======
//! A gesture is one pointer-down-to-pointer-up interaction on the body
//! (drag) or a corner handle (resize). Once it starts, the pointer may leave
//! the rectangle, so the host tracks it with process-wide move/up listeners.
//! Those listeners are a single-owner resource: the active session holds a
//! [`PointerCapture`] guard that attaches them on creation and detaches them
//! on drop. Every way out of `Active` (pointer-up, cancel, dropping the
//! controller at unmount) drops the guard, so detach runs exactly once per
//! gesture and listeners never pile up.
//!
//! A pointer-down while a gesture is active is ignored; the first gesture's
//! listeners stay authoritative until its own pointer-up.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::config::ResizerConfig;
use crate::geometry::{Geometry, Point, clamp_resized};
use crate::input::{GestureKind, GestureSession};
use crate::store::DimensionStore;

/// Host hook for the document-level pointer move/up listener pair.
pub trait PointerListeners {
    /// Start routing global pointer move/up events to the engine.
    fn attach(&self);
    /// Stop routing them.
    fn detach(&self);
}

/// Scoped ownership of the global pointer listeners.
///
/// Attaches on [`PointerCapture::acquire`], detaches on drop.
pub struct PointerCapture {
    listeners: Rc<dyn PointerListeners>,
}

impl PointerCapture {
    #[must_use]
    pub fn acquire(listeners: Rc<dyn PointerListeners>) -> Self {
        listeners.attach();
        Self { listeners }
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        self.listeners.detach();
    }
}

impl fmt::Debug for PointerCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PointerCapture")
    }
}

/// Gesture state. `Active` owns the listener capture for its lifetime.
#[derive(Debug, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A drag or resize is in progress.
    Active {
        session: GestureSession,
        capture: PointerCapture,
    },
}

/// Owns the lifecycle of one gesture at a time and writes its live geometry
/// into the store.
pub struct GestureController {
    store: DimensionStore,
    listeners: Rc<dyn PointerListeners>,
    /// Minimum size for resize results, when the clamp policy covers gestures.
    min_size: Option<f64>,
    state: InputState,
}

impl GestureController {
    #[must_use]
    pub fn new(store: DimensionStore, listeners: Rc<dyn PointerListeners>, config: &ResizerConfig) -> Self {
        let min_size = config.clamp.clamps_gestures().then_some(config.min_size);
        Self { store, listeners, min_size, state: InputState::Idle }
    }

    /// Idle → Active. Snapshots the store and captures the pointer.
    ///
    /// Returns `false` (and changes nothing) if a gesture is already active.
    pub fn begin(&mut self, kind: GestureKind, pointer: Point) -> bool {
        if self.is_active() {
            debug!(?kind, "pointer-down ignored; gesture already active");
            return false;
        }
        let session = GestureSession::new(kind, pointer, self.store.geometry());
        let capture = PointerCapture::acquire(Rc::clone(&self.listeners));
        debug!(?kind, x = pointer.x, y = pointer.y, "gesture started");
        self.state = InputState::Active { session, capture };
        true
    }

    /// Apply a pointer move to the store. No-op while idle.
    pub fn update(&mut self, pointer: Point) -> Option<Geometry> {
        let InputState::Active { session, .. } = &self.state else {
            return None;
        };
        let resized = session.geometry_at(pointer);
        let next = match self.min_size {
            Some(min) => clamp_resized(session.snapshot, session.kind.direction(), resized, min),
            None => resized,
        };
        self.store.set_geometry(next);
        Some(next)
    }

    /// Active → Idle. Releases the capture and returns the geometry to commit.
    pub fn end(&mut self) -> Option<Geometry> {
        match std::mem::take(&mut self.state) {
            InputState::Active { session, capture } => {
                drop(capture);
                let committed = self.store.geometry();
                debug!(kind = ?session.kind, "gesture ended");
                Some(committed)
            }
            InputState::Idle => None,
        }
    }

    /// Abandon the active gesture without committing. Returns whether one was active.
    pub fn cancel(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            InputState::Active { session, capture } => {
                drop(capture);
                debug!(kind = ?session.kind, "gesture cancelled");
                true
            }
            InputState::Idle => false,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, InputState::Active { .. })
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        match &self.state {
            InputState::Active { session, .. } => Some(session),
            InputState::Idle => None,
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
