//! Engine facade: the one object the host talks to.
//!
//! The host forwards raw pointer and field events and gets back a list of
//! [`Action`]s to carry out. Rendering reads [`Engine::view`]. Geometry
//! updates are optimistic: the store changes on every pointer move, and the
//! remote only hears about the result after the gesture ends and the quiet
//! period passes.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::future::Future;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::config::ResizerConfig;
use crate::error::{FieldError, SyncError};
use crate::fields::{Field, InputBinding};
use crate::geometry::{Dimensions, Direction, Point, Position};
use crate::gesture::{GestureController, PointerListeners};
use crate::hit::{HitPart, hit_test};
use crate::input::{Button, Cursor, GestureKind};
use crate::remote::RemoteStore;
use crate::store::DimensionStore;
use crate::sync::{SyncPipeline, SyncStatus};
use crate::view::View;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Geometry or status changed; re-read [`Engine::view`].
    RenderNeeded,
    SetCursor(Cursor),
    /// A debounced sync was (re)armed.
    SyncScheduled,
}

pub struct Engine {
    config: ResizerConfig,
    store: DimensionStore,
    gestures: GestureController,
    pipeline: SyncPipeline,
    fields: InputBinding,
    unmounted: bool,
}

impl Engine {
    #[must_use]
    pub fn new(config: ResizerConfig, remote: Rc<dyn RemoteStore>, listeners: Rc<dyn PointerListeners>) -> Self {
        let store = DimensionStore::new();
        let pipeline = SyncPipeline::new(store.clone(), remote, config.debounce);
        let gestures = GestureController::new(store.clone(), listeners, &config);
        let fields = InputBinding::new(store.clone(), pipeline.clone(), &config);
        Self { config, store, gestures, pipeline, fields, unmounted: false }
    }

    // --- Lifecycle ---

    /// Load the persisted dimensions.
    ///
    /// The returned future does not borrow the engine, so the host can spawn
    /// it and keep handling input while the fetch is outstanding.
    pub fn mount(&self) -> impl Future<Output = Result<Dimensions, SyncError>> + 'static {
        let pipeline = self.pipeline.clone();
        async move {
            let loaded = pipeline.load_initial().await;
            if let Err(e) = &loaded {
                warn!(error = %e, "initial fetch failed; keeping defaults");
            }
            loaded
        }
    }

    /// Run the pending sync now instead of waiting out the quiet period.
    pub fn flush(&self) -> impl Future<Output = Result<(), SyncError>> + 'static {
        let pipeline = self.pipeline.clone();
        async move { pipeline.flush().await }
    }

    /// Tear down: abandon any gesture without committing and stop the
    /// pipeline. Later input is ignored. Idempotent.
    pub fn unmount(&mut self) {
        if self.unmounted {
            return;
        }
        self.unmounted = true;
        let cancelled = self.gestures.cancel();
        self.pipeline.shutdown();
        debug!(cancelled, "engine unmounted");
    }

    // --- Input events ---

    /// Start a drag or resize depending on what `point` hits.
    pub fn on_pointer_down(&mut self, point: Point, button: Button) -> Vec<Action> {
        if self.unmounted || button != Button::Primary {
            return Vec::new();
        }
        match hit_test(point, &self.store.geometry(), self.config.handle_radius) {
            Some(HitPart::Body) => self.begin_drag(point),
            Some(HitPart::Handle(direction)) => self.begin_resize(direction, point),
            None => Vec::new(),
        }
    }

    pub fn begin_drag(&mut self, point: Point) -> Vec<Action> {
        self.begin(GestureKind::Drag, point)
    }

    pub fn begin_resize(&mut self, direction: Direction, point: Point) -> Vec<Action> {
        self.begin(GestureKind::Resize(direction), point)
    }

    /// Drive the active gesture, or update the hover cursor while idle.
    pub fn on_pointer_move(&mut self, point: Point) -> Vec<Action> {
        if self.unmounted {
            return Vec::new();
        }
        match self.gestures.update(point) {
            Some(_) => vec![Action::RenderNeeded],
            None => vec![Action::SetCursor(self.hover_cursor(point))],
        }
    }

    /// Commit the active gesture and schedule a sync.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        if self.unmounted {
            return Vec::new();
        }
        match self.gestures.end() {
            Some(committed) => {
                self.pipeline.request();
                debug!(
                    width = committed.dimensions.width,
                    height = committed.dimensions.height,
                    x = committed.position.x,
                    y = committed.position.y,
                    "gesture committed"
                );
                vec![Action::RenderNeeded, Action::SyncScheduled]
            }
            None => Vec::new(),
        }
    }

    /// Apply a typed width or height.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] if `text` is not a finite number; nothing changes.
    pub fn on_field_change(&mut self, field: Field, text: &str) -> Result<Vec<Action>, FieldError> {
        if self.unmounted {
            return Ok(Vec::new());
        }
        self.fields.on_change(field, text)?;
        Ok(vec![Action::RenderNeeded, Action::SyncScheduled])
    }

    // --- Queries ---

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.store.dimensions()
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.store.position()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.pipeline.error()
    }

    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.pipeline.in_flight()
    }

    #[must_use]
    pub fn sync_status(&self) -> SyncStatus {
        self.pipeline.status()
    }

    #[must_use]
    pub fn is_gesture_active(&self) -> bool {
        self.gestures.is_active()
    }

    #[must_use]
    pub fn view(&self) -> View {
        View::build(self.store.geometry(), &self.pipeline.status(), self.config.handle_radius)
    }

    // --- Internals ---

    fn begin(&mut self, kind: GestureKind, point: Point) -> Vec<Action> {
        if self.unmounted || !self.gestures.begin(kind, point) {
            return Vec::new();
        }
        vec![Action::SetCursor(kind.cursor())]
    }

    fn hover_cursor(&self, point: Point) -> Cursor {
        match hit_test(point, &self.store.geometry(), self.config.handle_radius) {
            Some(HitPart::Body) => Cursor::Move,
            Some(HitPart::Handle(direction)) => Cursor::for_direction(direction),
            None => Cursor::Default,
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.unmount();
    }
}
