//! Sync pipeline: debounced validate-then-update against the remote store.
//!
//! DESIGN
//! ======
//! Gestures and field edits both call [`SyncPipeline::request`]. Each call
//! re-arms a single-slot debounce timer; arming aborts whatever timer was
//! pending. When the quiet period finally elapses the pipeline reads the
//! store *at that moment* and issues one round trip: `validate`, then
//! `update` only if validate succeeded.
//!
//! STALE RESPONSES
//! ===============
//! Round trips are never cancelled on the wire, so an older one can resolve
//! after a newer one was issued. Every issued round trip takes the next
//! sequence number; its outcome is applied only if that number is still the
//! latest. Anything else is discarded without touching the status.
//!
//! INITIAL FETCH
//! =============
//! While the initial fetch is outstanding, an elapsed timer does not issue a
//! round trip. It is held until the fetch settles, so the round trip carries
//! the fetched dimensions instead of the defaults they replace.
//!
//! ERROR HANDLING
//! ==============
//! Failures are informational. The geometry is never rolled back and nothing
//! is retried; the next issued request clears the error.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::SyncError;
use crate::geometry::Dimensions;
use crate::remote::RemoteStore;
use crate::store::DimensionStore;

/// What the UI shows about the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStatus {
    /// A validate/update round trip is outstanding.
    pub in_flight: bool,
    /// The initial fetch is outstanding.
    pub loading: bool,
    /// Message from the latest failed round trip, until the next request.
    pub error: Option<String>,
}

/// Single-slot timer handle. Arming replaces and aborts the previous timer.
#[derive(Debug, Default)]
struct DebounceTimer {
    pending: Option<JoinHandle<()>>,
}

impl DebounceTimer {
    fn arm(&mut self, handle: JoinHandle<()>) {
        if let Some(previous) = self.pending.replace(handle) {
            previous.abort();
        }
    }

    /// Abort the pending timer. Returns whether one was still waiting.
    fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    fn is_armed(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

struct PipelineInner {
    store: DimensionStore,
    remote: Rc<dyn RemoteStore>,
    quiet_period: Duration,
    timer: RefCell<DebounceTimer>,
    latest_seq: Cell<u64>,
    /// A timer elapsed while the initial fetch was outstanding.
    deferred: Cell<bool>,
    status: RefCell<SyncStatus>,
}

/// Cloneable handle to the pipeline. Clones share one timer and one sequence.
#[derive(Clone)]
pub struct SyncPipeline {
    inner: Rc<PipelineInner>,
}

impl SyncPipeline {
    #[must_use]
    pub fn new(store: DimensionStore, remote: Rc<dyn RemoteStore>, quiet_period: Duration) -> Self {
        Self {
            inner: Rc::new(PipelineInner {
                store,
                remote,
                quiet_period,
                timer: RefCell::new(DebounceTimer::default()),
                latest_seq: Cell::new(0),
                deferred: Cell::new(false),
                status: RefCell::new(SyncStatus::default()),
            }),
        }
    }

    // --- Producers ---

    /// Note that the geometry changed. Collapses with other requests made
    /// within the quiet period into one round trip.
    ///
    /// Must be called from inside a [`tokio::task::LocalSet`].
    pub fn request(&self) {
        let pipeline = self.clone();
        let quiet_period = self.inner.quiet_period;
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep(quiet_period).await;
            pipeline.fire();
        });
        self.inner.timer.borrow_mut().arm(handle);
    }

    /// Skip the quiet period: cancel any pending timer and run a round trip
    /// for the current dimensions now, returning its outcome.
    ///
    /// # Errors
    ///
    /// Returns the validation or update failure of this round trip.
    pub async fn flush(&self) -> Result<(), SyncError> {
        self.inner.timer.borrow_mut().cancel();
        let (seq, dimensions) = self.issue();
        let outcome = round_trip(self.inner.remote.as_ref(), dimensions).await;
        self.settle(seq, outcome.clone());
        outcome
    }

    /// Load the persisted dimensions into the store.
    ///
    /// The result is only written if the dimensions were not edited while the
    /// fetch was in flight; moving the rectangle does not count. A failure is
    /// reported unless a round trip was issued meanwhile. A sync requested
    /// during the fetch is issued once it settles.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Fetch`] if the remote could not be read.
    pub async fn load_initial(&self) -> Result<Dimensions, SyncError> {
        let dimensions_revision = self.inner.store.dimensions_revision();
        let seq = self.inner.latest_seq.get();
        self.inner.status.borrow_mut().loading = true;

        let fetched = self.inner.remote.fetch_initial().await.map_err(SyncError::Fetch);
        if let Ok(dimensions) = &fetched {
            if !self.inner.store.set_dimensions_if_unchanged(dimensions_revision, *dimensions) {
                debug!("initial fetch superseded by a local edit; keeping local dimensions");
            }
        }

        {
            let mut status = self.inner.status.borrow_mut();
            status.loading = false;
            if let Err(e) = &fetched {
                if seq == self.inner.latest_seq.get() {
                    status.error = Some(e.display_message());
                } else {
                    debug!(error = %e, "initial fetch failure superseded by a newer sync");
                }
            }
        }

        if self.inner.deferred.replace(false) {
            debug!("issuing sync held back by the initial fetch");
            self.fire();
        }
        fetched
    }

    /// Stop the pipeline: drop any pending timer and make every outstanding
    /// response stale.
    pub fn shutdown(&self) {
        let cancelled = self.inner.timer.borrow_mut().cancel();
        self.inner.deferred.set(false);
        self.next_seq();
        self.inner.status.borrow_mut().in_flight = false;
        debug!(cancelled, "sync pipeline shut down");
    }

    // --- Queries ---

    #[must_use]
    pub fn status(&self) -> SyncStatus {
        self.inner.status.borrow().clone()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.inner.status.borrow().error.clone()
    }

    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.inner.status.borrow().in_flight
    }

    /// Whether the initial fetch is outstanding.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.inner.status.borrow().loading
    }

    /// Whether a debounce timer is waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.timer.borrow().is_armed()
    }

    /// Sequence number of the most recently issued request.
    #[must_use]
    pub fn latest_seq(&self) -> u64 {
        self.inner.latest_seq.get()
    }

    // --- Internals ---

    fn next_seq(&self) -> u64 {
        let seq = self.inner.latest_seq.get() + 1;
        self.inner.latest_seq.set(seq);
        seq
    }

    /// Start a round trip: take a sequence number, read the store, flag in-flight.
    fn issue(&self) -> (u64, Dimensions) {
        let seq = self.next_seq();
        let dimensions = self.inner.store.dimensions();
        {
            let mut status = self.inner.status.borrow_mut();
            status.in_flight = true;
            status.error = None;
        }
        debug!(seq, width = dimensions.width, height = dimensions.height, "sync issued");
        (seq, dimensions)
    }

    /// Debounce timer elapsed.
    fn fire(&self) {
        if self.inner.status.borrow().loading {
            debug!("initial fetch outstanding; holding sync");
            self.inner.deferred.set(true);
            return;
        }
        let (seq, dimensions) = self.issue();
        let pipeline = self.clone();
        tokio::task::spawn_local(async move {
            let outcome = round_trip(pipeline.inner.remote.as_ref(), dimensions).await;
            pipeline.settle(seq, outcome);
        });
    }

    /// Apply an outcome if it belongs to the latest request.
    fn settle(&self, seq: u64, outcome: Result<(), SyncError>) {
        let latest = self.inner.latest_seq.get();
        if seq != latest {
            debug!(seq, latest, "discarding superseded sync response");
            return;
        }

        let mut status = self.inner.status.borrow_mut();
        status.in_flight = false;
        match outcome {
            Ok(()) => {
                info!(seq, "sync completed");
                status.error = None;
            }
            Err(e) => {
                warn!(seq, error = %e, "sync failed");
                status.error = Some(e.display_message());
            }
        }
    }
}

/// Validate, then update only if validation passed.
async fn round_trip(remote: &dyn RemoteStore, dimensions: Dimensions) -> Result<(), SyncError> {
    remote.validate(dimensions).await.map_err(SyncError::Validation)?;
    remote.update(dimensions).await.map_err(SyncError::Update)?;
    Ok(())
}
