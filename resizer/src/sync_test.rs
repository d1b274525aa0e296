#![allow(clippy::float_cmp)]

use std::future::Future;

use tokio::task::LocalSet;

use super::*;
use crate::error::{FETCH_FAILED_MESSAGE, GENERIC_SYNC_MESSAGE, RemoteError};
use crate::geometry::Position;
use crate::remote::test_helpers::{Call, MockRemote, Scripted};

// =============================================================
// Helpers
// =============================================================

const QUIET: Duration = Duration::from_millis(500);

fn setup_with(remote: MockRemote) -> (SyncPipeline, DimensionStore, Rc<MockRemote>) {
    let store = DimensionStore::new();
    let remote = Rc::new(remote);
    let pipeline = SyncPipeline::new(store.clone(), remote.clone(), QUIET);
    (pipeline, store, remote)
}

fn setup() -> (SyncPipeline, DimensionStore, Rc<MockRemote>) {
    setup_with(MockRemote::new())
}

async fn local<F: Future>(future: F) -> F::Output {
    LocalSet::new().run_until(future).await
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

fn dims(width: f64, height: f64) -> Dimensions {
    Dimensions::new(width, height)
}

// =============================================================
// Debounce
// =============================================================

#[tokio::test(start_paused = true)]
async fn requests_within_quiet_period_collapse_into_one_round_trip() {
    local(async {
        let (pipeline, store, remote) = setup();

        store.set_dimensions(dims(150.0, 50.0));
        pipeline.request();
        advance(100).await;
        store.set_dimensions(dims(160.0, 50.0));
        pipeline.request();

        advance(400).await;
        assert!(remote.calls().is_empty());
        assert!(pipeline.is_pending());

        advance(1_000).await;
        assert_eq!(remote.validate_calls(), vec![dims(160.0, 50.0)]);
        assert_eq!(remote.update_calls(), vec![dims(160.0, 50.0)]);
        assert!(!pipeline.is_pending());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn round_trip_reads_store_when_timer_fires() {
    local(async {
        let (pipeline, store, remote) = setup();
        pipeline.request();
        advance(200).await;
        // Written without a new request; still picked up.
        store.set_dimensions(dims(70.0, 90.0));
        advance(1_000).await;
        assert_eq!(remote.validate_calls(), vec![dims(70.0, 90.0)]);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn update_runs_only_after_validate() {
    local(async {
        let (pipeline, _, remote) = setup();
        pipeline.request();
        advance(1_000).await;
        assert_eq!(
            remote.calls(),
            vec![Call::Validate(dims(100.0, 50.0)), Call::Update(dims(100.0, 50.0))]
        );
        assert_eq!(pipeline.status(), SyncStatus::default());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn in_flight_spans_the_round_trip() {
    local(async {
        let remote = MockRemote::new();
        remote.script_validate(Scripted::ok().after(Duration::from_secs(2)));
        let (pipeline, _, _) = setup_with(remote);

        pipeline.request();
        assert!(!pipeline.in_flight());
        advance(600).await;
        assert!(pipeline.in_flight());
        advance(3_000).await;
        assert!(!pipeline.in_flight());
        assert_eq!(pipeline.latest_seq(), 1);
    })
    .await;
}

// =============================================================
// Failures
// =============================================================

#[tokio::test(start_paused = true)]
async fn validation_failure_sets_error_and_skips_update() {
    local(async {
        let remote = MockRemote::new();
        remote.script_validate(Scripted::reject("Width cannot exceed height."));
        let (pipeline, store, remote) = setup_with(remote);

        store.set_dimensions(dims(200.0, 50.0));
        pipeline.request();
        advance(1_000).await;

        assert_eq!(remote.validate_calls(), vec![dims(200.0, 50.0)]);
        assert!(remote.update_calls().is_empty());
        assert!(!pipeline.in_flight());
        assert_eq!(pipeline.error().as_deref(), Some("Width cannot exceed height."));
        // No rollback.
        assert_eq!(store.dimensions(), dims(200.0, 50.0));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn update_failure_without_message_uses_generic_text() {
    local(async {
        let remote = MockRemote::new();
        remote.script_update(Scripted {
            delay: Duration::ZERO,
            result: Err(RemoteError::Request("connection reset".into())),
        });
        let (pipeline, _, remote) = setup_with(remote);

        pipeline.request();
        advance(1_000).await;
        assert_eq!(remote.update_calls().len(), 1);
        assert_eq!(pipeline.error().as_deref(), Some(GENERIC_SYNC_MESSAGE));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn next_request_clears_previous_error() {
    local(async {
        let remote = MockRemote::new();
        remote.script_validate(Scripted::reject("Width cannot exceed height."));
        let (pipeline, _, _) = setup_with(remote);

        pipeline.request();
        advance(1_000).await;
        assert!(pipeline.error().is_some());

        pipeline.request();
        advance(1_000).await;
        assert_eq!(pipeline.error(), None);
    })
    .await;
}

// =============================================================
// Stale responses
// =============================================================

#[tokio::test(start_paused = true)]
async fn superseded_response_is_discarded() {
    local(async {
        let remote = MockRemote::new();
        remote.script_validate(Scripted::reject("old failure").after(Duration::from_secs(3)));
        remote.script_validate(Scripted::ok());
        let (pipeline, store, remote) = setup_with(remote);

        store.set_dimensions(dims(150.0, 50.0));
        pipeline.request();
        advance(600).await;
        assert!(pipeline.in_flight());

        store.set_dimensions(dims(160.0, 50.0));
        pipeline.request();
        advance(600).await;
        assert_eq!(pipeline.status(), SyncStatus::default());

        // The first round trip resolves last and must not resurrect its error.
        advance(5_000).await;
        assert_eq!(pipeline.status(), SyncStatus::default());
        assert_eq!(remote.validate_calls(), vec![dims(150.0, 50.0), dims(160.0, 50.0)]);
        assert_eq!(remote.update_calls(), vec![dims(160.0, 50.0)]);
        assert_eq!(pipeline.latest_seq(), 2);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn older_success_does_not_clear_newer_in_flight() {
    local(async {
        let remote = MockRemote::new();
        remote.script_validate(Scripted::ok().after(Duration::from_secs(1)));
        remote.script_validate(Scripted::ok().after(Duration::from_secs(5)));
        let (pipeline, _, _) = setup_with(remote);

        pipeline.request();
        advance(600).await;
        pipeline.request();
        advance(1_000).await;
        // First round trip has resolved; second is still waiting on validate.
        assert!(pipeline.in_flight());
        advance(6_000).await;
        assert!(!pipeline.in_flight());
    })
    .await;
}

// =============================================================
// flush / shutdown
// =============================================================

#[tokio::test(start_paused = true)]
async fn flush_skips_quiet_period_and_cancels_timer() {
    local(async {
        let (pipeline, store, remote) = setup();
        store.set_dimensions(dims(120.0, 130.0));
        pipeline.request();

        assert_eq!(pipeline.flush().await, Ok(()));
        assert_eq!(remote.update_calls(), vec![dims(120.0, 130.0)]);

        advance(2_000).await;
        assert_eq!(remote.validate_calls().len(), 1);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn flush_returns_validation_error() {
    local(async {
        let remote = MockRemote::new();
        remote.script_validate(Scripted::reject("Width cannot exceed height."));
        let (pipeline, _, remote) = setup_with(remote);

        let err = pipeline.flush().await.unwrap_err();
        assert!(matches!(err, SyncError::Validation(_)));
        assert!(remote.update_calls().is_empty());
        assert_eq!(pipeline.error().as_deref(), Some("Width cannot exceed height."));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_timer() {
    local(async {
        let (pipeline, _, remote) = setup();
        pipeline.request();
        pipeline.shutdown();
        advance(2_000).await;
        assert!(remote.calls().is_empty());
        assert!(!pipeline.is_pending());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn shutdown_makes_outstanding_round_trip_stale() {
    local(async {
        let remote = MockRemote::new();
        remote.script_validate(Scripted::reject("late").after(Duration::from_secs(2)));
        let (pipeline, _, _) = setup_with(remote);

        pipeline.request();
        advance(600).await;
        assert!(pipeline.in_flight());

        pipeline.shutdown();
        assert!(!pipeline.in_flight());
        advance(3_000).await;
        assert_eq!(pipeline.status(), SyncStatus::default());
    })
    .await;
}

// =============================================================
// Initial fetch
// =============================================================

#[tokio::test(start_paused = true)]
async fn load_initial_writes_fetched_dimensions() {
    local(async {
        let (pipeline, store, remote) = setup_with(MockRemote::with_fetch(Ok(dims(200.0, 300.0))));
        assert_eq!(pipeline.load_initial().await, Ok(dims(200.0, 300.0)));
        assert_eq!(store.dimensions(), dims(200.0, 300.0));
        assert_eq!(remote.calls(), vec![Call::Fetch]);
        assert_eq!(pipeline.status(), SyncStatus::default());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn load_initial_failure_keeps_defaults_and_reports() {
    local(async {
        let failure = Err(RemoteError::Request("connection refused".into()));
        let (pipeline, store, _) = setup_with(MockRemote::with_fetch(failure));

        let err = pipeline.load_initial().await.unwrap_err();
        assert!(matches!(err, SyncError::Fetch(_)));
        assert_eq!(store.dimensions(), dims(100.0, 50.0));
        assert_eq!(pipeline.error().as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert!(!pipeline.in_flight());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn load_initial_does_not_overwrite_local_edit() {
    local(async {
        let remote = MockRemote::with_fetch(Ok(dims(200.0, 300.0)));
        *remote.fetch_delay.borrow_mut() = Duration::from_secs(1);
        let (pipeline, store, _) = setup_with(remote);

        let loader = pipeline.clone();
        let handle = tokio::task::spawn_local(async move { loader.load_initial().await });
        advance(10).await;
        store.set_dimensions(dims(150.0, 50.0));

        assert_eq!(handle.await.unwrap(), Ok(dims(200.0, 300.0)));
        assert_eq!(store.dimensions(), dims(150.0, 50.0));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn initial_fetch_is_loading_not_in_flight() {
    local(async {
        let remote = MockRemote::with_fetch(Ok(dims(200.0, 300.0)));
        *remote.fetch_delay.borrow_mut() = Duration::from_secs(1);
        let (pipeline, _, _) = setup_with(remote);

        let loader = pipeline.clone();
        let handle = tokio::task::spawn_local(async move { loader.load_initial().await });
        advance(10).await;
        assert!(pipeline.loading());
        assert!(!pipeline.in_flight());

        handle.await.unwrap().unwrap();
        assert!(!pipeline.loading());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn sync_requested_during_fetch_waits_and_sends_fetched_dimensions() {
    local(async {
        let remote = MockRemote::with_fetch(Ok(dims(200.0, 300.0)));
        *remote.fetch_delay.borrow_mut() = Duration::from_secs(1);
        let (pipeline, store, remote) = setup_with(remote);

        let loader = pipeline.clone();
        let handle = tokio::task::spawn_local(async move { loader.load_initial().await });
        advance(10).await;
        store.set_position(Position::new(10.0, 0.0));
        pipeline.request();

        advance(600).await;
        assert_eq!(remote.calls(), vec![Call::Fetch]);

        handle.await.unwrap().unwrap();
        advance(100).await;
        assert_eq!(store.dimensions(), dims(200.0, 300.0));
        assert_eq!(remote.validate_calls(), vec![dims(200.0, 300.0)]);
        assert_eq!(remote.update_calls(), vec![dims(200.0, 300.0)]);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn fetch_failure_after_newer_sync_leaves_status_alone() {
    local(async {
        let remote = MockRemote::with_fetch(Err(RemoteError::Request("connection refused".into())));
        *remote.fetch_delay.borrow_mut() = Duration::from_secs(1);
        let (pipeline, _, _) = setup_with(remote);

        let loader = pipeline.clone();
        let handle = tokio::task::spawn_local(async move { loader.load_initial().await });
        advance(10).await;
        assert_eq!(pipeline.flush().await, Ok(()));

        assert!(handle.await.unwrap().is_err());
        assert_eq!(pipeline.error(), None);
    })
    .await;
}
