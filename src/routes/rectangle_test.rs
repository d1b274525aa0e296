#![allow(clippy::float_cmp)]

use std::time::Duration;

use super::*;
use crate::services::rectangle::{NOT_POSITIVE, RectangleFile, WIDTH_EXCEEDS_HEIGHT};

fn state_in(dir: &tempfile::TempDir) -> AppState {
    AppState::new(RectangleFile::new(dir.path().join("rectangle.json")), Duration::ZERO)
}

// =============================================================
// Status mapping
// =============================================================

#[test]
fn rectangle_error_to_status_maps_invalid() {
    let err = RectangleError::Invalid(WIDTH_EXCEEDS_HEIGHT);
    assert_eq!(rectangle_error_to_status(&err), StatusCode::BAD_REQUEST);
}

#[test]
fn rectangle_error_to_status_maps_storage_failures() {
    let err = RectangleError::Io(std::io::Error::other("disk full"));
    assert_eq!(rectangle_error_to_status(&err), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================
// Handlers
// =============================================================

#[tokio::test]
async fn get_returns_defaults_before_any_update() {
    let dir = tempfile::tempdir().unwrap();
    let Json(dims) = get_rectangle(State(state_in(&dir))).await.unwrap();
    assert_eq!(dims, Dimensions::new(100.0, 50.0));
}

#[tokio::test]
async fn validate_accepts_tall_rectangle() {
    let dir = tempfile::tempdir().unwrap();
    let Json(message) = validate_rectangle(State(state_in(&dir)), Json(Dimensions::new(100.0, 200.0)))
        .await
        .unwrap();
    assert_eq!(message, "Valid dimensions.");
}

#[tokio::test]
async fn validate_rejects_wide_rectangle() {
    let dir = tempfile::tempdir().unwrap();
    let (status, Json(message)) = validate_rectangle(State(state_in(&dir)), Json(Dimensions::new(200.0, 100.0)))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, "Width cannot exceed height.");
}

#[tokio::test]
async fn validate_rejects_non_positive() {
    let dir = tempfile::tempdir().unwrap();
    let (status, Json(message)) = validate_rectangle(State(state_in(&dir)), Json(Dimensions::new(0.0, 10.0)))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, NOT_POSITIVE);
}

#[tokio::test(start_paused = true)]
async fn validate_waits_for_configured_delay() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(RectangleFile::new(dir.path().join("r.json")), Duration::from_secs(2));
    let started = tokio::time::Instant::now();
    validate_rectangle(State(state), Json(Dimensions::new(10.0, 20.0))).await.unwrap();
    assert!(started.elapsed() >= Duration::from_secs(2));
}

#[tokio::test]
async fn update_persists_for_later_get() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(&dir);
    let status = update_rectangle(State(state.clone()), Json(Dimensions::new(80.0, 90.0))).await.unwrap();
    assert_eq!(status, StatusCode::OK);

    let Json(dims) = get_rectangle(State(state)).await.unwrap();
    assert_eq!(dims, Dimensions::new(80.0, 90.0));
}

#[tokio::test]
async fn update_storage_failure_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(RectangleFile::new(dir.path().join("missing").join("r.json")), Duration::ZERO);
    let (status, Json(message)) = update_rectangle(State(state), Json(Dimensions::new(10.0, 20.0)))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(message.starts_with("rectangle storage failed"));
}
