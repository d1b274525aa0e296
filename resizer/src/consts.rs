//! Shared numeric constants for the resizer crate.

// ── Geometry ────────────────────────────────────────────────────

/// Width shown before the initial fetch completes.
pub const DEFAULT_WIDTH: f64 = 100.0;

/// Height shown before the initial fetch completes.
pub const DEFAULT_HEIGHT: f64 = 50.0;

/// Smallest width or height the clamp policy lets through.
pub const DEFAULT_MIN_SIZE: f64 = 10.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Half the side of a corner handle's square hit region, in pixels.
pub const HANDLE_RADIUS_PX: f64 = 5.0;

// ── Sync ────────────────────────────────────────────────────────

/// Quiet period before a burst of edits turns into one remote round trip.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
