//! Shared application state, injected into handlers via the `State` extractor.

use std::sync::Arc;
use std::time::Duration;

use crate::services::rectangle::RectangleFile;

#[derive(Clone)]
pub struct AppState {
    pub rectangle: Arc<RectangleFile>,
    /// Simulated processing time for `validate`.
    pub validate_delay: Duration,
}

impl AppState {
    #[must_use]
    pub fn new(rectangle: RectangleFile, validate_delay: Duration) -> Self {
        Self { rectangle: Arc::new(rectangle), validate_delay }
    }
}
