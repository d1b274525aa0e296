//! Rectangle service: business rules and file persistence.
//!
//! DESIGN
//! ======
//! The persisted rectangle is a single JSON document (`{"width":..,"height":..}`).
//! A missing file means nothing has been saved yet and reads as the default
//! `100 x 50`. Writes go to a sibling temp file first and are renamed into
//! place, so a crash mid-write never leaves a truncated document. Writes are
//! serialized by a lock; reads are not.

#[cfg(test)]
#[path = "rectangle_test.rs"]
mod rectangle_test;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use resizer::geometry::Dimensions;
use tokio::sync::Mutex;
use tracing::info;

pub const VALID_MESSAGE: &str = "Valid dimensions.";
pub const WIDTH_EXCEEDS_HEIGHT: &str = "Width cannot exceed height.";
pub const NOT_POSITIVE: &str = "Width and height must be positive numbers.";

#[derive(Debug, thiserror::Error)]
pub enum RectangleError {
    /// The dimensions break a business rule. The message is shown to users.
    #[error("{0}")]
    Invalid(&'static str),

    #[error("rectangle storage failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored rectangle is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Check the business rules. Persists nothing.
///
/// # Errors
///
/// Returns [`RectangleError::Invalid`] when either side is not a positive
/// finite number, or when the width exceeds the height.
pub fn validate(dimensions: Dimensions) -> Result<(), RectangleError> {
    let Dimensions { width, height } = dimensions;
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(RectangleError::Invalid(NOT_POSITIVE));
    }
    if width > height {
        return Err(RectangleError::Invalid(WIDTH_EXCEEDS_HEIGHT));
    }
    Ok(())
}

/// The rectangle's JSON file on disk.
#[derive(Debug)]
pub struct RectangleFile {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl RectangleFile {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path, write_lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored dimensions, or the defaults if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<Dimensions, RectangleError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Dimensions::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the stored dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written or moved into place.
    pub async fn save(&self, dimensions: Dimensions) -> Result<(), RectangleError> {
        let json = serde_json::to_vec(&dimensions)?;
        let tmp = self.path.with_extension("json.tmp");

        let _guard = self.write_lock.lock().await;
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        info!(
            path = %self.path.display(),
            width = dimensions.width,
            height = dimensions.height,
            "rectangle saved"
        );
        Ok(())
    }
}
