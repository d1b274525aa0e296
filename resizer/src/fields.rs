//! Numeric width/height field binding.
//!
//! Typed edits follow the same path as gestures: write the store, then ask
//! the pipeline for a sync. Text that is not a finite number is rejected
//! before anything is written.

#[cfg(test)]
#[path = "fields_test.rs"]
mod fields_test;

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::config::ResizerConfig;
use crate::error::FieldError;
use crate::geometry::{Dimensions, clamp_dimensions};
use crate::store::DimensionStore;
use crate::sync::SyncPipeline;

/// One of the two numeric inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Width,
    Height,
}

impl Field {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "width" => Ok(Self::Width),
            "height" => Ok(Self::Height),
            other => Err(FieldError::UnknownField(other.to_owned())),
        }
    }
}

/// Parse field text as a finite number.
///
/// # Errors
///
/// Returns [`FieldError::NotANumber`] for empty, non-numeric, `NaN`, or
/// infinite input.
pub fn parse_value(raw: &str) -> Result<f64, FieldError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FieldError::NotANumber(raw.to_owned())),
    }
}

/// Connects the two numeric fields to the store and the pipeline.
#[derive(Clone)]
pub struct InputBinding {
    store: DimensionStore,
    pipeline: SyncPipeline,
    /// Lower bound for typed values, when the clamp policy covers inputs.
    min_size: Option<f64>,
}

impl InputBinding {
    #[must_use]
    pub fn new(store: DimensionStore, pipeline: SyncPipeline, config: &ResizerConfig) -> Self {
        let min_size = config.clamp.clamps_inputs().then_some(config.min_size);
        Self { store, pipeline, min_size }
    }

    /// Apply a field edit and request a sync. Returns the dimensions written.
    ///
    /// Must be called from inside a [`tokio::task::LocalSet`].
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::NotANumber`] if `raw` is not a finite number.
    /// The store is left untouched and no sync is requested.
    pub fn on_change(&self, field: Field, raw: &str) -> Result<Dimensions, FieldError> {
        let value = parse_value(raw)?;

        let mut dimensions = self.store.dimensions();
        match field {
            Field::Width => dimensions.width = value,
            Field::Height => dimensions.height = value,
        }
        if let Some(min) = self.min_size {
            dimensions = clamp_dimensions(dimensions, min);
        }
        self.store.set_dimensions(dimensions);
        self.pipeline.request();
        debug!(%field, value, "field edited");
        Ok(dimensions)
    }
}
