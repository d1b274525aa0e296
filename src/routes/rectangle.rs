//! Rectangle routes.
//!
//! Messages travel as JSON strings, both on success (`"Valid dimensions."`)
//! and on failure (`"Width cannot exceed height."`).

#[cfg(test)]
#[path = "rectangle_test.rs"]
mod rectangle_test;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use resizer::geometry::Dimensions;
use tracing::{error, info};

use crate::services::rectangle::{self, RectangleError, VALID_MESSAGE};
use crate::state::AppState;

/// Status plus a JSON string message.
pub type ApiError = (StatusCode, Json<String>);

/// `GET /api/rectangle`: the persisted dimensions.
pub async fn get_rectangle(State(state): State<AppState>) -> Result<Json<Dimensions>, ApiError> {
    let dimensions = state.rectangle.load().await.map_err(rectangle_error_to_response)?;
    Ok(Json(dimensions))
}

/// `POST /api/rectangle/validate`: business-rule check, after the
/// configured delay.
pub async fn validate_rectangle(
    State(state): State<AppState>,
    Json(body): Json<Dimensions>,
) -> Result<Json<&'static str>, ApiError> {
    if !state.validate_delay.is_zero() {
        tokio::time::sleep(state.validate_delay).await;
    }
    rectangle::validate(body).map_err(rectangle_error_to_response)?;
    info!(width = body.width, height = body.height, "dimensions validated");
    Ok(Json(VALID_MESSAGE))
}

/// `POST /api/rectangle/update`: persist the dimensions.
pub async fn update_rectangle(
    State(state): State<AppState>,
    Json(body): Json<Dimensions>,
) -> Result<StatusCode, ApiError> {
    state.rectangle.save(body).await.map_err(rectangle_error_to_response)?;
    Ok(StatusCode::OK)
}

pub(crate) fn rectangle_error_to_status(err: &RectangleError) -> StatusCode {
    match err {
        RectangleError::Invalid(_) => StatusCode::BAD_REQUEST,
        RectangleError::Io(_) | RectangleError::Corrupt(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn rectangle_error_to_response(err: RectangleError) -> ApiError {
    let status = rectangle_error_to_status(&err);
    if status.is_server_error() {
        error!(error = %err, "rectangle request failed");
    } else {
        info!(error = %err, "rectangle request rejected");
    }
    (status, Json(err.to_string()))
}
