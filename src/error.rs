use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Infrastructure faults from a store. Fatal for the current request and
/// never retried here.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
}

/// Insert failure of the atomic appointment insert. The slot-taken case is
/// the storage-level uniqueness constraint firing; the scheduler converts
/// it into a `SlotUnavailable` outcome instead of surfacing it.
#[derive(Debug, thiserror::Error)]
pub enum InsertError {
    #[error("slot is already booked")]
    SlotTaken,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Caller-input failures of a booking attempt, detected before any
/// mutation, plus the storage fault passthrough.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("unknown service")]
    InvalidService,
    #[error("unknown or inactive stylist")]
    InvalidStylist,
    #[error("time must fall on a {0}-minute increment")]
    InvalidTimeGranularity(u32),
    #[error("appointment time is in the past")]
    InvalidDate,
    #[error("storage unavailable")]
    Storage(#[from] StoreError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            BookingError::InvalidService => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_SERVICE"),
            BookingError::InvalidStylist => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_STYLIST"),
            BookingError::InvalidTimeGranularity(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_TIME_GRANULARITY")
            }
            BookingError::InvalidDate => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_DATE"),
            BookingError::Storage(err) => {
                tracing::error!(?err, "storage failure while handling request");
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}
