use thiserror::Error;

use crate::source::SourceError;

/// Location lookup errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("location endpoint unreachable: {0}")]
    Http(#[from] SourceError),

    #[error("invalid location response: {0}")]
    Json(String),

    #[error("position out of range: lat {lat}, lon {lon}")]
    OutOfRange { lat: f64, lon: f64 },

    #[error("no position available")]
    Unavailable,
}
