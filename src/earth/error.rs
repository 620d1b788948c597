use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameTransformError {
    #[error("time {time} is outside the supported range {start} .. {end}")]
    TimeOutOfRange {
        time: DateTime<Utc>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("span of {seconds} s from {start} leaves the supported time range")]
    SpanOutOfRange { start: DateTime<Utc>, seconds: f64 },
    #[error("position has non-finite components")]
    NonFinitePosition,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EarthModelError {
    #[error("equatorial radius must be positive and finite, got {0} m")]
    EquatorialRadius(f64),
    #[error("flattening must be in [0, 1), got {0}")]
    Flattening(f64),
}
