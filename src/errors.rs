use axum::http::StatusCode;
use chrono::NaiveDate;
use thiserror::Error;

/// Input rejected by the aggregation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("month must be between 1 and 12, got {0}")]
    MonthOutOfRange(i64),

    #[error("year {0} is outside the supported calendar range")]
    YearOutOfRange(i64),

    #[error("{field} must not be negative")]
    NegativeCount { field: &'static str },

    #[error("{field} is too large")]
    CountOverflow { field: &'static str },

    #[error("invalid activity date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("more than one activity record for {date}")]
    DuplicateDate { date: NaiveDate },

    #[error("activity record for {date} is outside the requested month")]
    RecordOutsideMonth { date: NaiveDate },

    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        tracing::warn!("rejected payload: {err}");
        Self::bad_request(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
