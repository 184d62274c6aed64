//! Pay periods service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Pay period service error variants.
#[derive(Debug, Error)]
pub enum PayPeriodsServiceError {
    /// A live period with the same start and end dates already exists.
    #[error("pay period already exists")]
    AlreadyExists,

    /// Period, event or run was not found.
    #[error("pay period not found")]
    NotFound,

    /// Unknown employee or pay item.
    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    /// End date before start date, or similar.
    #[error("invalid data")]
    InvalidData,

    /// The period has been closed and can no longer change.
    #[error("pay period is closed")]
    PeriodClosed,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PayPeriodsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
