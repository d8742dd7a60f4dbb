use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] collegium_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] collegium_core::error::CoreError),

    #[error("Diesel error: {0}")]
    DieselError(#[from] diesel::result::Error),

    #[error("Invalid recurrence rule: {0}")]
    RecurrenceRule(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
