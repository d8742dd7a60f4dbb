use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] collegium_service::error::ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] collegium_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] collegium_core::error::CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
