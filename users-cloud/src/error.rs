//! Service-layer error type
//!
//! `ServiceError` sits between the repository (`sqlx::Error`) and the API
//! layer (`AppError`) so handlers can propagate with `?`.

use shared::error::AppError;
use shared::validation::MSG_EMAIL_TAKEN;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// - `Db`: database/infrastructure failure, answered with a 500
/// - `App`: business-rule error passed through to the client
#[derive(Debug)]
pub enum ServiceError {
    Db(BoxError),
    App(AppError),
}

impl ServiceError {
    /// Convert into an `AppError`, using `message` as the client-facing text
    /// for infrastructure failures (logged when the response is rendered)
    pub fn context(self, message: &str) -> AppError {
        match self {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => AppError::database(message).with_error(db_err.to_string()),
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        // users.email UNIQUE lost a check-then-insert race
        if e
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation())
        {
            return ServiceError::App(AppError::email_conflict(MSG_EMAIL_TAKEN));
        }
        ServiceError::Db(e.into())
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
