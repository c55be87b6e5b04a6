use shared_types::AppError;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

/// Convert a sqlx::Error into an AppError.
pub fn sqlx_to_app_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::RowNotFound => AppError::not_found("Resource not found"),
        sqlx::Error::PoolTimedOut => AppError::database("Timed out waiting for a database connection"),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => {
                let friendly = if db_err.message().contains("n_documento") {
                    "A client with this document number already exists"
                } else {
                    "A record with this value already exists"
                };
                AppError::conflict(friendly)
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                let constraint = db_err.constraint().unwrap_or("foreign key");
                AppError::bad_request(format!("Referenced record does not exist ({constraint})"))
            }
            Some(CHECK_VIOLATION) => AppError::bad_request(db_err.message().to_string()),
            _ => AppError::database(err.to_string()),
        },
        _ => AppError::database(err.to_string()),
    }
}

/// Extension trait providing `.into_app_error()` on sqlx::Error.
pub trait SqlxErrorExt {
    fn into_app_error(self) -> AppError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_app_error(self) -> AppError {
        sqlx_to_app_error(self)
    }
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}
