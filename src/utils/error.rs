use axum::{http::StatusCode, response::IntoResponse};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

pub type ApiError = (StatusCode, String);

pub fn internal_error<E>(err: E) -> ApiError
where
    E: std::error::Error,
{
    tracing::error!("internal error: {}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

/// Diesel errors that mean something to the caller get their own status.
pub fn db_error(err: DieselError) -> ApiError {
    match err {
        DieselError::NotFound => not_found("Record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            conflict(info.message())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            bad_request(info.message())
        }
        other => internal_error(other),
    }
}

pub fn bad_request(msg: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, msg.to_owned())
}

pub fn unauthorized(msg: &str) -> ApiError {
    (StatusCode::UNAUTHORIZED, msg.to_owned())
}

pub fn forbidden(msg: &str) -> ApiError {
    (StatusCode::FORBIDDEN, msg.to_owned())
}

pub fn not_found(msg: &str) -> ApiError {
    (StatusCode::NOT_FOUND, msg.to_owned())
}

pub fn conflict(msg: &str) -> ApiError {
    (StatusCode::CONFLICT, msg.to_owned())
}

pub async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nothing to see here")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_rows_become_404() {
        let (status, _) = db_error(DieselError::NotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn rollback_is_an_internal_error() {
        let (status, msg) = db_error(DieselError::RollbackTransaction);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!msg.is_empty());
    }
}
