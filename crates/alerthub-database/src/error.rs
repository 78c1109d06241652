//! Mapping of sqlx failures onto [`AppError`].

use alerthub_core::error::{AppError, ErrorKind};

const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";
const CHECK_VIOLATION: &str = "23514";

/// Classify a sqlx error, prefixing the message with `context`.
///
/// Connectivity failures become `ServiceUnavailable` so callers can retry;
/// a missing parent alert on a delivery write becomes `NotFound`.
pub fn map_sqlx_error(context: &str, err: sqlx::Error) -> AppError {
    let kind = classify(&err);
    let message = match kind {
        ErrorKind::NotFound if is_foreign_key_violation(&err) => {
            format!("{context}: alert not found")
        }
        _ => format!("{context}: {err}"),
    };
    AppError::with_source(kind, message, err)
}

fn classify(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::RowNotFound => ErrorKind::NotFound,
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => ErrorKind::ServiceUnavailable,
        sqlx::Error::Configuration(_) => ErrorKind::Configuration,
        sqlx::Error::Database(db) => match db.code().as_deref() {
            Some(FOREIGN_KEY_VIOLATION) => ErrorKind::NotFound,
            Some(UNIQUE_VIOLATION) => ErrorKind::Conflict,
            Some(CHECK_VIOLATION) => ErrorKind::Validation,
            _ => ErrorKind::Database,
        },
        _ => ErrorKind::Database,
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found() {
        let err = map_sqlx_error("Failed to load alert", sqlx::Error::RowNotFound);
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(err.message.starts_with("Failed to load alert"));
    }

    #[test]
    fn test_pool_timeout_is_retryable() {
        let err = map_sqlx_error("Failed to list alerts", sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
        assert!(err.kind.is_retryable());
    }

    #[test]
    fn test_io_is_retryable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = map_sqlx_error("Failed to connect", sqlx::Error::Io(io));
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
    }
}
