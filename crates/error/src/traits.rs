//! # Error Traits
//!
//! Extension methods for results that carry or convert into [`AppError`].

use crate::{AppError, Result};

/// Extension methods for Result types.
pub trait ResultExt<T> {
    /// Prefix the error message with `context`.
    fn context<C: ToString>(self, context: C) -> Result<T>;

    /// Lazily computed variant of [`ResultExt::context`].
    fn with_context<C: ToString, F: FnOnce() -> C>(self, f: F) -> Result<T>;

    /// Log the error at `error` level and pass it through.
    fn log_error(self) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn context<C: ToString>(self, context: C) -> Result<T> {
        self.map_err(|e| {
            let err: AppError = e.into();
            err.context(context)
        })
    }

    fn with_context<C: ToString, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let err: AppError = e.into();
            err.context(f())
        })
    }

    fn log_error(self) -> Result<T> {
        self.map_err(|e| {
            let err: AppError = e.into();
            tracing::error!(error = %err, code = err.code(), "Error occurred");
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context() {
        let result: Result<i32> = Err(AppError::not_found("Subject not found"));
        let err = result.context("Assignment 3").unwrap_err();
        assert_eq!(err.message(), "Assignment 3: Subject not found");
    }

    #[test]
    fn test_with_context_is_lazy_on_ok() {
        let result: Result<i32> = Ok(1);
        let value = result
            .with_context(|| -> String { panic!("context must not be built for Ok") })
            .unwrap();
        assert_eq!(value, 1);
    }

    #[test]
    fn test_log_error_passes_through() {
        let result: Result<i32> = Err(AppError::database("down"));
        let err = result.log_error().unwrap_err();
        assert_eq!(err.code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_context_converts_foreign_errors() {
        let result: std::result::Result<i32, std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        let err = result.context("Writing log").unwrap_err();
        assert_eq!(err.code(), "IO_ERROR");
        assert_eq!(err.message(), "Writing log: disk");
    }
}
