use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

use crate::schema::{GeoScope, ReportFamily};

/// Engine-wide error taxonomy. `UnsupportedScope` and `InvalidArgument` are
/// caller contract violations detected before any query runs; `Database`
/// covers query execution and row-mapping failures. An empty result set is
/// never an error.
#[derive(Debug)]
pub(crate) enum AppError {
    UnsupportedScope {
        family: ReportFamily,
        scope: GeoScope,
    },
    InvalidArgument(String),
    Database(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedScope { family, scope } => write!(
                f,
                "unsupported scope: {} reports cannot be scoped by {}",
                family.as_str(),
                scope.as_str()
            ),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::Database(msg) => write!(f, "database error: {msg}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            Self::UnsupportedScope { .. } | Self::InvalidArgument(_) => {
                HttpResponse::BadRequest().json(ErrorBody {
                    code: 400,
                    message: &self.to_string(),
                })
            }
            Self::Database(msg) => {
                log::error!("Database error: {msg}");
                HttpResponse::InternalServerError().json(ErrorBody {
                    code: 500,
                    message: "database error",
                })
            }
        }
    }
}

impl From<tokio_postgres::Error> for AppError {
    fn from(err: tokio_postgres::Error) -> Self {
        let msg = if let Some(db_err) = err.as_db_error() {
            format!(
                "{}: {} (code: {})",
                db_err.severity(),
                db_err.message(),
                db_err.code().code()
            )
        } else {
            err.to_string()
        };
        Self::Database(msg)
    }
}

impl From<deadpool_postgres::PoolError> for AppError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Database(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: u16,
    message: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_scope_names_both_sides() {
        let err = AppError::UnsupportedScope {
            family: ReportFamily::CapitalCity,
            scope: GeoScope::District,
        };
        let msg = err.to_string();
        assert!(msg.contains("capital_city"));
        assert!(msg.contains("district"));
    }

    #[test]
    fn invalid_argument_carries_detail() {
        let err = AppError::InvalidArgument("top must be a positive integer".into());
        assert_eq!(
            err.to_string(),
            "invalid argument: top must be a positive integer"
        );
    }
}
