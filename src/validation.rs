use crate::errors::AppError;
use crate::schema::{FilterRule, GeoScope, ReportFamily};

/// Trim a caller-supplied filter value; a blank string counts as absent.
pub(crate) fn normalized(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Enforce the per-pair filter rule: scoped reports need a name to filter by,
/// while world-scoped and grouping reports must not receive one.
pub(crate) fn check_filter(
    family: ReportFamily,
    scope: GeoScope,
    filter: Option<&str>,
) -> Result<(), AppError> {
    match family.filter_rule(scope) {
        FilterRule::Required => match filter {
            Some(value) if !value.trim().is_empty() => Ok(()),
            _ => Err(AppError::InvalidArgument(format!(
                "{} report scoped by {} requires a {} name",
                family.as_str(),
                scope.as_str(),
                scope.as_str()
            ))),
        },
        FilterRule::Forbidden => match filter {
            None => Ok(()),
            Some(_) => Err(AppError::InvalidArgument(format!(
                "{} report scoped by {} does not take a filter value",
                family.as_str(),
                scope.as_str()
            ))),
        },
    }
}

/// Top-N row limits must be positive.
pub(crate) fn check_top_n(n: i64) -> Result<(), AppError> {
    if n > 0 {
        Ok(())
    } else {
        Err(AppError::InvalidArgument(format!(
            "top must be a positive integer, got {n}"
        )))
    }
}
