//! The single entry point collaborators use to run a report.
//!
//! A request is validated in full before any query executes: the (family,
//! scope) pair against the schema, then the filter rule and limit. Only then
//! is the matching repository method routed to, with population breakdowns
//! piped through the aggregation service on the way out.

use deadpool_postgres::Object;

use crate::aggregation::BreakdownReport;
use crate::errors::AppError;
use crate::models::records::{CapitalCity, City, Country, LanguageStat, ReportRows};
use crate::repositories::{PopulationRepository, ReportRepository, ReportRow};
use crate::schema::{GeoScope, ReportFamily};
use crate::validation::{check_filter, check_top_n};

/// One report invocation. `limit` selects the top-N variant when present.
#[derive(Clone, Debug)]
pub(crate) struct ReportRequest {
    pub family: ReportFamily,
    pub scope: GeoScope,
    pub filter: Option<String>,
    pub limit: Option<i64>,
}

/// Outcome of a dispatched report. An empty row set and an absent single
/// value are both valid "no data" results, not errors.
#[derive(Debug)]
pub(crate) enum Report {
    Rows(ReportRows),
    SingleValue(Option<i64>),
}

/// Fail-fast contract checks, run before any query. Kept separate from
/// [`dispatch`] so the contract is exercisable without a database.
pub(crate) fn check_request(request: &ReportRequest) -> Result<(), AppError> {
    if !request.family.supports(request.scope) {
        return Err(AppError::UnsupportedScope {
            family: request.family,
            scope: request.scope,
        });
    }
    check_filter(request.family, request.scope, request.filter.as_deref())?;
    if let Some(n) = request.limit {
        if request.family.is_single_value() {
            return Err(AppError::InvalidArgument(
                "population totals are single-valued; top does not apply".into(),
            ));
        }
        check_top_n(n)?;
    }
    Ok(())
}

pub(crate) async fn dispatch(client: &Object, request: &ReportRequest) -> Result<Report, AppError> {
    check_request(request)?;

    let report = match request.family {
        ReportFamily::Country => Report::Rows(ReportRows::Countries(
            list::<Country>(client, request).await?,
        )),
        ReportFamily::City => {
            Report::Rows(ReportRows::Cities(list::<City>(client, request).await?))
        }
        ReportFamily::CapitalCity => Report::Rows(ReportRows::CapitalCities(
            list::<CapitalCity>(client, request).await?,
        )),
        ReportFamily::LanguageBreakdown => Report::Rows(ReportRows::Languages(
            list::<LanguageStat>(client, request).await?,
        )),
        ReportFamily::PopulationTotal => Report::SingleValue(
            PopulationRepository::total(client, request.scope, request.filter.as_deref()).await?,
        ),
        ReportFamily::PopulationBreakdown => {
            let raw = match request.limit {
                Some(n) => {
                    PopulationRepository::breakdown_top_n(client, request.scope, n).await?
                }
                None => PopulationRepository::breakdown(client, request.scope).await?,
            };
            Report::Rows(ReportRows::Breakdowns(
                raw.into_iter().map(BreakdownReport::from).collect(),
            ))
        }
    };
    Ok(report)
}

async fn list<R: ReportRow>(client: &Object, request: &ReportRequest) -> Result<Vec<R>, AppError> {
    let filter = request.filter.as_deref();
    match request.limit {
        Some(n) => ReportRepository::<R>::list_top_n(client, request.scope, filter, n).await,
        None => ReportRepository::<R>::list_all(client, request.scope, filter).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        family: ReportFamily,
        scope: GeoScope,
        filter: Option<&str>,
        limit: Option<i64>,
    ) -> ReportRequest {
        ReportRequest {
            family,
            scope,
            filter: filter.map(str::to_string),
            limit,
        }
    }

    #[test]
    fn schema_pairs_outside_the_matrix_are_rejected() {
        let req = request(ReportFamily::CapitalCity, GeoScope::District, Some("x"), None);
        assert!(matches!(
            check_request(&req),
            Err(AppError::UnsupportedScope { .. })
        ));

        let req = request(ReportFamily::LanguageBreakdown, GeoScope::Region, None, None);
        assert!(matches!(
            check_request(&req),
            Err(AppError::UnsupportedScope { .. })
        ));
    }

    #[test]
    fn non_positive_limits_never_reach_a_repository() {
        for limit in [0, -1] {
            let req = request(ReportFamily::City, GeoScope::World, None, Some(limit));
            assert!(matches!(
                check_request(&req),
                Err(AppError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn missing_required_filter_is_an_argument_error() {
        let req = request(ReportFamily::Country, GeoScope::Continent, None, None);
        assert!(matches!(
            check_request(&req),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn limit_on_a_single_value_report_is_rejected() {
        let req = request(ReportFamily::PopulationTotal, GeoScope::World, None, Some(5));
        assert!(matches!(
            check_request(&req),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn well_formed_requests_pass_validation() {
        for req in [
            request(ReportFamily::Country, GeoScope::World, None, Some(5)),
            request(ReportFamily::City, GeoScope::Country, Some("United Kingdom"), None),
            request(ReportFamily::PopulationBreakdown, GeoScope::Continent, None, None),
            request(ReportFamily::PopulationTotal, GeoScope::District, Some("England"), None),
            request(ReportFamily::LanguageBreakdown, GeoScope::World, None, None),
        ] {
            assert!(check_request(&req).is_ok(), "{req:?}");
        }
    }
}
