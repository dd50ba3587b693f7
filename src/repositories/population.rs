use deadpool_postgres::Object;
use tokio_postgres::Row;

use crate::catalog;
use crate::errors::AppError;
use crate::models::records::PopulationBreakdown;
use crate::schema::{GeoScope, ReportFamily};
use crate::validation::{check_filter, check_top_n};

pub(crate) struct PopulationRepository;

impl PopulationRepository {
    /// Total population of an area. `None` means the filter matched nothing
    /// (SQL NULL aggregate); an area recorded with zero population comes back
    /// as `Some(0)`. The two are never conflated.
    pub async fn total(
        client: &Object,
        scope: GeoScope,
        filter: Option<&str>,
    ) -> Result<Option<i64>, AppError> {
        check_filter(ReportFamily::PopulationTotal, scope, filter)?;
        let sql = catalog::population_total(scope);
        let row = match filter {
            Some(value) => client.query_one(sql, &[&value]).await,
            None => client.query_one(sql, &[]).await,
        }
        .map_err(|e| Self::fetch_failed(scope, filter, &e))?;
        row.try_get::<_, Option<i64>>("total_population")
            .map_err(|e| {
                AppError::Database(format!(
                    "malformed row in {}: {e}",
                    Self::context(scope, filter)
                ))
            })
    }

    /// Population split (total / in cities / not in cities) for every area at
    /// the given grouping level, largest totals first.
    pub async fn breakdown(
        client: &Object,
        scope: GeoScope,
    ) -> Result<Vec<PopulationBreakdown>, AppError> {
        let template = Self::template(scope)?;
        let rows = client
            .query(template.all, &[])
            .await
            .map_err(|e| Self::fetch_failed(scope, None, &e))?;
        Self::map_rows(&rows, scope)
    }

    /// The `n` largest areas at the given grouping level.
    pub async fn breakdown_top_n(
        client: &Object,
        scope: GeoScope,
        n: i64,
    ) -> Result<Vec<PopulationBreakdown>, AppError> {
        check_top_n(n)?;
        let template = Self::template(scope)?;
        let rows = client
            .query(template.top_n, &[&n])
            .await
            .map_err(|e| Self::fetch_failed(scope, None, &e))?;
        Self::map_rows(&rows, scope)
    }

    fn template(scope: GeoScope) -> Result<&'static catalog::QueryTemplate, AppError> {
        catalog::list_template(ReportFamily::PopulationBreakdown, scope).ok_or(
            AppError::UnsupportedScope {
                family: ReportFamily::PopulationBreakdown,
                scope,
            },
        )
    }

    fn map_rows(rows: &[Row], scope: GeoScope) -> Result<Vec<PopulationBreakdown>, AppError> {
        rows.iter()
            .map(|row| {
                Self::from_row(row).map_err(|e| {
                    AppError::Database(format!(
                        "malformed row in population breakdown by {}: {e}",
                        scope.as_str()
                    ))
                })
            })
            .collect()
    }

    fn from_row(row: &Row) -> Result<PopulationBreakdown, tokio_postgres::Error> {
        Ok(PopulationBreakdown {
            area: row.try_get("area")?,
            total_population: row.try_get("total_population")?,
            population_in_cities: row.try_get("city_population")?,
            population_not_in_cities: row.try_get("non_city_population")?,
        })
    }

    fn fetch_failed(scope: GeoScope, filter: Option<&str>, err: &tokio_postgres::Error) -> AppError {
        AppError::Database(format!(
            "failed to fetch {}: {err}",
            Self::context(scope, filter)
        ))
    }

    fn context(scope: GeoScope, filter: Option<&str>) -> String {
        match filter {
            Some(value) => format!("population of {} '{}'", scope.as_str(), value),
            None => format!("population report for {}", scope.as_str()),
        }
    }
}
