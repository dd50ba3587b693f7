use std::marker::PhantomData;

use deadpool_postgres::Object;
use tokio_postgres::Row;

use crate::catalog;
use crate::errors::AppError;
use crate::models::records::{CapitalCity, City, Country, LanguageStat};
use crate::schema::{GeoScope, ReportFamily};
use crate::validation::{check_filter, check_top_n};

/// Row→record mapping for one report family. Mapping is total: every column
/// the record expects must be present, or the whole row fails.
pub(crate) trait ReportRow: Sized {
    const FAMILY: ReportFamily;

    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error>;
}

impl ReportRow for Country {
    const FAMILY: ReportFamily = ReportFamily::Country;

    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            code: row.try_get("code")?,
            name: row.try_get("name")?,
            continent: row.try_get("continent")?,
            region: row.try_get("region")?,
            population: row.try_get("population")?,
            capital: row.try_get("capital")?,
        })
    }
}

impl ReportRow for City {
    const FAMILY: ReportFamily = ReportFamily::City;

    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            name: row.try_get("name")?,
            country: row.try_get("country")?,
            district: row.try_get("district")?,
            population: row.try_get("population")?,
        })
    }
}

impl ReportRow for CapitalCity {
    const FAMILY: ReportFamily = ReportFamily::CapitalCity;

    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            name: row.try_get("name")?,
            country: row.try_get("country")?,
            population: row.try_get("population")?,
        })
    }
}

impl ReportRow for LanguageStat {
    const FAMILY: ReportFamily = ReportFamily::LanguageBreakdown;

    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            language: row.try_get("language")?,
            speakers: row.try_get("speakers")?,
            world_percentage: row.try_get("world_percentage")?,
        })
    }
}

/// One repository for every list-returning report family, parameterized over
/// the record type. Each call resolves its catalog template, issues exactly
/// one read-only query, and maps rows; zero matches yield an empty vec, never
/// an error.
pub(crate) struct ReportRepository<R>(PhantomData<R>);

impl<R: ReportRow> ReportRepository<R> {
    /// Every matching row, sorted by population descending.
    pub async fn list_all(
        client: &Object,
        scope: GeoScope,
        filter: Option<&str>,
    ) -> Result<Vec<R>, AppError> {
        check_filter(R::FAMILY, scope, filter)?;
        let template = Self::template(scope)?;
        let rows = match filter {
            Some(value) => client.query(template.all, &[&value]).await,
            None => client.query(template.all, &[]).await,
        }
        .map_err(|e| Self::fetch_failed(scope, filter, &e))?;
        Self::map_rows(&rows, scope, filter)
    }

    /// At most `n` rows, same sort, highest populations first.
    pub async fn list_top_n(
        client: &Object,
        scope: GeoScope,
        filter: Option<&str>,
        n: i64,
    ) -> Result<Vec<R>, AppError> {
        check_filter(R::FAMILY, scope, filter)?;
        check_top_n(n)?;
        let template = Self::template(scope)?;
        let rows = match filter {
            Some(value) => client.query(template.top_n, &[&value, &n]).await,
            None => client.query(template.top_n, &[&n]).await,
        }
        .map_err(|e| Self::fetch_failed(scope, filter, &e))?;
        Self::map_rows(&rows, scope, filter)
    }

    fn template(scope: GeoScope) -> Result<&'static catalog::QueryTemplate, AppError> {
        catalog::list_template(R::FAMILY, scope).ok_or(AppError::UnsupportedScope {
            family: R::FAMILY,
            scope,
        })
    }

    fn map_rows(rows: &[Row], scope: GeoScope, filter: Option<&str>) -> Result<Vec<R>, AppError> {
        rows.iter()
            .map(|row| {
                R::from_row(row).map_err(|e| {
                    AppError::Database(format!(
                        "malformed row in {}: {e}",
                        Self::context(scope, filter)
                    ))
                })
            })
            .collect()
    }

    fn fetch_failed(scope: GeoScope, filter: Option<&str>, err: &tokio_postgres::Error) -> AppError {
        AppError::Database(format!(
            "failed to fetch {}: {err}",
            Self::context(scope, filter)
        ))
    }

    fn context(scope: GeoScope, filter: Option<&str>) -> String {
        match filter {
            Some(value) => format!(
                "{} report for {} '{}'",
                R::FAMILY.as_str(),
                scope.as_str(),
                value
            ),
            None => format!("{} report for {}", R::FAMILY.as_str(), scope.as_str()),
        }
    }
}
