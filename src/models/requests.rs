use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::schema::GeoScope;

fn world() -> GeoScope {
    GeoScope::World
}

/// Query shape shared by the country, city, and capital-city report routes.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct ReportQuery {
    #[serde(default = "world")]
    pub scope: GeoScope,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub top: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct LanguageQuery {
    pub top: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct PopulationQuery {
    #[serde(default = "world")]
    pub scope: GeoScope,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
}

/// Breakdown reports have no world level, so the grouping scope is mandatory.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct BreakdownQuery {
    pub scope: Option<GeoScope>,
    pub top: Option<i64>,
}
