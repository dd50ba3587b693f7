use serde::Serialize;
use utoipa::ToSchema;

use crate::aggregation::BreakdownReport;

/// A country row from the `country` table, with its capital resolved by name.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub(crate) struct Country {
    pub code: String,
    pub name: String,
    pub continent: String,
    pub region: String,
    pub population: i64,
    pub capital: Option<String>,
}

/// A city row joined with its country's name.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub(crate) struct City {
    pub name: String,
    pub country: String,
    pub district: String,
    pub population: i64,
}

/// A city restricted to capital-designated rows; districts are not reported
/// for capitals.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub(crate) struct CapitalCity {
    pub name: String,
    pub country: String,
    pub population: i64,
}

/// Speaker statistics for one of the major languages.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub(crate) struct LanguageStat {
    pub language: String,
    pub speakers: i64,
    pub world_percentage: f64,
}

/// Raw population split for an area (continent, region, or country), before
/// the aggregation service derives percentages.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub(crate) struct PopulationBreakdown {
    pub area: String,
    pub total_population: i64,
    pub population_in_cities: i64,
    pub population_not_in_cities: i64,
}

/// Tagged variant over the row shapes a dispatched report can produce.
/// Serialized untagged, so every report payload renders its rows as a plain
/// JSON array regardless of family.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum ReportRows {
    Countries(Vec<Country>),
    Cities(Vec<City>),
    CapitalCities(Vec<CapitalCity>),
    Languages(Vec<LanguageStat>),
    Breakdowns(Vec<BreakdownReport>),
}

impl ReportRows {
    pub fn len(&self) -> usize {
        match self {
            Self::Countries(rows) => rows.len(),
            Self::Cities(rows) => rows.len(),
            Self::CapitalCities(rows) => rows.len(),
            Self::Languages(rows) => rows.len(),
            Self::Breakdowns(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_rows_serialize_as_plain_arrays() {
        let rows = ReportRows::Cities(vec![City {
            name: "London".into(),
            country: "United Kingdom".into(),
            district: "England".into(),
            population: 8_000_000,
        }]);
        let json = serde_json::to_value(&rows).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["name"], "London");
        assert_eq!(json[0]["population"], 8_000_000);
    }

    #[test]
    fn empty_rows_are_a_valid_result() {
        let rows = ReportRows::Countries(Vec::new());
        assert!(rows.is_empty());
        assert_eq!(serde_json::to_string(&rows).unwrap(), "[]");
    }
}
