use serde::Serialize;
use utoipa::ToSchema;

use crate::models::records::ReportRows;
use crate::schema::GeoScope;

#[derive(Serialize, ToSchema)]
pub(crate) struct HealthPayload {
    pub status: String,
    pub service: &'static str,
}

/// Envelope for every list-returning report.
#[derive(Serialize, ToSchema)]
pub(crate) struct ReportPayload {
    pub scope: GeoScope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub count: usize,
    pub rows: ReportRows,
}

/// Single-value population answer. `population` is `null` when the filter
/// matched nothing; a recorded zero population serializes as `0`, so the two
/// cases stay distinguishable on the wire.
#[derive(Serialize, ToSchema)]
pub(crate) struct PopulationPayload {
    pub scope: GeoScope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub population: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_population_serializes_as_null() {
        let payload = PopulationPayload {
            scope: GeoScope::Continent,
            name: Some("Atlantis".into()),
            population: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["population"].is_null());
    }

    #[test]
    fn zero_population_stays_zero() {
        let payload = PopulationPayload {
            scope: GeoScope::District,
            name: Some("Somewhere".into()),
            population: Some(0),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["population"], 0);
    }

    #[test]
    fn world_reports_omit_the_name_field() {
        let payload = ReportPayload {
            scope: GeoScope::World,
            name: None,
            count: 0,
            rows: ReportRows::Countries(Vec::new()),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("name").is_none());
        assert_eq!(json["scope"], "world");
        assert_eq!(json["count"], 0);
    }
}
