//! Derived percentage figures for population breakdowns.
//!
//! A zero total is a legitimate outcome for sparsely populated or
//! data-incomplete areas, so both percentage functions return 0 in that case
//! rather than dividing by zero.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::records::PopulationBreakdown;

pub(crate) fn percent_in_cities(total: i64, in_cities: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        in_cities as f64 / total as f64 * 100.0
    }
}

pub(crate) fn percent_not_in_cities(total: i64, not_in_cities: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        not_in_cities as f64 / total as f64 * 100.0
    }
}

/// A [`PopulationBreakdown`] with its urban/rural percentages attached.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub(crate) struct BreakdownReport {
    pub area: String,
    pub total_population: i64,
    pub population_in_cities: i64,
    pub population_not_in_cities: i64,
    pub percent_in_cities: f64,
    pub percent_not_in_cities: f64,
}

impl From<PopulationBreakdown> for BreakdownReport {
    fn from(raw: PopulationBreakdown) -> Self {
        Self {
            percent_in_cities: percent_in_cities(raw.total_population, raw.population_in_cities),
            percent_not_in_cities: percent_not_in_cities(
                raw.total_population,
                raw.population_not_in_cities,
            ),
            area: raw.area,
            total_population: raw.total_population,
            population_in_cities: raw.population_in_cities,
            population_not_in_cities: raw.population_not_in_cities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(total: i64, in_cities: i64) -> PopulationBreakdown {
        PopulationBreakdown {
            area: "Europe".into(),
            total_population: total,
            population_in_cities: in_cities,
            population_not_in_cities: total - in_cities,
        }
    }

    #[test]
    fn zero_total_yields_zero_percent() {
        assert_eq!(percent_in_cities(0, 0), 0.0);
        assert_eq!(percent_not_in_cities(0, 0), 0.0);
    }

    #[test]
    fn percentages_are_finite_for_any_split() {
        for (total, in_cities) in [(1, 0), (1, 1), (7, 3), (8_000_000_000, 4_500_000_000)] {
            assert!(percent_in_cities(total, in_cities).is_finite());
            assert!(percent_not_in_cities(total, total - in_cities).is_finite());
        }
    }

    #[test]
    fn complement_sums_to_one_hundred() {
        for (total, in_cities) in [(10, 0), (10, 10), (741, 550), (3, 1)] {
            let sum = percent_in_cities(total, in_cities)
                + percent_not_in_cities(total, total - in_cities);
            assert!((sum - 100.0).abs() < 1e-9, "{total}/{in_cities} -> {sum}");
        }
    }

    #[test]
    fn europe_urban_share() {
        let report = BreakdownReport::from(breakdown(741_000_000, 550_000_000));
        assert!((report.percent_in_cities - 74.2).abs() < 0.1);
        assert!((report.percent_not_in_cities - 25.8).abs() < 0.1);
    }

    #[test]
    fn empty_area_report_carries_zero_percentages() {
        let report = BreakdownReport::from(breakdown(0, 0));
        assert_eq!(report.percent_in_cities, 0.0);
        assert_eq!(report.percent_not_in_cities, 0.0);
    }
}
