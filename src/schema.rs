use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Geographic level a report is filtered or grouped by.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, Eq, PartialEq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum GeoScope {
    World,
    Continent,
    Region,
    Country,
    District,
    City,
}

impl GeoScope {
    pub const ALL: [GeoScope; 6] = [
        Self::World,
        Self::Continent,
        Self::Region,
        Self::Country,
        Self::District,
        Self::City,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::World => "world",
            Self::Continent => "continent",
            Self::Region => "region",
            Self::Country => "country",
            Self::District => "district",
            Self::City => "city",
        }
    }
}

/// One of the supported report shapes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ToSchema)]
pub(crate) enum ReportFamily {
    Country,
    City,
    CapitalCity,
    LanguageBreakdown,
    PopulationTotal,
    PopulationBreakdown,
}

impl ReportFamily {
    pub const ALL: [ReportFamily; 6] = [
        Self::Country,
        Self::City,
        Self::CapitalCity,
        Self::LanguageBreakdown,
        Self::PopulationTotal,
        Self::PopulationBreakdown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::City => "city",
            Self::CapitalCity => "capital_city",
            Self::LanguageBreakdown => "language_breakdown",
            Self::PopulationTotal => "population_total",
            Self::PopulationBreakdown => "population_breakdown",
        }
    }

    /// The closed (family, scope) validity matrix. Anything outside it is a
    /// caller contract violation, surfaced as `AppError::UnsupportedScope`.
    pub fn supports(self, scope: GeoScope) -> bool {
        use GeoScope::*;
        match self {
            Self::Country | Self::CapitalCity => {
                matches!(scope, World | Continent | Region)
            }
            Self::City | Self::PopulationTotal => true,
            Self::LanguageBreakdown => scope == World,
            Self::PopulationBreakdown => matches!(scope, Continent | Region | Country),
        }
    }

    /// Whether a (family, scope) pair takes a filter value. World scope never
    /// does; breakdown reports group by their scope instead of filtering, so
    /// they never do either.
    pub fn filter_rule(self, scope: GeoScope) -> FilterRule {
        match self {
            Self::LanguageBreakdown | Self::PopulationBreakdown => FilterRule::Forbidden,
            _ if scope == GeoScope::World => FilterRule::Forbidden,
            _ => FilterRule::Required,
        }
    }

    /// Single-value reports answer "how many people live in X"; everything
    /// else returns rows.
    pub fn is_single_value(self) -> bool {
        self == Self::PopulationTotal
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FilterRule {
    Required,
    Forbidden,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_and_capital_stop_at_region() {
        for family in [ReportFamily::Country, ReportFamily::CapitalCity] {
            assert!(family.supports(GeoScope::World));
            assert!(family.supports(GeoScope::Continent));
            assert!(family.supports(GeoScope::Region));
            assert!(!family.supports(GeoScope::Country));
            assert!(!family.supports(GeoScope::District));
            assert!(!family.supports(GeoScope::City));
        }
    }

    #[test]
    fn city_and_population_total_cover_every_scope() {
        for scope in GeoScope::ALL {
            assert!(ReportFamily::City.supports(scope));
            assert!(ReportFamily::PopulationTotal.supports(scope));
        }
    }

    #[test]
    fn language_breakdown_is_world_only() {
        for scope in GeoScope::ALL {
            assert_eq!(
                ReportFamily::LanguageBreakdown.supports(scope),
                scope == GeoScope::World
            );
        }
    }

    #[test]
    fn population_breakdown_groups_by_three_levels() {
        let supported: Vec<_> = GeoScope::ALL
            .into_iter()
            .filter(|&s| ReportFamily::PopulationBreakdown.supports(s))
            .collect();
        assert_eq!(
            supported,
            vec![GeoScope::Continent, GeoScope::Region, GeoScope::Country]
        );
    }

    #[test]
    fn world_scope_never_takes_a_filter() {
        for family in ReportFamily::ALL {
            if family.supports(GeoScope::World) {
                assert_eq!(
                    family.filter_rule(GeoScope::World),
                    FilterRule::Forbidden,
                    "{}",
                    family.as_str()
                );
            }
        }
    }

    #[test]
    fn breakdown_scopes_are_grouping_levels_not_filters() {
        for scope in [GeoScope::Continent, GeoScope::Region, GeoScope::Country] {
            assert_eq!(
                ReportFamily::PopulationBreakdown.filter_rule(scope),
                FilterRule::Forbidden
            );
        }
    }

    #[test]
    fn scoped_list_reports_require_a_filter() {
        assert_eq!(
            ReportFamily::City.filter_rule(GeoScope::District),
            FilterRule::Required
        );
        assert_eq!(
            ReportFamily::Country.filter_rule(GeoScope::Continent),
            FilterRule::Required
        );
        assert_eq!(
            ReportFamily::PopulationTotal.filter_rule(GeoScope::City),
            FilterRule::Required
        );
    }

    #[test]
    fn scope_parses_from_snake_case() {
        let scope: GeoScope = serde_json::from_str("\"continent\"").unwrap();
        assert_eq!(scope, GeoScope::Continent);
        assert!(serde_json::from_str::<GeoScope>("\"Continent\"").is_err());
    }
}
