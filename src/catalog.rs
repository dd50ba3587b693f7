//! Static catalog of report queries against the `world` schema.
//!
//! Every valid (family, scope) pair maps to one [`QueryTemplate`] holding the
//! unranked variant and the top-N variant. List queries order by population
//! descending; ties are left in whatever order the database yields them.
//! Filtered templates bind the filter value as `$1`; ranked variants bind the
//! row limit as the last parameter.

use crate::schema::{GeoScope, ReportFamily};

pub(crate) struct QueryTemplate {
    pub all: &'static str,
    pub top_n: &'static str,
}

// ── Country reports ──

const COUNTRIES: QueryTemplate = QueryTemplate {
    all: "SELECT co.code, co.name, co.continent, co.region, \
          co.population::bigint AS population, ca.name AS capital \
          FROM country co LEFT JOIN city ca ON ca.id = co.capital \
          ORDER BY co.population DESC",
    top_n: "SELECT co.code, co.name, co.continent, co.region, \
            co.population::bigint AS population, ca.name AS capital \
            FROM country co LEFT JOIN city ca ON ca.id = co.capital \
            ORDER BY co.population DESC LIMIT $1",
};

const COUNTRIES_BY_CONTINENT: QueryTemplate = QueryTemplate {
    all: "SELECT co.code, co.name, co.continent, co.region, \
          co.population::bigint AS population, ca.name AS capital \
          FROM country co LEFT JOIN city ca ON ca.id = co.capital \
          WHERE co.continent = $1 ORDER BY co.population DESC",
    top_n: "SELECT co.code, co.name, co.continent, co.region, \
            co.population::bigint AS population, ca.name AS capital \
            FROM country co LEFT JOIN city ca ON ca.id = co.capital \
            WHERE co.continent = $1 ORDER BY co.population DESC LIMIT $2",
};

const COUNTRIES_BY_REGION: QueryTemplate = QueryTemplate {
    all: "SELECT co.code, co.name, co.continent, co.region, \
          co.population::bigint AS population, ca.name AS capital \
          FROM country co LEFT JOIN city ca ON ca.id = co.capital \
          WHERE co.region = $1 ORDER BY co.population DESC",
    top_n: "SELECT co.code, co.name, co.continent, co.region, \
            co.population::bigint AS population, ca.name AS capital \
            FROM country co LEFT JOIN city ca ON ca.id = co.capital \
            WHERE co.region = $1 ORDER BY co.population DESC LIMIT $2",
};

// ── City reports ──

const CITIES: QueryTemplate = QueryTemplate {
    all: "SELECT ci.name, co.name AS country, ci.district, \
          ci.population::bigint AS population \
          FROM city ci JOIN country co ON co.code = ci.countrycode \
          ORDER BY ci.population DESC",
    top_n: "SELECT ci.name, co.name AS country, ci.district, \
            ci.population::bigint AS population \
            FROM city ci JOIN country co ON co.code = ci.countrycode \
            ORDER BY ci.population DESC LIMIT $1",
};

const CITIES_BY_CONTINENT: QueryTemplate = QueryTemplate {
    all: "SELECT ci.name, co.name AS country, ci.district, \
          ci.population::bigint AS population \
          FROM city ci JOIN country co ON co.code = ci.countrycode \
          WHERE co.continent = $1 ORDER BY ci.population DESC",
    top_n: "SELECT ci.name, co.name AS country, ci.district, \
            ci.population::bigint AS population \
            FROM city ci JOIN country co ON co.code = ci.countrycode \
            WHERE co.continent = $1 ORDER BY ci.population DESC LIMIT $2",
};

const CITIES_BY_REGION: QueryTemplate = QueryTemplate {
    all: "SELECT ci.name, co.name AS country, ci.district, \
          ci.population::bigint AS population \
          FROM city ci JOIN country co ON co.code = ci.countrycode \
          WHERE co.region = $1 ORDER BY ci.population DESC",
    top_n: "SELECT ci.name, co.name AS country, ci.district, \
            ci.population::bigint AS population \
            FROM city ci JOIN country co ON co.code = ci.countrycode \
            WHERE co.region = $1 ORDER BY ci.population DESC LIMIT $2",
};

const CITIES_BY_COUNTRY: QueryTemplate = QueryTemplate {
    all: "SELECT ci.name, co.name AS country, ci.district, \
          ci.population::bigint AS population \
          FROM city ci JOIN country co ON co.code = ci.countrycode \
          WHERE co.name = $1 ORDER BY ci.population DESC",
    top_n: "SELECT ci.name, co.name AS country, ci.district, \
            ci.population::bigint AS population \
            FROM city ci JOIN country co ON co.code = ci.countrycode \
            WHERE co.name = $1 ORDER BY ci.population DESC LIMIT $2",
};

const CITIES_BY_DISTRICT: QueryTemplate = QueryTemplate {
    all: "SELECT ci.name, co.name AS country, ci.district, \
          ci.population::bigint AS population \
          FROM city ci JOIN country co ON co.code = ci.countrycode \
          WHERE ci.district = $1 ORDER BY ci.population DESC",
    top_n: "SELECT ci.name, co.name AS country, ci.district, \
            ci.population::bigint AS population \
            FROM city ci JOIN country co ON co.code = ci.countrycode \
            WHERE ci.district = $1 ORDER BY ci.population DESC LIMIT $2",
};

const CITIES_BY_NAME: QueryTemplate = QueryTemplate {
    all: "SELECT ci.name, co.name AS country, ci.district, \
          ci.population::bigint AS population \
          FROM city ci JOIN country co ON co.code = ci.countrycode \
          WHERE ci.name = $1 ORDER BY ci.population DESC",
    top_n: "SELECT ci.name, co.name AS country, ci.district, \
            ci.population::bigint AS population \
            FROM city ci JOIN country co ON co.code = ci.countrycode \
            WHERE ci.name = $1 ORDER BY ci.population DESC LIMIT $2",
};

// ── Capital city reports ──

const CAPITAL_CITIES: QueryTemplate = QueryTemplate {
    all: "SELECT ci.name, co.name AS country, ci.population::bigint AS population \
          FROM city ci JOIN country co ON co.capital = ci.id \
          ORDER BY ci.population DESC",
    top_n: "SELECT ci.name, co.name AS country, ci.population::bigint AS population \
            FROM city ci JOIN country co ON co.capital = ci.id \
            ORDER BY ci.population DESC LIMIT $1",
};

const CAPITAL_CITIES_BY_CONTINENT: QueryTemplate = QueryTemplate {
    all: "SELECT ci.name, co.name AS country, ci.population::bigint AS population \
          FROM city ci JOIN country co ON co.capital = ci.id \
          WHERE co.continent = $1 ORDER BY ci.population DESC",
    top_n: "SELECT ci.name, co.name AS country, ci.population::bigint AS population \
            FROM city ci JOIN country co ON co.capital = ci.id \
            WHERE co.continent = $1 ORDER BY ci.population DESC LIMIT $2",
};

const CAPITAL_CITIES_BY_REGION: QueryTemplate = QueryTemplate {
    all: "SELECT ci.name, co.name AS country, ci.population::bigint AS population \
          FROM city ci JOIN country co ON co.capital = ci.id \
          WHERE co.region = $1 ORDER BY ci.population DESC",
    top_n: "SELECT ci.name, co.name AS country, ci.population::bigint AS population \
            FROM city ci JOIN country co ON co.capital = ci.id \
            WHERE co.region = $1 ORDER BY ci.population DESC LIMIT $2",
};

// ── Language report ──

const LANGUAGE_BREAKDOWN: QueryTemplate = QueryTemplate {
    all: "SELECT cl.language, \
          SUM(co.population * cl.percentage / 100.0)::bigint AS speakers, \
          (SUM(co.population * cl.percentage / 100.0) * 100.0 \
              / (SELECT SUM(population) FROM country))::float8 AS world_percentage \
          FROM countrylanguage cl JOIN country co ON co.code = cl.countrycode \
          WHERE cl.language IN ('Chinese', 'English', 'Hindi', 'Spanish', 'Arabic') \
          GROUP BY cl.language ORDER BY speakers DESC",
    top_n: "SELECT cl.language, \
            SUM(co.population * cl.percentage / 100.0)::bigint AS speakers, \
            (SUM(co.population * cl.percentage / 100.0) * 100.0 \
                / (SELECT SUM(population) FROM country))::float8 AS world_percentage \
            FROM countrylanguage cl JOIN country co ON co.code = cl.countrycode \
            WHERE cl.language IN ('Chinese', 'English', 'Hindi', 'Spanish', 'Arabic') \
            GROUP BY cl.language ORDER BY speakers DESC LIMIT $1",
};

// ── Population breakdowns (total / in cities / not in cities) ──
//
// City population is aggregated per country first; countries without any
// recorded city keep an urban population of 0 instead of dropping out of
// the join.

const CONTINENT_POPULATION_SUMMARY: QueryTemplate = QueryTemplate {
    all: "SELECT co.continent AS area, \
          SUM(co.population)::bigint AS total_population, \
          COALESCE(SUM(urban.population), 0)::bigint AS city_population, \
          (SUM(co.population) - COALESCE(SUM(urban.population), 0))::bigint AS non_city_population \
          FROM country co LEFT JOIN (SELECT countrycode, SUM(population) AS population \
              FROM city GROUP BY countrycode) urban ON urban.countrycode = co.code \
          GROUP BY co.continent ORDER BY total_population DESC",
    top_n: "SELECT co.continent AS area, \
            SUM(co.population)::bigint AS total_population, \
            COALESCE(SUM(urban.population), 0)::bigint AS city_population, \
            (SUM(co.population) - COALESCE(SUM(urban.population), 0))::bigint AS non_city_population \
            FROM country co LEFT JOIN (SELECT countrycode, SUM(population) AS population \
                FROM city GROUP BY countrycode) urban ON urban.countrycode = co.code \
            GROUP BY co.continent ORDER BY total_population DESC LIMIT $1",
};

const REGION_POPULATION_SUMMARY: QueryTemplate = QueryTemplate {
    all: "SELECT co.region AS area, \
          SUM(co.population)::bigint AS total_population, \
          COALESCE(SUM(urban.population), 0)::bigint AS city_population, \
          (SUM(co.population) - COALESCE(SUM(urban.population), 0))::bigint AS non_city_population \
          FROM country co LEFT JOIN (SELECT countrycode, SUM(population) AS population \
              FROM city GROUP BY countrycode) urban ON urban.countrycode = co.code \
          GROUP BY co.region ORDER BY total_population DESC",
    top_n: "SELECT co.region AS area, \
            SUM(co.population)::bigint AS total_population, \
            COALESCE(SUM(urban.population), 0)::bigint AS city_population, \
            (SUM(co.population) - COALESCE(SUM(urban.population), 0))::bigint AS non_city_population \
            FROM country co LEFT JOIN (SELECT countrycode, SUM(population) AS population \
                FROM city GROUP BY countrycode) urban ON urban.countrycode = co.code \
            GROUP BY co.region ORDER BY total_population DESC LIMIT $1",
};

const COUNTRY_POPULATION_SUMMARY: QueryTemplate = QueryTemplate {
    all: "SELECT co.name AS area, \
          SUM(co.population)::bigint AS total_population, \
          COALESCE(SUM(urban.population), 0)::bigint AS city_population, \
          (SUM(co.population) - COALESCE(SUM(urban.population), 0))::bigint AS non_city_population \
          FROM country co LEFT JOIN (SELECT countrycode, SUM(population) AS population \
              FROM city GROUP BY countrycode) urban ON urban.countrycode = co.code \
          GROUP BY co.code, co.name ORDER BY total_population DESC",
    top_n: "SELECT co.name AS area, \
            SUM(co.population)::bigint AS total_population, \
            COALESCE(SUM(urban.population), 0)::bigint AS city_population, \
            (SUM(co.population) - COALESCE(SUM(urban.population), 0))::bigint AS non_city_population \
            FROM country co LEFT JOIN (SELECT countrycode, SUM(population) AS population \
                FROM city GROUP BY countrycode) urban ON urban.countrycode = co.code \
            GROUP BY co.code, co.name ORDER BY total_population DESC LIMIT $1",
};

// ── Single-value population totals ──
//
// SUM over an empty set yields SQL NULL, which the repository reads as "no
// data". A matching area whose recorded population is zero yields 0 instead;
// the two are never conflated.

const WORLD_POPULATION: &str =
    "SELECT SUM(population)::bigint AS total_population FROM country";

const POPULATION_BY_CONTINENT: &str =
    "SELECT SUM(population)::bigint AS total_population FROM country WHERE continent = $1";

const POPULATION_BY_REGION: &str =
    "SELECT SUM(population)::bigint AS total_population FROM country WHERE region = $1";

const POPULATION_BY_COUNTRY: &str =
    "SELECT SUM(population)::bigint AS total_population FROM country WHERE name = $1";

const POPULATION_BY_DISTRICT: &str =
    "SELECT SUM(population)::bigint AS total_population FROM city WHERE district = $1";

const POPULATION_BY_CITY: &str =
    "SELECT SUM(population)::bigint AS total_population FROM city WHERE name = $1";

/// Template for a list-returning (family, scope) pair, `None` for pairs the
/// schema rejects. `PopulationTotal` is single-valued and served by
/// [`population_total`] instead.
pub(crate) fn list_template(
    family: ReportFamily,
    scope: GeoScope,
) -> Option<&'static QueryTemplate> {
    let template = match (family, scope) {
        (ReportFamily::Country, GeoScope::World) => &COUNTRIES,
        (ReportFamily::Country, GeoScope::Continent) => &COUNTRIES_BY_CONTINENT,
        (ReportFamily::Country, GeoScope::Region) => &COUNTRIES_BY_REGION,
        (ReportFamily::City, GeoScope::World) => &CITIES,
        (ReportFamily::City, GeoScope::Continent) => &CITIES_BY_CONTINENT,
        (ReportFamily::City, GeoScope::Region) => &CITIES_BY_REGION,
        (ReportFamily::City, GeoScope::Country) => &CITIES_BY_COUNTRY,
        (ReportFamily::City, GeoScope::District) => &CITIES_BY_DISTRICT,
        (ReportFamily::City, GeoScope::City) => &CITIES_BY_NAME,
        (ReportFamily::CapitalCity, GeoScope::World) => &CAPITAL_CITIES,
        (ReportFamily::CapitalCity, GeoScope::Continent) => &CAPITAL_CITIES_BY_CONTINENT,
        (ReportFamily::CapitalCity, GeoScope::Region) => &CAPITAL_CITIES_BY_REGION,
        (ReportFamily::LanguageBreakdown, GeoScope::World) => &LANGUAGE_BREAKDOWN,
        (ReportFamily::PopulationBreakdown, GeoScope::Continent) => &CONTINENT_POPULATION_SUMMARY,
        (ReportFamily::PopulationBreakdown, GeoScope::Region) => &REGION_POPULATION_SUMMARY,
        (ReportFamily::PopulationBreakdown, GeoScope::Country) => &COUNTRY_POPULATION_SUMMARY,
        _ => return None,
    };
    Some(template)
}

/// Single-value population query for a scope.
pub(crate) fn population_total(scope: GeoScope) -> &'static str {
    match scope {
        GeoScope::World => WORLD_POPULATION,
        GeoScope::Continent => POPULATION_BY_CONTINENT,
        GeoScope::Region => POPULATION_BY_REGION,
        GeoScope::Country => POPULATION_BY_COUNTRY,
        GeoScope::District => POPULATION_BY_DISTRICT,
        GeoScope::City => POPULATION_BY_CITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FilterRule;

    fn list_pairs() -> impl Iterator<Item = (ReportFamily, GeoScope)> {
        ReportFamily::ALL.into_iter().flat_map(|family| {
            GeoScope::ALL
                .into_iter()
                .filter(move |&scope| {
                    family.supports(scope) && family != ReportFamily::PopulationTotal
                })
                .map(move |scope| (family, scope))
        })
    }

    #[test]
    fn every_supported_list_pair_has_a_template() {
        for (family, scope) in list_pairs() {
            assert!(
                list_template(family, scope).is_some(),
                "missing template for {} / {}",
                family.as_str(),
                scope.as_str()
            );
        }
    }

    #[test]
    fn unsupported_pairs_have_no_template() {
        assert!(list_template(ReportFamily::Country, GeoScope::District).is_none());
        assert!(list_template(ReportFamily::CapitalCity, GeoScope::City).is_none());
        assert!(list_template(ReportFamily::LanguageBreakdown, GeoScope::Continent).is_none());
        assert!(list_template(ReportFamily::PopulationBreakdown, GeoScope::World).is_none());
    }

    #[test]
    fn list_queries_sort_by_population_descending() {
        for (family, scope) in list_pairs() {
            let t = list_template(family, scope).unwrap();
            for sql in [t.all, t.top_n] {
                assert!(
                    sql.contains("ORDER BY") && sql.contains("DESC"),
                    "{} / {} not sorted",
                    family.as_str(),
                    scope.as_str()
                );
            }
        }
    }

    #[test]
    fn ranked_variants_bind_a_limit() {
        for (family, scope) in list_pairs() {
            let t = list_template(family, scope).unwrap();
            assert!(t.top_n.contains("LIMIT $"), "{}", t.top_n);
            assert!(!t.all.contains("LIMIT"), "{}", t.all);
        }
    }

    #[test]
    fn filter_parameters_match_the_schema_rule() {
        for (family, scope) in list_pairs() {
            let t = list_template(family, scope).unwrap();
            match family.filter_rule(scope) {
                FilterRule::Required => {
                    assert!(t.all.contains("$1"), "{}", t.all);
                    assert!(t.top_n.ends_with("LIMIT $2"), "{}", t.top_n);
                }
                FilterRule::Forbidden => {
                    assert!(!t.all.contains('$'), "{}", t.all);
                    assert!(t.top_n.ends_with("LIMIT $1"), "{}", t.top_n);
                }
            }
        }
    }

    #[test]
    fn population_totals_cover_every_scope() {
        for scope in GeoScope::ALL {
            let sql = population_total(scope);
            assert!(sql.contains("total_population"));
            if scope == GeoScope::World {
                assert!(!sql.contains("$1"));
            } else {
                assert!(sql.contains("$1"));
            }
        }
    }
}
