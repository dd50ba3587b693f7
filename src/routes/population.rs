use actix_web::{web, HttpResponse, Result as ActixResult};
use deadpool_postgres::Pool;
use validator::Validate;

use crate::dispatcher::{dispatch, ReportRequest};
use crate::errors::AppError;
use crate::models::requests::{BreakdownQuery, PopulationQuery};
use crate::schema::ReportFamily;
use crate::validation::normalized;

use super::respond;

#[utoipa::path(
    get,
    path = "/population",
    tag = "Population",
    params(
        ("scope" = Option<String>, Query, description = "world | continent | region | country | district | city"),
        ("name" = Option<String>, Query, description = "Area to look up, required unless scope=world")
    ),
    responses(
        (status = 200, description = "Total population; null when the area is unknown"),
        (status = 400, description = "Unsupported scope or invalid argument")
    )
)]
pub(crate) async fn population_total(
    pool: web::Data<Pool>,
    query: web::Query<PopulationQuery>,
) -> ActixResult<HttpResponse> {
    query
        .validate()
        .map_err(|e| AppError::InvalidArgument(format!("validation failed: {e}")))?;

    let query = query.into_inner();
    let request = ReportRequest {
        family: ReportFamily::PopulationTotal,
        scope: query.scope,
        filter: normalized(query.name),
        limit: None,
    };
    let client = pool.get().await.map_err(AppError::from)?;
    let result = dispatch(&client, &request).await?;
    Ok(respond(&request, result))
}

#[utoipa::path(
    get,
    path = "/population/breakdown",
    tag = "Population",
    params(
        ("scope" = String, Query, description = "Grouping level: continent | region | country"),
        ("top" = Option<i64>, Query, description = "Return only the N most populated areas")
    ),
    responses(
        (status = 200, description = "Urban/rural population split per area, with percentages"),
        (status = 400, description = "Unsupported scope or invalid argument")
    )
)]
pub(crate) async fn population_breakdown(
    pool: web::Data<Pool>,
    query: web::Query<BreakdownQuery>,
) -> ActixResult<HttpResponse> {
    let scope = query.scope.ok_or_else(|| {
        AppError::InvalidArgument("scope is required: one of continent, region, country".into())
    })?;

    let request = ReportRequest {
        family: ReportFamily::PopulationBreakdown,
        scope,
        filter: None,
        limit: query.top,
    };
    let client = pool.get().await.map_err(AppError::from)?;
    let result = dispatch(&client, &request).await?;
    Ok(respond(&request, result))
}
