use actix_web::{web, HttpResponse, Result as ActixResult};
use deadpool_postgres::Pool;
use validator::Validate;

use crate::dispatcher::{dispatch, ReportRequest};
use crate::errors::AppError;
use crate::models::requests::{LanguageQuery, ReportQuery};
use crate::schema::{GeoScope, ReportFamily};
use crate::validation::normalized;

use super::respond;

#[utoipa::path(
    get,
    path = "/countries",
    tag = "Reports",
    params(
        ("scope" = Option<String>, Query, description = "world | continent | region"),
        ("name" = Option<String>, Query, description = "Area to filter by, required unless scope=world"),
        ("top" = Option<i64>, Query, description = "Return only the N most populated rows")
    ),
    responses(
        (status = 200, description = "Countries sorted by population descending"),
        (status = 400, description = "Unsupported scope or invalid argument")
    )
)]
pub(crate) async fn countries(
    pool: web::Data<Pool>,
    query: web::Query<ReportQuery>,
) -> ActixResult<HttpResponse> {
    report(pool.get_ref(), ReportFamily::Country, query.into_inner()).await
}

#[utoipa::path(
    get,
    path = "/cities",
    tag = "Reports",
    params(
        ("scope" = Option<String>, Query, description = "world | continent | region | country | district | city"),
        ("name" = Option<String>, Query, description = "Area to filter by, required unless scope=world"),
        ("top" = Option<i64>, Query, description = "Return only the N most populated rows")
    ),
    responses(
        (status = 200, description = "Cities sorted by population descending"),
        (status = 400, description = "Unsupported scope or invalid argument")
    )
)]
pub(crate) async fn cities(
    pool: web::Data<Pool>,
    query: web::Query<ReportQuery>,
) -> ActixResult<HttpResponse> {
    report(pool.get_ref(), ReportFamily::City, query.into_inner()).await
}

#[utoipa::path(
    get,
    path = "/capitals",
    tag = "Reports",
    params(
        ("scope" = Option<String>, Query, description = "world | continent | region"),
        ("name" = Option<String>, Query, description = "Area to filter by, required unless scope=world"),
        ("top" = Option<i64>, Query, description = "Return only the N most populated rows")
    ),
    responses(
        (status = 200, description = "Capital cities sorted by population descending"),
        (status = 400, description = "Unsupported scope or invalid argument")
    )
)]
pub(crate) async fn capitals(
    pool: web::Data<Pool>,
    query: web::Query<ReportQuery>,
) -> ActixResult<HttpResponse> {
    report(pool.get_ref(), ReportFamily::CapitalCity, query.into_inner()).await
}

#[utoipa::path(
    get,
    path = "/languages",
    tag = "Reports",
    params(
        ("top" = Option<i64>, Query, description = "Return only the N most spoken languages")
    ),
    responses(
        (status = 200, description = "Major languages by speakers, with world percentage"),
        (status = 400, description = "Invalid argument")
    )
)]
pub(crate) async fn languages(
    pool: web::Data<Pool>,
    query: web::Query<LanguageQuery>,
) -> ActixResult<HttpResponse> {
    let request = ReportRequest {
        family: ReportFamily::LanguageBreakdown,
        scope: GeoScope::World,
        filter: None,
        limit: query.top,
    };
    let client = pool.get().await.map_err(AppError::from)?;
    let result = dispatch(&client, &request).await?;
    Ok(respond(&request, result))
}

async fn report(
    pool: &Pool,
    family: ReportFamily,
    query: ReportQuery,
) -> ActixResult<HttpResponse> {
    query
        .validate()
        .map_err(|e| AppError::InvalidArgument(format!("validation failed: {e}")))?;

    let request = ReportRequest {
        family,
        scope: query.scope,
        filter: normalized(query.name),
        limit: query.top,
    };
    let client = pool.get().await.map_err(AppError::from)?;
    let result = dispatch(&client, &request).await?;
    Ok(respond(&request, result))
}
