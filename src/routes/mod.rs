pub(crate) mod health;
pub(crate) mod population;
pub(crate) mod reports;

use actix_web::HttpResponse;

use crate::dispatcher::{Report, ReportRequest};
use crate::models::responses::{PopulationPayload, ReportPayload};
use crate::response::ApiResponse;

/// Render a dispatched report into the response envelope. Both report shapes
/// are handled here so every route stays exhaustive without duplicating the
/// payload assembly.
pub(crate) fn respond(request: &ReportRequest, report: Report) -> HttpResponse {
    match report {
        Report::Rows(rows) => ApiResponse::ok(ReportPayload {
            scope: request.scope,
            name: request.filter.clone(),
            count: rows.len(),
            rows,
        }),
        Report::SingleValue(population) => ApiResponse::ok(PopulationPayload {
            scope: request.scope,
            name: request.filter.clone(),
            population,
        }),
    }
}
