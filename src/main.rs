mod aggregation;
mod catalog;
mod config;
mod dispatcher;
mod errors;
mod models;
mod repositories;
mod response;
mod routes;
mod schema;
mod validation;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use env_logger::Env;
use tokio_postgres::NoTls;
use utoipa::openapi::Server;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::API_PREFIX;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GeoReport API",
        description = "Population & geography reports over the world sample database: \
            countries, cities and capitals by scope, language statistics, population \
            totals and urban/rural breakdowns.",
        version = "1.0.0"
    ),
    paths(
        routes::health::health,
        routes::reports::countries,
        routes::reports::cities,
        routes::reports::capitals,
        routes::reports::languages,
        routes::population::population_total,
        routes::population::population_breakdown,
    ),
    components(schemas(
        models::records::Country, models::records::City,
        models::records::CapitalCity, models::records::LanguageStat,
        models::records::PopulationBreakdown, models::records::ReportRows,
        aggregation::BreakdownReport,
        models::requests::ReportQuery, models::requests::LanguageQuery,
        models::requests::PopulationQuery, models::requests::BreakdownQuery,
        models::responses::HealthPayload, models::responses::ReportPayload,
        models::responses::PopulationPayload,
        schema::GeoScope,
    )),
    tags(
        (name = "System", description = "Health and status"),
        (name = "Reports", description = "Country, city, capital and language reports"),
        (name = "Population", description = "Population totals and urban/rural breakdowns"),
    )
)]
struct ApiDoc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
    let cfg = config::Config::from_env();

    let pg_config: tokio_postgres::Config = cfg
        .database_url
        .parse()
        .expect("invalid DATABASE_URL");

    let manager = Manager::from_config(
        pg_config,
        NoTls,
        ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        },
    );
    let pool = Pool::builder(manager)
        .max_size(cfg.pool_size)
        .build()
        .expect("failed to create database connection pool");

    let bind = format!("{}:{}", cfg.host, cfg.port);
    log::info!("Starting GeoReport API on {bind}");
    log::info!("Swagger UI: http://{bind}{API_PREFIX}/docs/");

    let mut openapi = ApiDoc::openapi();
    openapi.servers = Some(vec![Server::new(API_PREFIX)]);

    let openapi_url: &'static str = Box::leak(format!("{API_PREFIX}/openapi.json").into_boxed_str());
    let docs_path: &'static str = Box::leak(format!("{API_PREFIX}/docs/{{_:.*}}").into_boxed_str());

    HttpServer::new(move || {
        App::new()
            .wrap(
                Logger::new(r#"%a "%r" %s %b %Dms "%{User-Agent}i""#)
                    .exclude("/api/v1/health"),
            )
            .wrap(Cors::permissive())
            .app_data(web::Data::new(pool.clone()))
            .service(SwaggerUi::new(docs_path).url(openapi_url, openapi.clone()))
            .service(
                web::scope(API_PREFIX)
                    .route("/health", web::get().to(routes::health::health))
                    .route("/countries", web::get().to(routes::reports::countries))
                    .route("/cities", web::get().to(routes::reports::cities))
                    .route("/capitals", web::get().to(routes::reports::capitals))
                    .route("/languages", web::get().to(routes::reports::languages))
                    .route("/population", web::get().to(routes::population::population_total))
                    .route(
                        "/population/breakdown",
                        web::get().to(routes::population::population_breakdown),
                    ),
            )
    })
    .bind(&bind)?
    .run()
    .await
}
