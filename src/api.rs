//! The HTTP API exposing the pricing engine.
//!
//! The grid and calendar are reloaded from disk on every request, so
//! responses always reflect the current file contents. Query dates are ISO
//! (`YYYY-MM-DD`), as sent by HTML date inputs; `date_fin` is the departure
//! date, so computations run up to its eve.
use crate::calendar::read_calendar;
use crate::date::{eve_of, format_date};
use crate::engine::{Calculator, StayDetail};
use crate::grid::read_price_grid;
use crate::output::{create_results_directory, summary_file_name, write_summary_csv};
use crate::table::{Platform, SummaryRow, SummaryTable};
use ::log::info;
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::PathBuf;

/// Runtime configuration shared by all request handlers.
#[derive(Clone)]
pub struct ApiConfig {
    /// Directory containing `prix.csv` and `periode.csv`
    pub data_dir: PathBuf,
    /// Directory where generated CSV files are written
    pub results_dir: PathBuf,
}

/// Query parameters of `GET /tableau`
#[derive(Deserialize)]
struct TableauQuery {
    date_debut: NaiveDate,
    date_fin: NaiveDate,
    plateforme: Option<String>,
}

/// Query parameters of `GET /detail`
#[derive(Deserialize)]
struct DetailQuery {
    date_debut: NaiveDate,
    date_fin: NaiveDate,
}

/// Query parameters of `GET /download-csv`
#[derive(Deserialize)]
struct DownloadQuery {
    plateforme: Option<String>,
}

/// Response body of `GET /detail`
#[derive(Serialize)]
struct DetailResponse {
    details: Vec<(String, f64)>,
    total: f64,
    moyenne: f64,
    nb_nuitees: usize,
}

impl From<StayDetail> for DetailResponse {
    fn from(detail: StayDetail) -> Self {
        let total = detail.total.to_f64().unwrap_or_default();
        let moyenne = detail.mean().to_f64().unwrap_or_default();
        let nb_nuitees = detail.nights.len();
        let details = detail
            .nights
            .into_iter()
            .map(|(day, price)| (format_date(day), price.to_f64().unwrap_or_default()))
            .collect();

        Self {
            details,
            total,
            moyenne,
            nb_nuitees,
        }
    }
}

/// Translate a computation error into a JSON error response.
fn error_response(err: anyhow::Error) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": format!("{err:#}") }))
}

/// Build the clipped summary table and write its CSV side-effect file.
fn build_tableau(config: &ApiConfig, query: &TableauQuery) -> Result<Vec<SummaryRow>> {
    let platform = query.plateforme.as_deref().and_then(Platform::parse);

    let grid = read_price_grid(&config.data_dir)?;
    let calendar = read_calendar(&config.data_dir, &grid)?;
    let calculator = Calculator::new(&calendar, &grid);
    let table = SummaryTable::new(&calculator, platform);

    let rows = table.build_range(query.date_debut, eve_of(query.date_fin)?)?;

    // Written eagerly so /download-csv can serve it immediately
    let results_dir = create_results_directory(&config.results_dir)?;
    write_summary_csv(&results_dir.join(summary_file_name(platform)), &rows)?;

    Ok(rows)
}

/// Compute the per-night detail of a stay.
fn build_detail(config: &ApiConfig, query: &DetailQuery) -> Result<StayDetail> {
    let grid = read_price_grid(&config.data_dir)?;
    let calendar = read_calendar(&config.data_dir, &grid)?;
    let calculator = Calculator::new(&calendar, &grid);

    calculator.compute_range(query.date_debut, eve_of(query.date_fin)?)
}

/// `GET /tableau` — the clipped summary table as JSON rows.
async fn tableau(config: web::Data<ApiConfig>, query: web::Query<TableauQuery>) -> impl Responder {
    match build_tableau(&config, &query) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(err) => error_response(err),
    }
}

/// `GET /detail` — the per-night price detail with totals.
async fn detail(config: web::Data<ApiConfig>, query: web::Query<DetailQuery>) -> impl Responder {
    match build_detail(&config, &query) {
        Ok(detail) => HttpResponse::Ok().json(DetailResponse::from(detail)),
        Err(err) => error_response(err),
    }
}

/// `GET /download-csv` — the CSV file generated by the last `/tableau` call.
async fn download_csv(
    config: web::Data<ApiConfig>,
    query: web::Query<DownloadQuery>,
) -> impl Responder {
    let platform = query.plateforme.as_deref().and_then(Platform::parse);
    let file_name = summary_file_name(platform);

    match fs::read(config.results_dir.join(&file_name)) {
        Ok(contents) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{file_name}\""),
            ))
            .body(contents),
        Err(_) => {
            HttpResponse::NotFound().json(json!({ "error": "Veuillez d'abord lancer un calcul." }))
        }
    }
}

/// Configure the API routes on an actix-web app.
fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/tableau", web::get().to(tableau))
        .route("/detail", web::get().to(detail))
        .route("/download-csv", web::get().to(download_csv));
}

/// Run the HTTP server until it is shut down.
pub async fn serve(config: ApiConfig, port: u16) -> Result<()> {
    info!("Listening on http://127.0.0.1:{port}");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config.clone()))
            .configure(configure)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await?;

    Ok(())
}
