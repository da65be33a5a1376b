use crate::application::use_cases::dataset_catalog::DatasetCatalog;
use crate::application::use_cases::harmonizer::harmonize_rows;
use crate::application::use_cases::metrics_extractor::MetricsExtractor;
use crate::application::use_cases::pivot_generator::generate_pivot;
use crate::application::use_cases::row_filter::{filter_by_date_range, search_rows, DateRange};
use crate::domain::dataset::DatasetSummary;
use crate::domain::error::AppError;
use crate::domain::harmonized::Row;
use crate::domain::pivot::PivotConfig;
use crate::infrastructure::config::AppConfig;
use actix_cors::Cors;
use actix_web::{
    delete, dev::Server, error, get, post, web, App, HttpResponse, HttpServer, Responder,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

pub struct HttpState {
    pub catalog: Mutex<DatasetCatalog>,
    pub metrics: MetricsExtractor,
}

impl HttpState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            catalog: Mutex::new(DatasetCatalog::new()),
            metrics: MetricsExtractor::new(config.metrics.clone()),
        }
    }

    fn catalog(&self) -> Result<MutexGuard<'_, DatasetCatalog>, AppError> {
        self.catalog
            .lock()
            .map_err(|_| AppError::Internal("dataset catalog lock poisoned".to_string()))
    }
}

#[derive(Deserialize)]
pub struct MetricsRequest {
    pub rows: Vec<Row>,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct PivotRequest {
    pub rows: Vec<Row>,
    pub config: PivotConfig,
}

#[derive(Deserialize)]
pub struct SearchRequest {
    pub rows: Vec<Row>,
    #[serde(default)]
    pub term: String,
}

#[derive(Deserialize)]
pub struct DrilldownRequest {
    pub rows: Vec<Row>,
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct CreateDatasetRequest {
    #[serde(default)]
    pub name: String,
    pub rows: Vec<Row>,
}

#[derive(Serialize)]
pub struct RowsResponse<'a> {
    pub count: usize,
    pub rows: Vec<&'a Row>,
}

impl<'a> From<Vec<&'a Row>> for RowsResponse<'a> {
    fn from(rows: Vec<&'a Row>) -> Self {
        Self {
            count: rows.len(),
            rows,
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Map an application error onto an HTTP status, body is the display text
pub fn error_response(err: &AppError) -> HttpResponse {
    let mut builder = match err {
        AppError::NotFound(_) => HttpResponse::NotFound(),
        e if e.is_client_error() => HttpResponse::BadRequest(),
        _ => HttpResponse::InternalServerError(),
    };
    builder.body(err.to_string())
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[post("/harmonize")]
async fn harmonize(rows: web::Json<Vec<Row>>) -> impl Responder {
    info!(rows = rows.len(), "Harmonizing sheet");
    HttpResponse::Ok().json(harmonize_rows(&rows))
}

#[post("/metrics")]
async fn metrics(data: web::Data<HttpState>, req: web::Json<MetricsRequest>) -> impl Responder {
    let today = req.today.unwrap_or_else(|| Local::now().date_naive());
    info!(rows = req.rows.len(), %today, "Extracting dashboard metrics");
    HttpResponse::Ok().json(data.metrics.extract(&req.rows, today))
}

#[post("/pivot")]
async fn pivot(req: web::Json<PivotRequest>) -> impl Responder {
    if let Err(e) = req.config.validate() {
        warn!(error = %e, "Rejected pivot request");
        return error_response(&AppError::ValidationError(e));
    }

    info!(
        rows = req.rows.len(),
        row_field = %req.config.row_field,
        column_field = %req.config.column_field,
        agg = req.config.agg_type.as_str(),
        "Generating pivot"
    );
    HttpResponse::Ok().json(generate_pivot(&req.rows, &req.config))
}

#[post("/search")]
async fn search(req: web::Json<SearchRequest>) -> impl Responder {
    HttpResponse::Ok().json(RowsResponse::from(search_rows(&req.rows, &req.term)))
}

#[post("/drilldown")]
async fn drilldown(req: web::Json<DrilldownRequest>) -> impl Responder {
    let range = DateRange::new(req.start, req.end);
    if let (Some(start), Some(end)) = (range.start, range.end) {
        if start > end {
            return error_response(&AppError::ValidationError(format!(
                "start {} is after end {}",
                start, end
            )));
        }
    }

    HttpResponse::Ok().json(RowsResponse::from(filter_by_date_range(&req.rows, &range)))
}

#[post("/datasets")]
async fn create_dataset(
    data: web::Data<HttpState>,
    req: web::Json<CreateDatasetRequest>,
) -> impl Responder {
    let harmonized = harmonize_rows(&req.rows);

    match data.catalog() {
        Ok(mut catalog) => {
            let id = catalog.add(&req.name, harmonized);
            match catalog.get(&id) {
                Ok(dataset) => HttpResponse::Created().json(DatasetSummary::from(dataset)),
                Err(e) => error_response(&e),
            }
        }
        Err(e) => error_response(&e),
    }
}

#[get("/datasets")]
async fn list_datasets(data: web::Data<HttpState>) -> impl Responder {
    match data.catalog() {
        Ok(catalog) => HttpResponse::Ok().json(catalog.list()),
        Err(e) => error_response(&e),
    }
}

#[get("/datasets/master")]
async fn master_dataset(data: web::Data<HttpState>) -> impl Responder {
    match data.catalog() {
        Ok(catalog) => HttpResponse::Ok().json(catalog.master_view()),
        Err(e) => error_response(&e),
    }
}

#[get("/datasets/{id}")]
async fn get_dataset(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    let result = data.catalog().and_then(|catalog| {
        let dataset = catalog.get(&path)?.clone();
        Ok(dataset)
    });

    match result {
        Ok(dataset) => HttpResponse::Ok().json(dataset),
        Err(e) => error_response(&e),
    }
}

#[delete("/datasets/{id}")]
async fn delete_dataset(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    match data.catalog().and_then(|mut catalog| catalog.remove(&path)) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    }
}

/// JSON extractor settings: body size limit, malformed bodies become 400
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let app_err = AppError::ParseError(err.to_string());
            warn!(error = %app_err, "Rejected request body");
            error::InternalError::from_response(err, error_response(&app_err)).into()
        })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(health)
            .service(harmonize)
            .service(metrics)
            .service(pivot)
            .service(search)
            .service(drilldown)
            .service(create_dataset)
            .service(list_datasets)
            // literal segment before the {id} matcher
            .service(master_dataset)
            .service(get_dataset)
            .service(delete_dataset),
    );
}

pub fn start_server(config: &AppConfig) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState::new(config));
    let body_limit = config.server.max_body_bytes;

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .app_data(json_config(body_limit))
            .configure(configure_routes)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run();

    info!(
        host = %config.server.host,
        port = config.server.port,
        "HTTP API listening"
    );

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{header::ContentType, StatusCode};
    use actix_web::test;

    fn state() -> web::Data<HttpState> {
        web::Data::new(HttpState::new(&AppConfig::default()))
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .app_data(json_config(1024 * 1024))
                    .configure(configure_routes),
            )
            .await
        };
    }

    fn post_json(uri: &str, body: &'static str) -> test::TestRequest {
        test::TestRequest::post()
            .uri(uri)
            .insert_header(ContentType::json())
            .set_payload(body)
    }

    #[actix_web::test]
    async fn test_health() {
        let state = state();
        let app = app!(state);
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
    }

    #[actix_web::test]
    async fn test_harmonize_keeps_column_order() {
        let state = state();
        let app = app!(state);
        let req = post_json(
            "/api/harmonize",
            r#"[
                {"Name": "A", "ID": "123"},
                {"Name": "B", "ID": "abc"},
                {"Name": "", "ID": "12/05/2023"}
            ]"#,
        )
        .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body["headers"],
            serde_json::json!(["Name", "ID (Text)", "ID (Number)", "ID (Date)"])
        );
        assert_eq!(body["originalHeaders"], serde_json::json!(["Name", "ID"]));
        assert_eq!(body["rows"].as_array().unwrap().len(), 2);
        assert_eq!(body["rows"][1]["ID (Date)"], "12/05/2023");
    }

    #[actix_web::test]
    async fn test_metrics_with_explicit_today() {
        let state = state();
        let app = app!(state);
        let req = post_json(
            "/api/metrics",
            r#"{
                "today": "2024-06-15",
                "rows": [
                    {"Name": "A", "Card (Date)": "15/06/2024", "Remarks": "He Has An Escape Report"},
                    {"Name": "B", "Card (Date)": "01/01/2024"}
                ]
            }"#,
        )
        .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["escapeCount"], 1);
        assert_eq!(body["activeCount"], 1);
        assert_eq!(body["expiredCardCount"], 1);
        assert_eq!(body["upcomingRenewals"], 1);
        assert_eq!(body["monthlyRenewals"]["2024-06"], 1);
    }

    #[actix_web::test]
    async fn test_pivot_sum() {
        let state = state();
        let app = app!(state);
        let req = post_json(
            "/api/pivot",
            r#"{
                "rows": [{"A": "x", "B": "y", "V": "10"}, {"A": "x", "B": "y", "V": "5"}],
                "config": {"rowField": "A", "columnField": "B", "valueField": "V", "aggType": "sum"}
            }"#,
        )
        .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["rows"][0]["row"], "x");
        assert_eq!(body["rows"][0]["y"], 15.0);
        assert_eq!(body["columns"], serde_json::json!(["y"]));
    }

    #[actix_web::test]
    async fn test_pivot_rejects_blank_field() {
        let state = state();
        let app = app!(state);
        let req = post_json(
            "/api/pivot",
            r#"{"rows": [], "config": {"rowField": "", "columnField": "B", "valueField": "V"}}"#,
        )
        .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_malformed_body_is_bad_request() {
        let state = state();
        let app = app!(state);
        let req = post_json("/api/harmonize", r#"{"not": "an array"}"#).to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_search_and_drilldown() {
        let state = state();
        let app = app!(state);

        let req = post_json(
            "/api/search",
            r#"{"term": "dubai", "rows": [{"Name": "A", "City": "Dubai"}, {"Name": "B", "City": "Ajman"}]}"#,
        )
        .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["rows"][0]["Name"], "A");

        let req = post_json(
            "/api/drilldown",
            r#"{
                "start": "2024-01-01",
                "end": "2024-01-31",
                "rows": [
                    {"Name": "A", "Card (Date)": "10/01/2024"},
                    {"Name": "B", "Card (Date)": "10/02/2024"}
                ]
            }"#,
        )
        .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["rows"][0]["Name"], "A");
    }

    #[actix_web::test]
    async fn test_drilldown_rejects_inverted_range() {
        let state = state();
        let app = app!(state);
        let req = post_json(
            "/api/drilldown",
            r#"{"start": "2024-02-01", "end": "2024-01-01", "rows": []}"#,
        )
        .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_dataset_lifecycle() {
        let state = state();
        let app = app!(state);

        let req = post_json(
            "/api/datasets",
            r#"{"name": "Staff", "rows": [{"Name": "A", "City": "Dubai"}]}"#,
        )
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let summary: serde_json::Value = test::read_body_json(resp).await;
        let id = summary["id"].as_str().unwrap().to_string();
        assert_eq!(summary["rowCount"], 1);

        let req = post_json("/api/datasets", r#"{"rows": [{"Name": "B", "Phone": "1"}]}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::get().uri("/api/datasets").to_request();
        let list: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list.as_array().unwrap().len(), 2);
        assert_eq!(list[1]["name"], "Imported_Sheet");

        let req = test::TestRequest::get()
            .uri("/api/datasets/master")
            .to_request();
        let master: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            master["headers"],
            serde_json::json!(["Name", "City", "Phone"])
        );

        let req = test::TestRequest::get()
            .uri(&format!("/api/datasets/{}", id))
            .to_request();
        let dataset: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(dataset["name"], "Staff");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/datasets/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("/api/datasets/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_error_status_mapping() {
        let status = |e: AppError| error_response(&e).status();
        assert_eq!(status(AppError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status(AppError::ValidationError("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status(AppError::ParseError("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(AppError::Internal("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
