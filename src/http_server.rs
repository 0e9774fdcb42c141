//! HTTP API for employee search
//!
//! Routes:
//! - `GET  /employees` every employee
//! - `POST /employees/search` natural-language search, body `{ "query": "..." }`
//! - `POST /employees/search/explain` compiled predicate without running it
//! - `GET  /health` liveness probe

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Method},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::employee::EmployeeRecord;
use crate::error::{Error, Result};
use crate::nlp::FilterPredicate;
use crate::service::EmployeeSearchService;

/// Search request body; `query` may be absent so the handler can answer 400
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub query: String,
    pub predicate: FilterPredicate,
}

/// Builds the application router
pub fn router(service: EmployeeSearchService, cors_enabled: bool) -> Router {
    let app = Router::new()
        .route("/employees", get(list_employees))
        .route("/employees/search", post(search_employees))
        .route("/employees/search/explain", post(explain_search))
        .route("/health", get(health))
        .with_state(service)
        .layer(TraceLayer::new_for_http());

    if cors_enabled {
        app.layer(cors_layer())
    } else {
        app
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

/// Serves `app` until Ctrl-C
pub async fn serve(addr: SocketAddr, app: Router) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Employee search API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn list_employees(State(service): State<EmployeeSearchService>) -> Result<Json<Vec<EmployeeRecord>>> {
    Ok(Json(service.list_all().await?))
}

async fn search_employees(
    State(service): State<EmployeeSearchService>,
    payload: std::result::Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Vec<EmployeeRecord>>> {
    let request = parse_body(payload)?;
    let employees = service.search(request.query.as_deref()).await?;
    Ok(Json(employees))
}

async fn explain_search(
    State(service): State<EmployeeSearchService>,
    payload: std::result::Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<ExplainResponse>> {
    let request = parse_body(payload)?;
    let predicate = service.explain(request.query.as_deref())?;
    Ok(Json(ExplainResponse {
        query: request.query.unwrap_or_default(),
        predicate,
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn parse_body(payload: std::result::Result<Json<SearchRequest>, JsonRejection>) -> Result<SearchRequest> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            tracing::debug!(%rejection, "rejected search body");
            Err(Error::Validation(format!(
                "Invalid request body: {}",
                rejection.body_text()
            )))
        }
    }
}
