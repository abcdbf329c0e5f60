//! HTTP surface for the dashboard.
//!
//! Serves the page itself, the JSON API the page re-fetches when the metric
//! selector changes, and live-rendered SVG charts. Handlers read the static
//! dataset and call the pure calculator per request; there is no shared
//! mutable state.

use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::perf::{AnalysisError, Measurement, Metric};
use crate::perf_calc::{compute_improvements, compute_report, ImprovementReport};
use crate::perf_data::dataset;
use crate::plot;
use crate::report;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidMetric(_) => Self::BadRequest(err.to_string()),
            _ => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct MetricQuery {
    metric: Option<String>,
}

impl MetricQuery {
    /// Resolve the query parameter, defaulting to processing time — the
    /// selector's initial position on the dashboard.
    fn resolve(&self) -> Result<Metric, ApiError> {
        let raw = self.metric.as_deref().unwrap_or("processing_time");
        Metric::from_str(raw).ok_or_else(|| {
            warn!(metric = raw, "rejected unknown metric");
            ApiError::from(AnalysisError::InvalidMetric(raw.to_string()))
        })
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/measurements", get(measurements))
        .route("/improvements", get(improvements))
        .route("/charts/comparison.svg", get(comparison_chart))
        .route("/charts/improvement.svg", get(improvement_chart))
}

pub async fn serve(port: u16) -> anyhow::Result<()> {
    let addr = format!("127.0.0.1:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("dashboard available at http://{addr}");
    axum::serve(listener, router()).await?;
    Ok(())
}

async fn dashboard(Query(query): Query<MetricQuery>) -> Result<Html<String>, ApiError> {
    let metric = query.resolve()?;
    let report = compute_report(dataset(), metric)?;
    let comparison_src = format!("/charts/comparison.svg?metric={}", metric.slug());
    let improvement_src = format!("/charts/improvement.svg?metric={}", metric.slug());
    Ok(Html(report::dashboard_html(
        dataset(),
        &report,
        &comparison_src,
        &improvement_src,
        true,
    )))
}

async fn measurements() -> Json<&'static [Measurement]> {
    Json(dataset())
}

async fn improvements(
    Query(query): Query<MetricQuery>,
) -> Result<Json<ImprovementReport>, ApiError> {
    let metric = query.resolve()?;
    let report = compute_report(dataset(), metric)?;
    Ok(Json(report))
}

async fn comparison_chart(Query(query): Query<MetricQuery>) -> Result<Response, ApiError> {
    let metric = query.resolve()?;
    let svg = plot::comparison_chart_svg(dataset(), metric)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(svg_response(svg))
}

async fn improvement_chart(Query(query): Query<MetricQuery>) -> Result<Response, ApiError> {
    let metric = query.resolve()?;
    let improvements = compute_improvements(dataset(), metric)?;
    let svg = plot::improvement_chart_svg(&improvements)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(svg_response(svg))
}

fn svg_response(svg: String) -> Response {
    ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_query_defaults_to_processing_time() {
        let query = MetricQuery { metric: None };
        assert_eq!(query.resolve().unwrap(), Metric::ProcessingTime);
    }

    #[test]
    fn metric_query_accepts_slugs_and_labels() {
        let query = MetricQuery {
            metric: Some("memory_usage".to_string()),
        };
        assert_eq!(query.resolve().unwrap(), Metric::MemoryUsage);

        let query = MetricQuery {
            metric: Some("DB Connections".to_string()),
        };
        assert_eq!(query.resolve().unwrap(), Metric::DbConnections);
    }

    #[test]
    fn unknown_metric_maps_to_bad_request() {
        let query = MetricQuery {
            metric: Some("latency".to_string()),
        };
        let err = query.resolve().unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_pair_maps_to_internal_error() {
        let err = ApiError::from(AnalysisError::MissingPair {
            scenario: crate::perf::Scenario::Small,
            version: crate::perf::Version::Optimized,
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
