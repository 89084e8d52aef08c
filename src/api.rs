//! REST API server for the diligence pipeline
//!
//! The form-based surface: one endpoint accepting the startup
//! description plus the financials CSV as raw text, wrapping the same
//! four-stage pipeline as the console flow.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::error::DiligenceError;
use crate::finance::read_records;
use crate::pipeline::DiligencePipeline;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DiligenceRequest {
    pub startup_description: String,
    /// Raw CSV body with month, expenses, and cash_balance columns.
    pub financials_csv: String,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub pipeline: Arc<DiligencePipeline>,
}

/// Map the error taxonomy onto HTTP statuses. The category label is
/// already part of the Display text.
fn error_status(error: &DiligenceError) -> StatusCode {
    match error {
        DiligenceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DiligenceError::NotFound(_) => StatusCode::NOT_FOUND,
        DiligenceError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        DiligenceError::UpstreamParse(_) | DiligenceError::Upstream(_) => StatusCode::BAD_GATEWAY,
        DiligenceError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Diligence Endpoint
/// =============================

async fn run_diligence(
    State(state): State<ApiState>,
    Json(req): Json<DiligenceRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    info!(
        description_len = req.startup_description.len(),
        csv_len = req.financials_csv.len(),
        "Received diligence request"
    );

    let records = match read_records(req.financials_csv.as_bytes()) {
        Ok(records) => records,
        Err(e) => {
            return (
                error_status(&e),
                Json(ApiResponse::error(e.to_string())),
            );
        }
    };

    match state
        .pipeline
        .run(&req.startup_description, &records)
        .await
    {
        Ok(report) => (StatusCode::OK, Json(ApiResponse::success(report))),
        Err(e) => (error_status(&e), Json(ApiResponse::error(e.to_string()))),
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(pipeline: Arc<DiligencePipeline>) -> Router {
    let state = ApiState { pipeline };

    Router::new()
        .route("/health", axum::routing::get(health))
        .route("/api/diligence", post(run_diligence))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    pipeline: Arc<DiligencePipeline>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(pipeline);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API server listening on http://0.0.0.0:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_per_category() {
        assert_eq!(
            error_status(&DiligenceError::InvalidInput("bad csv".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&DiligenceError::NotFound("benchmarks".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&DiligenceError::Config("no key".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            error_status(&DiligenceError::UpstreamParse("not json".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            error_status(&DiligenceError::Upstream("502 from model".into())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_api_response_envelope() {
        let ok = ApiResponse::success(serde_json::json!({"memo": "text"}));
        assert!(ok.success);
        assert!(ok.error.is_none());
        assert!(ok.data.is_some());

        let err = ApiResponse::error("Invalid input: CSV is empty".to_string());
        assert!(!err.success);
        assert_eq!(err.error.as_deref(), Some("Invalid input: CSV is empty"));
        assert!(err.data.is_none());
    }
}
