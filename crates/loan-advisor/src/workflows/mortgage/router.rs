use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::warn;

use super::domain::{AnalysisError, AnalysisRequest};
use super::service::LoanAdvisor;

/// Router builder exposing the analysis endpoint and the program listing.
pub fn advisor_router(advisor: Arc<LoanAdvisor>) -> Router {
    Router::new()
        .route("/api/v1/mortgage/analysis", post(analysis_handler))
        .route("/api/v1/mortgage/programs", get(programs_handler))
        .with_state(advisor)
}

pub(crate) async fn analysis_handler(
    State(advisor): State<Arc<LoanAdvisor>>,
    axum::Json(request): axum::Json<AnalysisRequest>,
) -> Response {
    match advisor.analyze(&request) {
        Ok(analysis) => (StatusCode::OK, axum::Json(analysis)).into_response(),
        Err(error @ AnalysisError::InvalidInput { .. }) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            warn!(error = %other, "loan analysis failed");
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn programs_handler(State(advisor): State<Arc<LoanAdvisor>>) -> Response {
    (StatusCode::OK, axum::Json(advisor.catalog().programs())).into_response()
}
