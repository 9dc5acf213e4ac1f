//! Pod metrics routes (e.g., /api/v1/clusters/{cluster_id}/metrics/*)

use axum::{routing::{get, post}, Router};
use crate::api::controller::metric::pod::PodMetricsController;
use crate::app_state::AppState;

pub fn metrics_routes() -> Router<AppState> {
    Router::new()
        .route("/pods", get(PodMetricsController::list_pod_metrics))
        .route("/pods/{namespace}/{name}", get(PodMetricsController::get_pod_metrics))
        .route("/namespaces", get(PodMetricsController::get_namespace_usage))
        .route("/status", get(PodMetricsController::get_cache_status))
        .route("/refresh", post(PodMetricsController::refresh))
}
