//! Cluster routes (e.g., /api/v1/clusters/*); resource and metrics routes nest under a cluster id

use axum::{routing::get, Router};
use crate::api::controller::cluster::ClusterController;
use crate::api::controller::k8s::overview::ClusterOverviewController;
use crate::api::routes::k8s_routes::k8s_routes;
use crate::api::routes::metrics_routes::metrics_routes;
use crate::app_state::AppState;

pub fn cluster_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(ClusterController::list_clusters).post(ClusterController::register_cluster),
        )
        .route(
            "/{cluster_id}",
            get(ClusterController::get_cluster).delete(ClusterController::unregister_cluster),
        )
        .route(
            "/{cluster_id}/overview",
            get(ClusterOverviewController::get_cluster_overview),
        )
        .nest("/{cluster_id}/k8s", k8s_routes())
        .nest("/{cluster_id}/metrics", metrics_routes())
}
