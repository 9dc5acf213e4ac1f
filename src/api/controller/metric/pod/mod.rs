//! Pod metrics controller: serves the per-cluster pod metrics cache

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::api::dto::metrics_dto::PodMetricsQuery;
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::core::state::runtime::pod_metrics::pod_metrics_entity::PodMetricsSnapshot;
use crate::core::state::runtime::pod_metrics::pod_metrics_state_manager::RefreshOutcome;
use crate::domain::metric::pod::dto::{NamespaceUsage, PodMetricsCacheStatus};
use crate::errors::AppError;

pub struct PodMetricsController;

impl PodMetricsController {
    /// `?namespace=&sort=cpu|memory|name&limit=`
    pub async fn list_pod_metrics(
        State(state): State<AppState>,
        Path(cluster_id): Path<Uuid>,
        Query(query): Query<PodMetricsQuery>,
    ) -> Result<Json<ApiResponse<Vec<PodMetricsSnapshot>>>, AppError> {
        to_json(state.pod_metrics_service.list_pod_metrics(cluster_id, query).await)
    }

    pub async fn get_pod_metrics(
        State(state): State<AppState>,
        Path((cluster_id, namespace, name)): Path<(Uuid, String, String)>,
    ) -> Result<Json<ApiResponse<PodMetricsSnapshot>>, AppError> {
        to_json(state.pod_metrics_service.get_pod_metrics(cluster_id, namespace, name).await)
    }

    pub async fn get_namespace_usage(
        State(state): State<AppState>,
        Path(cluster_id): Path<Uuid>,
    ) -> Result<Json<ApiResponse<Vec<NamespaceUsage>>>, AppError> {
        to_json(state.pod_metrics_service.namespace_usage(cluster_id).await)
    }

    pub async fn get_cache_status(
        State(state): State<AppState>,
        Path(cluster_id): Path<Uuid>,
    ) -> Result<Json<ApiResponse<PodMetricsCacheStatus>>, AppError> {
        to_json(state.pod_metrics_service.status(cluster_id).await)
    }

    pub async fn refresh(
        State(state): State<AppState>,
        Path(cluster_id): Path<Uuid>,
    ) -> Result<Json<ApiResponse<RefreshOutcome>>, AppError> {
        to_json(state.pod_metrics_service.refresh(cluster_id).await)
    }
}
