use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::Value;
use uuid::Uuid;

use crate::api::dto::k8s_dto::{K8sListQuery, ScaleRequest};
use crate::api::dto::paginated_response::PaginatedResponse;
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::core::client::kube_resources::Deployment;
use crate::domain::k8s::dto::k8s_summary_dto::WorkloadSummary;
use crate::errors::AppError;

pub struct K8sDeploymentController;

impl K8sDeploymentController {
    pub async fn list_k8s_deployments(
        State(state): State<AppState>,
        Path(cluster_id): Path<Uuid>,
        Query(query): Query<K8sListQuery>,
    ) -> Result<Json<ApiResponse<PaginatedResponse<WorkloadSummary>>>, AppError> {
        to_json(state.k8s_service.list_k8s_deployments(cluster_id, query).await)
    }

    pub async fn get_k8s_deployment(
        State(state): State<AppState>,
        Path((cluster_id, namespace, name)): Path<(Uuid, String, String)>,
    ) -> Result<Json<ApiResponse<Deployment>>, AppError> {
        to_json(state.k8s_service.get_k8s_deployment(cluster_id, namespace, name).await)
    }

    pub async fn scale_k8s_deployment(
        State(state): State<AppState>,
        Path((cluster_id, namespace, name)): Path<(Uuid, String, String)>,
        Json(payload): Json<ScaleRequest>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        to_json(state.k8s_service.scale_k8s_deployment(cluster_id, namespace, name, payload).await)
    }

    /// Rollout restart, like `kubectl rollout restart`
    pub async fn restart_k8s_deployment(
        State(state): State<AppState>,
        Path((cluster_id, namespace, name)): Path<(Uuid, String, String)>,
    ) -> Result<Json<ApiResponse<Deployment>>, AppError> {
        to_json(state.k8s_service.restart_k8s_deployment(cluster_id, namespace, name).await)
    }

    pub async fn delete_k8s_deployment(
        State(state): State<AppState>,
        Path((cluster_id, namespace, name)): Path<(Uuid, String, String)>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        to_json(state.k8s_service.delete_k8s_deployment(cluster_id, namespace, name).await)
    }
}
