use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::Value;
use uuid::Uuid;

use crate::api::dto::k8s_dto::{K8sListQuery, PodLogQuery};
use crate::api::dto::paginated_response::PaginatedResponse;
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::core::client::kube_resources::Pod;
use crate::domain::k8s::dto::k8s_summary_dto::PodSummary;
use crate::errors::AppError;

pub struct K8sPodController;

impl K8sPodController {
    /// List pods – optionally filter by `namespace`, `labelSelector`, or `nodeName`
    pub async fn list_k8s_pods(
        State(state): State<AppState>,
        Path(cluster_id): Path<Uuid>,
        Query(query): Query<K8sListQuery>,
    ) -> Result<Json<ApiResponse<PaginatedResponse<PodSummary>>>, AppError> {
        to_json(state.k8s_service.list_k8s_pods(cluster_id, query).await)
    }

    pub async fn get_k8s_pod(
        State(state): State<AppState>,
        Path((cluster_id, namespace, name)): Path<(Uuid, String, String)>,
    ) -> Result<Json<ApiResponse<Pod>>, AppError> {
        to_json(state.k8s_service.get_k8s_pod(cluster_id, namespace, name).await)
    }

    pub async fn delete_k8s_pod(
        State(state): State<AppState>,
        Path((cluster_id, namespace, name)): Path<(Uuid, String, String)>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        to_json(state.k8s_service.delete_k8s_pod(cluster_id, namespace, name).await)
    }

    pub async fn get_k8s_pod_logs(
        State(state): State<AppState>,
        Path((cluster_id, namespace, name)): Path<(Uuid, String, String)>,
        Query(query): Query<PodLogQuery>,
    ) -> Result<Json<ApiResponse<String>>, AppError> {
        to_json(state.k8s_service.get_k8s_pod_logs(cluster_id, namespace, name, query).await)
    }
}
