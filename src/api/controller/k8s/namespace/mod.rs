use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::Value;
use uuid::Uuid;

use crate::api::dto::k8s_dto::{CreateNamespaceRequest, K8sListQuery};
use crate::api::dto::paginated_response::PaginatedResponse;
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::core::client::kube_resources::Namespace;
use crate::domain::k8s::dto::k8s_summary_dto::NamespaceSummary;
use crate::errors::AppError;

pub struct K8sNamespaceController;

impl K8sNamespaceController {
    pub async fn list_k8s_namespaces(
        State(state): State<AppState>,
        Path(cluster_id): Path<Uuid>,
        Query(query): Query<K8sListQuery>,
    ) -> Result<Json<ApiResponse<PaginatedResponse<NamespaceSummary>>>, AppError> {
        to_json(state.k8s_service.list_k8s_namespaces(cluster_id, query).await)
    }

    pub async fn create_k8s_namespace(
        State(state): State<AppState>,
        Path(cluster_id): Path<Uuid>,
        Json(payload): Json<CreateNamespaceRequest>,
    ) -> Result<Json<ApiResponse<Namespace>>, AppError> {
        to_json(state.k8s_service.create_k8s_namespace(cluster_id, payload).await)
    }

    pub async fn get_k8s_namespace(
        State(state): State<AppState>,
        Path((cluster_id, name)): Path<(Uuid, String)>,
    ) -> Result<Json<ApiResponse<Namespace>>, AppError> {
        to_json(state.k8s_service.get_k8s_namespace(cluster_id, name).await)
    }

    pub async fn delete_k8s_namespace(
        State(state): State<AppState>,
        Path((cluster_id, name)): Path<(Uuid, String)>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        to_json(state.k8s_service.delete_k8s_namespace(cluster_id, name).await)
    }
}
