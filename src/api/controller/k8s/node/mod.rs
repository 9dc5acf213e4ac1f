use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::api::dto::k8s_dto::K8sListQuery;
use crate::api::dto::paginated_response::PaginatedResponse;
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::core::client::kube_resources::Node;
use crate::domain::k8s::dto::k8s_summary_dto::NodeSummary;
use crate::errors::AppError;

pub struct K8sNodeController;

impl K8sNodeController {
    /// List nodes – optionally filter by `labelSelector`
    pub async fn list_k8s_nodes(
        State(state): State<AppState>,
        Path(cluster_id): Path<Uuid>,
        Query(query): Query<K8sListQuery>,
    ) -> Result<Json<ApiResponse<PaginatedResponse<NodeSummary>>>, AppError> {
        to_json(state.k8s_service.list_k8s_nodes(cluster_id, query).await)
    }

    pub async fn get_k8s_node(
        State(state): State<AppState>,
        Path((cluster_id, node_name)): Path<(Uuid, String)>,
    ) -> Result<Json<ApiResponse<Node>>, AppError> {
        to_json(state.k8s_service.get_k8s_node(cluster_id, node_name).await)
    }

    pub async fn cordon_k8s_node(
        State(state): State<AppState>,
        Path((cluster_id, node_name)): Path<(Uuid, String)>,
    ) -> Result<Json<ApiResponse<Node>>, AppError> {
        to_json(state.k8s_service.cordon_k8s_node(cluster_id, node_name).await)
    }

    pub async fn uncordon_k8s_node(
        State(state): State<AppState>,
        Path((cluster_id, node_name)): Path<(Uuid, String)>,
    ) -> Result<Json<ApiResponse<Node>>, AppError> {
        to_json(state.k8s_service.uncordon_k8s_node(cluster_id, node_name).await)
    }
}
