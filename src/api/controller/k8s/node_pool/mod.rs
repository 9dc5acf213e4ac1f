use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::k8s::dto::node_pool_dto::NodePool;
use crate::errors::AppError;

pub struct K8sNodePoolController;

impl K8sNodePoolController {
    pub async fn list_k8s_node_pools(
        State(state): State<AppState>,
        Path(cluster_id): Path<Uuid>,
    ) -> Result<Json<ApiResponse<Vec<NodePool>>>, AppError> {
        to_json(state.k8s_service.list_k8s_node_pools(cluster_id).await)
    }

    pub async fn get_k8s_node_pool(
        State(state): State<AppState>,
        Path((cluster_id, pool_name)): Path<(Uuid, String)>,
    ) -> Result<Json<ApiResponse<NodePool>>, AppError> {
        to_json(state.k8s_service.get_k8s_node_pool(cluster_id, pool_name).await)
    }
}
