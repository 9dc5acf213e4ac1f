//! Cluster controller: connects routes to cluster registration

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::cluster_dto::RegisterClusterRequest;
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::core::cluster::cluster_entity::ClusterInfo;
use crate::errors::AppError;

pub struct ClusterController;

impl ClusterController {
    pub async fn list_clusters(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<Vec<ClusterInfo>>>, AppError> {
        to_json(state.cluster_service.list().await)
    }

    pub async fn register_cluster(
        State(state): State<AppState>,
        Json(payload): Json<RegisterClusterRequest>,
    ) -> Result<Json<ApiResponse<ClusterInfo>>, AppError> {
        payload
            .validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        to_json(state.cluster_service.register(payload.into()).await)
    }

    pub async fn get_cluster(
        State(state): State<AppState>,
        Path(cluster_id): Path<Uuid>,
    ) -> Result<Json<ApiResponse<ClusterInfo>>, AppError> {
        to_json(state.cluster_service.get(cluster_id).await)
    }

    pub async fn unregister_cluster(
        State(state): State<AppState>,
        Path(cluster_id): Path<Uuid>,
    ) -> Result<Json<ApiResponse<ClusterInfo>>, AppError> {
        to_json(state.cluster_service.unregister(cluster_id).await)
    }
}
