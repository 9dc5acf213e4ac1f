use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::k8s::dto::cluster_overview_dto::ClusterOverviewDto;
use crate::errors::AppError;

pub struct ClusterOverviewController;

impl ClusterOverviewController {
    pub async fn get_cluster_overview(
        State(state): State<AppState>,
        Path(cluster_id): Path<Uuid>,
    ) -> Result<Json<ApiResponse<ClusterOverviewDto>>, AppError> {
        to_json(state.k8s_service.get_cluster_overview(cluster_id).await)
    }
}
