use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::Value;
use uuid::Uuid;

use crate::api::dto::k8s_dto::K8sListQuery;
use crate::api::dto::paginated_response::PaginatedResponse;
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::core::client::kube_resources::Service;
use crate::domain::k8s::dto::k8s_summary_dto::ServiceSummary;
use crate::errors::AppError;

pub struct K8sServiceController;

impl K8sServiceController {
    pub async fn list_k8s_services(
        State(state): State<AppState>,
        Path(cluster_id): Path<Uuid>,
        Query(query): Query<K8sListQuery>,
    ) -> Result<Json<ApiResponse<PaginatedResponse<ServiceSummary>>>, AppError> {
        to_json(state.k8s_service.list_k8s_services(cluster_id, query).await)
    }

    pub async fn get_k8s_service(
        State(state): State<AppState>,
        Path((cluster_id, namespace, name)): Path<(Uuid, String, String)>,
    ) -> Result<Json<ApiResponse<Service>>, AppError> {
        to_json(state.k8s_service.get_k8s_service(cluster_id, namespace, name).await)
    }

    pub async fn delete_k8s_service(
        State(state): State<AppState>,
        Path((cluster_id, namespace, name)): Path<(Uuid, String, String)>,
    ) -> Result<Json<ApiResponse<Value>>, AppError> {
        to_json(state.k8s_service.delete_k8s_service(cluster_id, namespace, name).await)
    }
}
