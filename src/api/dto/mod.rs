//! API DTOs shared by controllers

pub mod cluster_dto;
pub mod k8s_dto;
pub mod metrics_dto;
pub mod paginated_response;
pub mod system_dto;

use serde::Serialize;

/// Envelope every successful JSON response is wrapped in.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub is_successful: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            is_successful: true,
            data,
        }
    }
}
