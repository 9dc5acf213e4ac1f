pub mod pod_metrics_entity;
pub mod pod_metrics_state;
pub mod pod_metrics_state_manager;
pub mod pod_metrics_state_repository;
pub mod pod_metrics_state_repository_trait;
