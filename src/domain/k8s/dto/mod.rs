pub mod k8s_summary_dto;
pub mod node_pool_dto;
pub mod cluster_overview_dto;
