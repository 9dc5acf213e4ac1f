pub mod cluster_routes;
pub mod k8s_routes;
pub mod metrics_routes;
pub mod system_routes;
