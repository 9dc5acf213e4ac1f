//! Cluster-scoped Kubernetes resource operations

pub mod k8s_node_service;
pub mod k8s_node_pool_service;
pub mod k8s_pod_service;
pub mod k8s_deployment_service;
pub mod k8s_statefulset_service;
pub mod k8s_service_service;
pub mod k8s_namespace_service;
pub mod k8s_cluster_overview_service;
