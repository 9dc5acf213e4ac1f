use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::api::dto::k8s_dto::{CreateNamespaceRequest, K8sListQuery, PodLogQuery, ScaleRequest};
use crate::api::dto::paginated_response::PaginatedResponse;
use crate::api::dto::system_dto::SystemStatusDto;
use crate::config::AppConfig;
use crate::core::client::kube_resources::{Deployment, Namespace, Node, Pod, Service, StatefulSet};
use crate::core::cluster::cluster_registry::ClusterRegistry;
use crate::domain::cluster::service::ClusterService;
use crate::domain::k8s::dto::cluster_overview_dto::ClusterOverviewDto;
use crate::domain::k8s::dto::k8s_summary_dto::{NamespaceSummary, NodeSummary, PodSummary, ServiceSummary, WorkloadSummary};
use crate::domain::k8s::dto::node_pool_dto::NodePool;
use crate::domain::k8s::service::{
    k8s_cluster_overview_service, k8s_deployment_service, k8s_namespace_service, k8s_node_pool_service,
    k8s_node_service, k8s_pod_service, k8s_service_service, k8s_statefulset_service,
};
use crate::domain::metric::pod::service::PodMetricsService;

/// Resolve the cluster's client, then call the resource operation with it.
macro_rules! delegate_cluster_service {
    ($(fn $name:ident($($arg:ident : $typ:ty),*) -> $ret:ty => $path:path;)+) => {
        $(
            pub async fn $name(&self, cluster_id: Uuid, $($arg: $typ),*) -> anyhow::Result<$ret> {
                let client = self.registry.client(cluster_id).await?;
                $path(client, $($arg),*).await
            }
        )+
    };
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub started_at: DateTime<Utc>,
    pub cluster_service: Arc<ClusterService>,
    pub pod_metrics_service: Arc<PodMetricsService>,
    pub k8s_service: Arc<K8sService>,
    pub system_service: Arc<SystemService>,
}

pub fn build_app_state(config: AppConfig) -> AppState {
    let registry = Arc::new(ClusterRegistry::new());
    let pod_metrics_service = Arc::new(PodMetricsService::new(config.metrics));
    let cluster_service = Arc::new(ClusterService::new(registry.clone(), pod_metrics_service.clone()));
    let started_at = Utc::now();

    AppState {
        k8s_service: Arc::new(K8sService {
            registry,
            node_pool_label: config.node_pool_label.clone(),
            pod_metrics: pod_metrics_service.clone(),
        }),
        system_service: Arc::new(SystemService {
            started_at,
            cluster_service: cluster_service.clone(),
            pod_metrics: pod_metrics_service.clone(),
        }),
        config: Arc::new(config),
        started_at,
        cluster_service,
        pod_metrics_service,
    }
}

pub struct SystemService {
    started_at: DateTime<Utc>,
    cluster_service: Arc<ClusterService>,
    pod_metrics: Arc<PodMetricsService>,
}

impl SystemService {
    pub async fn status(&self) -> anyhow::Result<SystemStatusDto> {
        let clusters = self.cluster_service.count().await;
        crate::domain::system::service::status_service::status(self.started_at, clusters, self.pod_metrics.settings()).await
    }

    pub async fn health(&self) -> anyhow::Result<serde_json::Value> {
        crate::domain::system::service::status_service::health().await
    }
}

/// Kubernetes resource operations, addressed by cluster id.
pub struct K8sService {
    registry: Arc<ClusterRegistry>,
    node_pool_label: String,
    pod_metrics: Arc<PodMetricsService>,
}

impl K8sService {
    delegate_cluster_service! {
        fn get_k8s_node(node_name: String) -> Node => k8s_node_service::get_k8s_node;
        fn cordon_k8s_node(node_name: String) -> Node => k8s_node_service::cordon_k8s_node;
        fn uncordon_k8s_node(node_name: String) -> Node => k8s_node_service::uncordon_k8s_node;

        fn list_k8s_pods(query: K8sListQuery) -> PaginatedResponse<PodSummary> => k8s_pod_service::list_k8s_pods;
        fn get_k8s_pod(namespace: String, name: String) -> Pod => k8s_pod_service::get_k8s_pod;
        fn delete_k8s_pod(namespace: String, name: String) -> serde_json::Value => k8s_pod_service::delete_k8s_pod;
        fn get_k8s_pod_logs(namespace: String, name: String, query: PodLogQuery) -> String => k8s_pod_service::get_k8s_pod_logs;

        fn list_k8s_deployments(query: K8sListQuery) -> PaginatedResponse<WorkloadSummary> => k8s_deployment_service::list_k8s_deployments;
        fn get_k8s_deployment(namespace: String, name: String) -> Deployment => k8s_deployment_service::get_k8s_deployment;
        fn scale_k8s_deployment(namespace: String, name: String, req: ScaleRequest) -> serde_json::Value => k8s_deployment_service::scale_k8s_deployment;
        fn restart_k8s_deployment(namespace: String, name: String) -> Deployment => k8s_deployment_service::restart_k8s_deployment;
        fn delete_k8s_deployment(namespace: String, name: String) -> serde_json::Value => k8s_deployment_service::delete_k8s_deployment;

        fn list_k8s_statefulsets(query: K8sListQuery) -> PaginatedResponse<WorkloadSummary> => k8s_statefulset_service::list_k8s_statefulsets;
        fn get_k8s_statefulset(namespace: String, name: String) -> StatefulSet => k8s_statefulset_service::get_k8s_statefulset;
        fn scale_k8s_statefulset(namespace: String, name: String, req: ScaleRequest) -> serde_json::Value => k8s_statefulset_service::scale_k8s_statefulset;
        fn delete_k8s_statefulset(namespace: String, name: String) -> serde_json::Value => k8s_statefulset_service::delete_k8s_statefulset;

        fn list_k8s_services(query: K8sListQuery) -> PaginatedResponse<ServiceSummary> => k8s_service_service::list_k8s_services;
        fn get_k8s_service(namespace: String, name: String) -> Service => k8s_service_service::get_k8s_service;
        fn delete_k8s_service(namespace: String, name: String) -> serde_json::Value => k8s_service_service::delete_k8s_service;

        fn list_k8s_namespaces(query: K8sListQuery) -> PaginatedResponse<NamespaceSummary> => k8s_namespace_service::list_k8s_namespaces;
        fn get_k8s_namespace(name: String) -> Namespace => k8s_namespace_service::get_k8s_namespace;
        fn create_k8s_namespace(req: CreateNamespaceRequest) -> Namespace => k8s_namespace_service::create_k8s_namespace;
        fn delete_k8s_namespace(name: String) -> serde_json::Value => k8s_namespace_service::delete_k8s_namespace;
    }
}

impl K8sService {
    pub async fn list_k8s_nodes(
        &self,
        cluster_id: Uuid,
        query: K8sListQuery,
    ) -> anyhow::Result<PaginatedResponse<NodeSummary>> {
        let client = self.registry.client(cluster_id).await?;
        k8s_node_service::list_k8s_nodes(client, self.node_pool_label.clone(), query).await
    }

    pub async fn list_k8s_node_pools(&self, cluster_id: Uuid) -> anyhow::Result<Vec<NodePool>> {
        let client = self.registry.client(cluster_id).await?;
        k8s_node_pool_service::list_k8s_node_pools(client, self.node_pool_label.clone()).await
    }

    pub async fn get_k8s_node_pool(&self, cluster_id: Uuid, pool_name: String) -> anyhow::Result<NodePool> {
        let client = self.registry.client(cluster_id).await?;
        k8s_node_pool_service::get_k8s_node_pool(client, self.node_pool_label.clone(), pool_name).await
    }

    /// The overview degrades to no metrics section when the cache is gone.
    pub async fn get_cluster_overview(&self, cluster_id: Uuid) -> anyhow::Result<ClusterOverviewDto> {
        let client = self.registry.client(cluster_id).await?;
        let pod_metrics = self.pod_metrics.status(cluster_id).await.ok();
        k8s_cluster_overview_service::get_cluster_overview(client, pod_metrics).await
    }
}
