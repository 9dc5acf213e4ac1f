//! Cluster registration and lookup

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use kube::Client;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::core::client::kube_client::{build_kube_client, fetch_server_version};
use crate::core::client::pod_metrics::KubePodMetricsSource;
use crate::core::cluster::cluster_entity::{ClusterEntry, ClusterInfo, ClusterSpec};
use crate::core::cluster::cluster_fs_adapter::ClusterFsAdapter;
use crate::core::cluster::cluster_registry::ClusterRegistry;
use crate::core::util::k8s_name_util::ensure_dns_label;
use crate::domain::metric::pod::service::PodMetricsService;
use crate::errors::AppError;

pub struct ClusterService {
    registry: Arc<ClusterRegistry>,
    pod_metrics: Arc<PodMetricsService>,
}

impl ClusterService {
    pub fn new(registry: Arc<ClusterRegistry>, pod_metrics: Arc<PodMetricsService>) -> Self {
        Self { registry, pod_metrics }
    }

    /// Connect to a cluster, remember it and start collecting its pod metrics.
    pub async fn register(&self, spec: ClusterSpec) -> Result<ClusterInfo> {
        ensure_dns_label("cluster", &spec.name)?;
        if spec.poll_interval.is_some_and(|every| every.is_zero()) {
            return Err(AppError::BadRequest(format!(
                "cluster '{}': poll_interval_secs must be greater than zero",
                spec.name
            ))
            .into());
        }
        if self.registry.contains_name(&spec.name).await {
            return Err(AppError::Conflict(format!("cluster '{}' is already registered", spec.name)).into());
        }

        let client = build_kube_client(spec.kubeconfig.as_deref(), spec.context.as_deref())
            .await
            .map_err(|e| AppError::BadRequest(format!("cluster '{}': {e:#}", spec.name)))?;

        let server_version = match fetch_server_version(&client).await {
            Ok(version) => Some(version),
            Err(e) => {
                warn!("Cluster '{}' did not answer the version probe: {:#}", spec.name, e);
                None
            }
        };

        let poll_interval = spec.poll_interval.unwrap_or(self.pod_metrics.settings().poll_interval);
        let info = ClusterInfo {
            id: Uuid::new_v4(),
            name: spec.name,
            kubeconfig: spec.kubeconfig,
            context: spec.context,
            server_version,
            poll_interval_secs: poll_interval.as_secs(),
            registered_at: Utc::now(),
        };
        let id = info.id;

        let entry = self
            .registry
            .insert(ClusterEntry {
                info,
                client: client.clone(),
            })
            .await?;

        let source = Arc::new(KubePodMetricsSource::new(client));
        if let Err(e) = self.pod_metrics.register_cluster(id, source, Some(poll_interval)).await {
            self.registry.remove(id).await;
            return Err(e);
        }

        info!(
            cluster_id = %id,
            "Registered cluster '{}' (server {})",
            entry.info.name,
            entry.info.server_version.as_deref().unwrap_or("unknown")
        );
        Ok(entry.info.clone())
    }

    /// Stop the cluster's collector, then forget the cluster.
    pub async fn unregister(&self, cluster_id: Uuid) -> Result<ClusterInfo> {
        let entry = self.registry.get(cluster_id).await?;

        self.pod_metrics.unregister_cluster(cluster_id).await;
        self.registry.remove(cluster_id).await;

        info!(%cluster_id, "Unregistered cluster '{}'", entry.info.name);
        Ok(entry.info.clone())
    }

    pub async fn list(&self) -> Result<Vec<ClusterInfo>> {
        Ok(self.registry.list().await)
    }

    pub async fn get(&self, cluster_id: Uuid) -> Result<ClusterInfo> {
        Ok(self.registry.get(cluster_id).await?.info.clone())
    }

    pub async fn client(&self, cluster_id: Uuid) -> Result<Client> {
        self.registry.client(cluster_id).await
    }

    pub async fn count(&self) -> usize {
        self.registry.len().await
    }

    /// Register the clusters of the clusters file, or the ambient cluster.
    /// A cluster that fails to register is logged and skipped.
    pub async fn bootstrap(&self, config: &AppConfig) -> Result<usize> {
        let specs = match &config.clusters_file {
            Some(path) => ClusterFsAdapter::read(path).context("failed to load clusters")?,
            None => vec![ClusterSpec::ambient()],
        };

        let mut registered = 0;
        for spec in specs {
            let name = spec.name.clone();
            match self.register(spec).await {
                Ok(_) => registered += 1,
                Err(e) => error!("Failed to register cluster '{}': {:#}", name, e),
            }
        }

        info!("Bootstrapped {} cluster(s)", registered);
        Ok(registered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MetricsSettings;
    use crate::core::cluster::cluster_registry::tests::entry;
    use std::path::PathBuf;

    fn service() -> (ClusterService, Arc<ClusterRegistry>) {
        let registry = Arc::new(ClusterRegistry::new());
        let pod_metrics = Arc::new(PodMetricsService::new(MetricsSettings::default()));
        (ClusterService::new(registry.clone(), pod_metrics), registry)
    }

    fn spec(name: &str) -> ClusterSpec {
        ClusterSpec {
            name: name.to_string(),
            kubeconfig: Some(PathBuf::from("/nonexistent/kubeconfig")),
            context: None,
            poll_interval: None,
        }
    }

    #[tokio::test]
    async fn invalid_name_is_rejected_before_connecting() {
        let (svc, _) = service();
        let err = svc.register(spec("Prod_Cluster")).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn taken_name_conflicts() {
        let (svc, registry) = service();
        registry.insert(entry("prod")).await.unwrap();

        let err = svc.register(spec("prod")).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn unreadable_kubeconfig_is_bad_request() {
        let (svc, registry) = service();
        let err = svc.register(spec("prod")).await.unwrap_err();

        assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::BadRequest(_))));
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn zero_poll_interval_from_clusters_file_is_rejected() {
        let (svc, registry) = service();
        let path = std::env::temp_dir().join(format!("{}-clusters.json", Uuid::new_v4()));
        std::fs::write(&path, r#"[ { "name": "prod", "poll_interval_secs": 0 } ]"#).unwrap();

        let specs = ClusterFsAdapter::read(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let err = svc.register(specs[0].clone()).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::BadRequest(_))));
        assert!(err.to_string().contains("poll_interval_secs"));
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test]
    async fn unknown_cluster_cannot_be_unregistered() {
        let (svc, _) = service();
        let err = svc.unregister(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn bootstrap_skips_clusters_that_fail() {
        let (svc, registry) = service();
        let path = std::env::temp_dir().join(format!("{}-clusters.json", Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"[ { "name": "a", "kubeconfig": "/nonexistent/a" }, { "name": "b", "kubeconfig": "/nonexistent/b" } ]"#,
        )
        .unwrap();

        let config = AppConfig::from_lookup(|key| {
            (key == crate::config::ENV_CLUSTERS_FILE).then(|| path.display().to_string())
        })
        .unwrap();

        let registered = svc.bootstrap(&config).await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(registered, 0);
        assert_eq!(registry.len().await, 0);
    }
}
