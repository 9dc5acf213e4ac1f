pub mod cluster_pod_metrics;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::api::dto::metrics_dto::{PodMetricsQuery, PodMetricsSort};
use crate::config::MetricsSettings;
use crate::core::client::pod_metrics_source_trait::PodMetricsSourceTrait;
use crate::core::state::runtime::pod_metrics::pod_metrics_entity::PodMetricsSnapshot;
use crate::core::state::runtime::pod_metrics::pod_metrics_state_manager::RefreshOutcome;
use crate::domain::metric::pod::dto::{NamespaceUsage, PodMetricsCacheStatus};
use crate::errors::AppError;
use crate::scheduler::tasks::collectors::pod_metrics::task::{self as collector, CollectorHandle};

use cluster_pod_metrics::ClusterPodMetrics;

struct RegisteredCluster {
    metrics: Arc<ClusterPodMetrics>,
    collector: CollectorHandle,
}

/// Per-cluster pod metrics caches and their background collectors.
pub struct PodMetricsService {
    settings: MetricsSettings,
    clusters: RwLock<HashMap<Uuid, RegisteredCluster>>,
}

impl PodMetricsService {
    pub fn new(settings: MetricsSettings) -> Self {
        Self {
            settings,
            clusters: RwLock::new(HashMap::new()),
        }
    }

    pub fn settings(&self) -> MetricsSettings {
        self.settings
    }

    /// Create the cluster's cache and start polling `source`.
    pub async fn register_cluster(
        &self,
        cluster_id: Uuid,
        source: Arc<dyn PodMetricsSourceTrait>,
        poll_interval: Option<Duration>,
    ) -> Result<()> {
        let interval = poll_interval.unwrap_or(self.settings.poll_interval);
        if interval.is_zero() {
            return Err(AppError::BadRequest(format!("pod metrics poll interval of cluster '{cluster_id}' must be greater than zero")).into());
        }

        let mut guard = self.clusters.write().await;
        if guard.contains_key(&cluster_id) {
            return Err(AppError::Conflict(format!("pod metrics already registered for cluster '{cluster_id}'")).into());
        }

        let metrics = Arc::new(ClusterPodMetrics::new(
            cluster_id,
            source,
            interval,
            self.settings.ttl,
            self.settings.max_entries,
        ));
        let collector = collector::spawn(metrics.clone());

        guard.insert(cluster_id, RegisteredCluster { metrics, collector });
        info!(%cluster_id, interval_secs = interval.as_secs(), "Pod metrics collector started");
        Ok(())
    }

    /// Stop the collector and drop the cache. `false` if the cluster was unknown.
    pub async fn unregister_cluster(&self, cluster_id: Uuid) -> bool {
        let removed = self.clusters.write().await.remove(&cluster_id);

        match removed {
            Some(registered) => {
                registered.collector.stop().await;
                info!(%cluster_id, "Pod metrics collector stopped");
                true
            }
            None => false,
        }
    }

    async fn cluster(&self, cluster_id: Uuid) -> Result<Arc<ClusterPodMetrics>> {
        self.clusters
            .read()
            .await
            .get(&cluster_id)
            .map(|registered| registered.metrics.clone())
            .ok_or_else(|| AppError::NotFound(format!("cluster '{cluster_id}'")).into())
    }

    pub async fn refresh(&self, cluster_id: Uuid) -> Result<RefreshOutcome> {
        self.cluster(cluster_id).await?.refresh().await
    }

    pub async fn get_pod_metrics(&self, cluster_id: Uuid, namespace: String, name: String) -> Result<PodMetricsSnapshot> {
        self.cluster(cluster_id).await?.get(&namespace, &name).await
    }

    pub async fn list_pod_metrics(&self, cluster_id: Uuid, query: PodMetricsQuery) -> Result<Vec<PodMetricsSnapshot>> {
        let metrics = self.cluster(cluster_id).await?;
        let mut snapshots = metrics.readable_snapshots(query.namespace.as_deref()).await?;

        sort_snapshots(&mut snapshots, query.sort);
        snapshots.truncate(query.effective_limit());
        Ok(snapshots)
    }

    pub async fn namespace_usage(&self, cluster_id: Uuid) -> Result<Vec<NamespaceUsage>> {
        let metrics = self.cluster(cluster_id).await?;
        let snapshots = metrics.readable_snapshots(None).await?;
        Ok(summarize_namespaces(&snapshots))
    }

    pub async fn status(&self, cluster_id: Uuid) -> Result<PodMetricsCacheStatus> {
        Ok(self.cluster(cluster_id).await?.status().await)
    }

    /// Stop every collector; used on process shutdown.
    pub async fn shutdown(&self) {
        let drained: Vec<(Uuid, RegisteredCluster)> = self.clusters.write().await.drain().collect();
        let count = drained.len();

        futures::future::join_all(drained.into_iter().map(|(_, registered)| registered.collector.stop())).await;
        info!("Stopped {} pod metrics collector(s)", count);
    }
}

/// Usage descending (ties by pod key), or by pod name.
pub fn sort_snapshots(snapshots: &mut [PodMetricsSnapshot], sort: PodMetricsSort) {
    match sort {
        PodMetricsSort::Cpu => snapshots.sort_by(|a, b| {
            b.cpu_millicores
                .cmp(&a.cpu_millicores)
                .then_with(|| a.key().cmp(&b.key()))
        }),
        PodMetricsSort::Memory => snapshots.sort_by(|a, b| {
            b.memory_bytes
                .cmp(&a.memory_bytes)
                .then_with(|| a.key().cmp(&b.key()))
        }),
        PodMetricsSort::Name => snapshots.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.namespace.cmp(&b.namespace))
        }),
    }
}

/// Per-namespace totals, heaviest cpu consumer first.
pub fn summarize_namespaces(snapshots: &[PodMetricsSnapshot]) -> Vec<NamespaceUsage> {
    let mut by_namespace: BTreeMap<&str, NamespaceUsage> = BTreeMap::new();

    for snapshot in snapshots {
        by_namespace
            .entry(snapshot.namespace.as_str())
            .or_insert_with(|| NamespaceUsage {
                namespace: snapshot.namespace.clone(),
                ..Default::default()
            })
            .add(snapshot);
    }

    let mut usage: Vec<NamespaceUsage> = by_namespace.into_values().collect();
    // stable sort keeps namespaces alphabetical within equal cpu
    usage.sort_by(|a, b| b.cpu_millicores.cmp(&a.cpu_millicores));
    usage
}

#[cfg(test)]
mod tests {
    use super::cluster_pod_metrics::tests::{pod, FakeSource};
    use super::*;
    use std::sync::atomic::Ordering;

    fn settings() -> MetricsSettings {
        MetricsSettings {
            poll_interval: Duration::from_secs(30),
            ttl: Duration::from_secs(60),
            max_entries: 100,
        }
    }

    fn sample_pods() -> Vec<PodMetricsSnapshot> {
        vec![
            pod("shop", "web-1", 250, 100),
            pod("shop", "web-2", 50, 900),
            pod("ops", "agent", 500, 300),
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn list_sorts_filters_and_limits() {
        let service = PodMetricsService::new(settings());
        let id = Uuid::new_v4();
        let source = Arc::new(FakeSource::with_pods(sample_pods()));
        service.register_cluster(id, source, None).await.unwrap();

        let by_cpu = service.list_pod_metrics(id, PodMetricsQuery::default()).await.unwrap();
        let names: Vec<&str> = by_cpu.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["agent", "web-1", "web-2"]);

        let query = PodMetricsQuery {
            namespace: Some("shop".into()),
            sort: PodMetricsSort::Memory,
            limit: Some(1),
        };
        let top = service.list_pod_metrics(id, query).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "web-2");

        service.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_cluster_is_not_found() {
        let service = PodMetricsService::new(settings());
        let err = service.status(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::NotFound(_))));
        assert!(!service.unregister_cluster(Uuid::new_v4()).await);
    }

    #[tokio::test(start_paused = true)]
    async fn double_registration_conflicts() {
        let service = PodMetricsService::new(settings());
        let id = Uuid::new_v4();
        service
            .register_cluster(id, Arc::new(FakeSource::default()), None)
            .await
            .unwrap();

        let err = service
            .register_cluster(id, Arc::new(FakeSource::default()), None)
            .await
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::Conflict(_))));

        assert!(service.unregister_cluster(id).await);
        assert!(service.status(id).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_is_refused_without_starting_a_collector() {
        let service = PodMetricsService::new(settings());
        let id = Uuid::new_v4();
        let source = Arc::new(FakeSource::with_pods(sample_pods()));

        let err = service
            .register_cluster(id, source.clone(), Some(Duration::ZERO))
            .await
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::BadRequest(_))));

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(source.list_calls.load(Ordering::SeqCst), 0);
        assert!(service.status(id).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn collector_polls_on_its_interval() {
        let service = PodMetricsService::new(settings());
        let id = Uuid::new_v4();
        let source = Arc::new(FakeSource::with_pods(sample_pods()));
        service
            .register_cluster(id, source.clone(), Some(Duration::from_secs(10)))
            .await
            .unwrap();

        // first tick fires at once
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(source.list_calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(25)).await;
        assert_eq!(source.list_calls.load(Ordering::SeqCst), 3);

        let status = service.status(id).await.unwrap();
        assert_eq!(status.poll_interval_secs, 10);
        assert_eq!(status.stats.entries, 3);

        assert!(service.unregister_cluster(id).await);
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(source.list_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn collector_survives_failures() {
        let service = PodMetricsService::new(settings());
        let id = Uuid::new_v4();
        let source = Arc::new(FakeSource::with_pods(sample_pods()));
        source.fail.store(true, Ordering::SeqCst);
        service
            .register_cluster(id, source.clone(), Some(Duration::from_secs(10)))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_secs(15)).await;
        let status = service.status(id).await.unwrap();
        assert!(status.stats.last_error_message.is_some());
        assert_eq!(status.stats.entries, 0);

        let err = service.list_pod_metrics(id, PodMetricsQuery::default()).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::MetricsUnavailable(_))));

        source.fail.store(false, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(service.status(id).await.unwrap().stats.entries, 3);

        service.shutdown().await;
    }

    #[test]
    fn namespaces_are_summed_and_ranked_by_cpu() {
        let usage = summarize_namespaces(&sample_pods());

        assert_eq!(usage.len(), 2);
        assert_eq!(usage[0].namespace, "ops");
        assert_eq!(usage[0].cpu_millicores, 500);
        assert_eq!(usage[1].namespace, "shop");
        assert_eq!(usage[1].pods, 2);
        assert_eq!(usage[1].cpu_millicores, 300);
        assert_eq!(usage[1].memory_bytes, 1000);
    }

    #[test]
    fn namespace_totals_saturate() {
        let usage = summarize_namespaces(&[pod("batch", "a", u64::MAX, 1), pod("batch", "b", 5, 1)]);
        assert_eq!(usage[0].cpu_millicores, u64::MAX);
        assert_eq!(usage[0].memory_bytes, 2);
    }

    #[test]
    fn name_sort_is_alphabetical() {
        let mut pods = sample_pods();
        sort_snapshots(&mut pods, PodMetricsSort::Name);
        let names: Vec<&str> = pods.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["agent", "web-1", "web-2"]);
    }
}
