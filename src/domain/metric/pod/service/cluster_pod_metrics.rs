use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::client::pod_metrics_source_trait::PodMetricsSourceTrait;
use crate::core::state::runtime::pod_metrics::pod_metrics_entity::{PodKey, PodMetricsSnapshot};
use crate::core::state::runtime::pod_metrics::pod_metrics_state_manager::{PodMetricsStateManager, RefreshOutcome};
use crate::core::state::runtime::pod_metrics::pod_metrics_state_repository::PodMetricsStateRepository;
use crate::domain::metric::pod::dto::PodMetricsCacheStatus;
use crate::errors::AppError;

/// Pod metrics cache of one cluster and the source that fills it.
///
/// Refreshes are serialized by `refresh_lock`; callers that queued behind a
/// running refresh reuse its outcome instead of hitting the metrics API again.
pub struct ClusterPodMetrics {
    cluster_id: Uuid,
    source: Arc<dyn PodMetricsSourceTrait>,
    manager: PodMetricsStateManager<PodMetricsStateRepository>,
    poll_interval: Duration,
    refresh_lock: Mutex<()>,
    /// Completed refresh attempts, successful or not
    attempts: AtomicU64,
}

impl ClusterPodMetrics {
    pub fn new(
        cluster_id: Uuid,
        source: Arc<dyn PodMetricsSourceTrait>,
        poll_interval: Duration,
        ttl: Duration,
        max_entries: usize,
    ) -> Self {
        Self {
            cluster_id,
            source,
            manager: PodMetricsStateManager::new(PodMetricsStateRepository::new().shared(), ttl, max_entries),
            poll_interval,
            refresh_lock: Mutex::new(()),
            attempts: AtomicU64::new(0),
        }
    }

    pub fn cluster_id(&self) -> Uuid {
        self.cluster_id
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// One full collection. Waits for a refresh already in progress.
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// Refresh unless the cache is fresh, or unless another caller finished
    /// a refresh attempt while this one waited for the lock.
    pub async fn ensure_fresh(&self) -> Result<()> {
        if self.manager.is_fresh().await {
            return Ok(());
        }

        let seen = self.attempts.load(Ordering::Acquire);
        let _guard = self.refresh_lock.lock().await;

        if self.attempts.load(Ordering::Acquire) != seen {
            if self.manager.is_fresh().await {
                return Ok(());
            }
            let message = self
                .manager
                .stats()
                .await
                .last_error_message
                .unwrap_or_else(|| "pod metrics refresh did not complete".to_string());
            return Err(AppError::MetricsUnavailable(message).into());
        }

        if self.manager.is_fresh().await {
            return Ok(());
        }

        self.refresh_locked().await.map(|_| ())
    }

    async fn refresh_locked(&self) -> Result<RefreshOutcome> {
        let result = self.source.list_pod_metrics(None).await;

        let outcome = match result {
            Ok(snapshots) => {
                let outcome = self.manager.apply_refresh(snapshots).await;
                debug!(
                    cluster_id = %self.cluster_id,
                    pods = outcome.pods,
                    evicted = outcome.evicted,
                    "Pod metrics refreshed"
                );
                Ok(outcome)
            }
            Err(err) => {
                let message = format!("{err:#}");
                warn!(cluster_id = %self.cluster_id, "Pod metrics refresh failed: {}", message);
                self.manager.mark_error(message.clone()).await;
                Err(AppError::MetricsUnavailable(message).into())
            }
        };

        self.attempts.fetch_add(1, Ordering::Release);
        outcome
    }

    /// Fresh entries after making a best effort to refresh. A failed refresh
    /// is only an error when nothing fresh is left to serve.
    pub async fn readable_snapshots(&self, namespace: Option<&str>) -> Result<Vec<PodMetricsSnapshot>> {
        let refreshed = self.ensure_fresh().await;
        let snapshots = self.manager.list_fresh(namespace).await;

        if let Err(err) = refreshed {
            if snapshots.is_empty() {
                return Err(err);
            }
            debug!(
                cluster_id = %self.cluster_id,
                "Serving {} fresh pod metrics entries despite failed refresh",
                snapshots.len()
            );
        }

        Ok(snapshots)
    }

    /// A fresh cache hit, or a live fetch of that single pod.
    pub async fn get(&self, namespace: &str, name: &str) -> Result<PodMetricsSnapshot> {
        let key = PodKey::new(namespace, name);
        if let Some(snapshot) = self.manager.get_fresh(&key).await {
            return Ok(snapshot);
        }

        match self.source.get_pod_metrics(namespace, name).await {
            Ok(Some(snapshot)) => {
                self.manager.upsert(snapshot.clone()).await;
                Ok(snapshot)
            }
            Ok(None) => Err(AppError::NotFound(format!("no metrics for pod {key}")).into()),
            Err(err) => Err(AppError::MetricsUnavailable(format!("{err:#}")).into()),
        }
    }

    pub async fn status(&self) -> PodMetricsCacheStatus {
        PodMetricsCacheStatus {
            cluster_id: self.cluster_id,
            stats: self.manager.stats().await,
            poll_interval_secs: self.poll_interval.as_secs(),
            ttl_secs: self.manager.ttl().as_secs(),
        }
    }
}
