use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Instant;

use crate::core::state::runtime::pod_metrics::pod_metrics_entity::{PodKey, PodMetricsSnapshot};
use crate::core::state::runtime::pod_metrics::pod_metrics_state::PodMetricsState;
use crate::core::state::runtime::pod_metrics::pod_metrics_state_repository_trait::PodMetricsStateRepositoryTrait;

/// Counters describing the cache right now.
#[derive(Debug, Clone, Serialize)]
pub struct PodMetricsCacheStats {
    pub entries: usize,
    pub fresh: bool,
    pub last_refreshed_at: Option<DateTime<Utc>>,
    pub last_error_at: Option<DateTime<Utc>>,
    pub last_error_message: Option<String>,
    pub refresh_count: u64,
    pub evicted_total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefreshOutcome {
    pub pods: usize,
    pub evicted: usize,
}

/// Applies TTL and capacity rules on top of the state repository.
pub struct PodMetricsStateManager<R: PodMetricsStateRepositoryTrait> {
    pub(crate) repo: Arc<R>,
    ttl: Duration,
    max_entries: usize,
}

impl<R: PodMetricsStateRepositoryTrait> PodMetricsStateManager<R> {
    pub fn new(repo: Arc<R>, ttl: Duration, max_entries: usize) -> Self {
        Self {
            repo,
            ttl,
            max_entries,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store the result of a full collection in one swap.
    pub async fn apply_refresh(&self, snapshots: Vec<PodMetricsSnapshot>) -> RefreshOutcome {
        let (ttl, max_entries) = (self.ttl, self.max_entries);

        self.repo
            .update(move |state| {
                let now = Instant::now();
                state.apply_refresh(snapshots, now);

                let evicted = state.evict_expired(ttl, now) + state.enforce_capacity(max_entries);
                RefreshOutcome {
                    pods: state.entries.len(),
                    evicted,
                }
            })
            .await
    }

    /// Store one live-fetched pod.
    pub async fn upsert(&self, snapshot: PodMetricsSnapshot) {
        let (ttl, max_entries) = (self.ttl, self.max_entries);

        self.repo
            .update(move |state| {
                let now = Instant::now();
                state.upsert(snapshot, now);
                state.evict_expired(ttl, now);
                state.enforce_capacity(max_entries);
            })
            .await;
    }

    /// Record a collection failure (entries remain intact).
    pub async fn mark_error(&self, message: String) {
        self.repo.update(|state| state.mark_error(message)).await;
    }

    pub async fn evict_expired(&self) -> usize {
        let ttl = self.ttl;
        self.repo
            .update(move |state| state.evict_expired(ttl, Instant::now()))
            .await
    }

    pub async fn is_fresh(&self) -> bool {
        let state = self.repo.get().await;
        state.is_fresh(self.ttl, Instant::now())
    }

    pub async fn get_fresh(&self, key: &PodKey) -> Option<PodMetricsSnapshot> {
        let state = self.repo.get().await;
        state
            .fresh_entry(key, self.ttl, Instant::now())
            .map(|entry| entry.snapshot.clone())
    }

    /// Fresh snapshots, optionally restricted to one namespace.
    pub async fn list_fresh(&self, namespace: Option<&str>) -> Vec<PodMetricsSnapshot> {
        let state = self.repo.get().await;
        state
            .fresh_snapshots(self.ttl, Instant::now())
            .filter(|s| namespace.map_or(true, |ns| s.namespace == ns))
            .cloned()
            .collect()
    }

    pub async fn stats(&self) -> PodMetricsCacheStats {
        let state: Arc<PodMetricsState> = self.repo.get().await;
        PodMetricsCacheStats {
            entries: state.entries.len(),
            fresh: state.is_fresh(self.ttl, Instant::now()),
            last_refreshed_at: state.last_refreshed_at,
            last_error_at: state.last_error_at,
            last_error_message: state.last_error_message.clone(),
            refresh_count: state.refresh_count,
            evicted_total: state.evicted_total,
        }
    }
}
