use serde::Serialize;
use uuid::Uuid;

use crate::core::state::runtime::pod_metrics::pod_metrics_entity::PodMetricsSnapshot;
use crate::core::state::runtime::pod_metrics::pod_metrics_state_manager::PodMetricsCacheStats;

/// Cache counters of one cluster plus the settings they are judged against.
#[derive(Debug, Clone, Serialize)]
pub struct PodMetricsCacheStatus {
    pub cluster_id: Uuid,
    #[serde(flatten)]
    pub stats: PodMetricsCacheStats,
    pub poll_interval_secs: u64,
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NamespaceUsage {
    pub namespace: String,
    pub pods: usize,
    pub cpu_millicores: u64,
    pub memory_bytes: u64,
}

impl NamespaceUsage {
    pub fn add(&mut self, snapshot: &PodMetricsSnapshot) {
        self.pods += 1;
        self.cpu_millicores = self.cpu_millicores.saturating_add(snapshot.cpu_millicores);
        self.memory_bytes = self.memory_bytes.saturating_add(snapshot.memory_bytes);
    }
}
