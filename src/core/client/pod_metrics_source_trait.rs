use anyhow::Result;
use async_trait::async_trait;

use crate::core::state::runtime::pod_metrics::pod_metrics_entity::PodMetricsSnapshot;

/// Where pod resource-usage samples come from (metrics-server in production).
#[async_trait]
pub trait PodMetricsSourceTrait: Send + Sync {
    /// All pods, or the pods of one namespace.
    async fn list_pod_metrics(&self, namespace: Option<&str>) -> Result<Vec<PodMetricsSnapshot>>;

    /// One pod; `None` when the metrics API has no sample for it.
    async fn get_pod_metrics(&self, namespace: &str, name: &str) -> Result<Option<PodMetricsSnapshot>>;
}
