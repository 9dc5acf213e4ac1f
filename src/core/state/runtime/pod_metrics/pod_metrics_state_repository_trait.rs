use std::sync::Arc;
use async_trait::async_trait;

use crate::core::state::runtime::pod_metrics::pod_metrics_state::PodMetricsState;

#[async_trait]
pub trait PodMetricsStateRepositoryTrait: Send + Sync {

    /// Return the current state as an Arc.
    /// Readers hold the snapshot without holding any lock.
    async fn get(&self) -> Arc<PodMetricsState>;

    /// Replace the entire state.
    async fn set(&self, state: PodMetricsState);

    /// Mutate the internal state using a closure; the new state becomes
    /// visible to readers in one step.
    async fn update<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut PodMetricsState) -> T + Send,
        T: Send;
}
