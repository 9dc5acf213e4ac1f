use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::state::runtime::pod_metrics::pod_metrics_state::PodMetricsState;
use crate::core::state::runtime::pod_metrics::pod_metrics_state_repository_trait::PodMetricsStateRepositoryTrait;

#[derive(Default)]
pub struct PodMetricsStateRepository {
    state: RwLock<Arc<PodMetricsState>>,
}

impl PodMetricsStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait::async_trait]
impl PodMetricsStateRepositoryTrait for PodMetricsStateRepository {
    /// Return the shared Arc snapshot (zero cost).
    async fn get(&self) -> Arc<PodMetricsState> {
        self.state.read().await.clone()
    }

    /// Replace entire state atomically.
    async fn set(&self, new_state: PodMetricsState) {
        let mut guard = self.state.write().await;
        *guard = Arc::new(new_state);
    }

    /// Copy-on-write: clone, mutate, swap the Arc pointer.
    async fn update<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut PodMetricsState) -> T + Send,
        T: Send,
    {
        let mut guard = self.state.write().await;

        let mut new_state = (**guard).clone();
        let out = f(&mut new_state);

        *guard = Arc::new(new_state);
        out
    }
}
