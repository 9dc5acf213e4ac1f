use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, MissedTickBehavior};
use tracing::{debug, error, warn};

use crate::domain::metric::pod::service::cluster_pod_metrics::ClusterPodMetrics;

/// How long a stopping collector may take to finish its current refresh.
pub const STOP_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Running collector of one cluster.
pub struct CollectorHandle {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl CollectorHandle {
    /// Signal the loop, wait up to the grace period, then abort it.
    /// The task has ended when this returns.
    pub async fn stop(self) {
        let CollectorHandle { shutdown, mut handle } = self;
        let _ = shutdown.send(true);

        if timeout(STOP_GRACE_PERIOD, &mut handle).await.is_err() {
            warn!("Pod metrics collector did not stop within {:?}, aborting", STOP_GRACE_PERIOD);
            handle.abort();
            let _ = handle.await;
        }
    }
}

/// Poll the metrics API for one cluster every `poll_interval`, starting now.
pub fn spawn(metrics: Arc<ClusterPodMetrics>) -> CollectorHandle {
    let (shutdown, mut stop_rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        let cluster_id = metrics.cluster_id();
        let mut ticker = interval(metrics.poll_interval());
        // a slow refresh must not be followed by a burst of catch-up ticks
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                changed = stop_rx.changed() => {
                    if changed.is_err() || *stop_rx.borrow() {
                        break;
                    }
                }

                _ = ticker.tick() => {
                    match metrics.refresh().await {
                        Ok(outcome) => debug!(%cluster_id, pods = outcome.pods, "Pod metrics collected"),
                        Err(e) => error!(%cluster_id, "Pod metrics collection failed: {:#}", e),
                    }
                }
            }
        }

        debug!(%cluster_id, "Pod metrics collector loop exited");
    });

    CollectorHandle { shutdown, handle }
}
