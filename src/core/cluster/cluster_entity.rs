use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use kube::Client;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use uuid::Uuid;

pub const DEFAULT_CLUSTER_NAME: &str = "default";

/// How to reach a cluster. Read from the clusters file or a register request.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSpec {
    pub name: String,
    #[serde(default)]
    pub kubeconfig: Option<PathBuf>,
    #[serde(default)]
    pub context: Option<String>,
    /// Overrides the global pod metrics poll interval
    #[serde_as(as = "Option<DurationSeconds<u64>>")]
    #[serde(default, rename = "poll_interval_secs")]
    pub poll_interval: Option<Duration>,
}

impl ClusterSpec {
    /// The cluster reachable through in-cluster config or `~/.kube/config`.
    pub fn ambient() -> Self {
        Self {
            name: DEFAULT_CLUSTER_NAME.to_string(),
            kubeconfig: None,
            context: None,
            poll_interval: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusterInfo {
    pub id: Uuid,
    pub name: String,
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    pub server_version: Option<String>,
    pub poll_interval_secs: u64,
    pub registered_at: DateTime<Utc>,
}

/// A registered cluster together with its live client.
#[derive(Clone)]
pub struct ClusterEntry {
    pub info: ClusterInfo,
    pub client: Client,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_reads_poll_interval_in_seconds() {
        let spec: ClusterSpec = serde_json::from_str(
            r#"{ "name": "prod", "context": "prod-admin", "poll_interval_secs": 15 }"#,
        )
        .unwrap();

        assert_eq!(spec.name, "prod");
        assert_eq!(spec.context.as_deref(), Some("prod-admin"));
        assert!(spec.kubeconfig.is_none());
        assert_eq!(spec.poll_interval, Some(Duration::from_secs(15)));
    }

    #[test]
    fn spec_optional_fields_default_to_none() {
        let spec: ClusterSpec = serde_json::from_str(r#"{ "name": "dev" }"#).unwrap();
        assert_eq!(spec.poll_interval, None);
        assert_eq!(ClusterSpec::ambient().name, DEFAULT_CLUSTER_NAME);
    }
}
