//! Cluster registration DTOs

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::cluster::cluster_entity::ClusterSpec;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterClusterRequest {
    #[validate(length(min = 1, max = 63))]
    pub name: String,

    /// Path of a kubeconfig file readable by the server. Defaults to the
    /// ambient configuration (in-cluster or `~/.kube/config`).
    pub kubeconfig: Option<PathBuf>,

    #[validate(length(min = 1))]
    pub context: Option<String>,

    /// Override of the pod metrics poll interval for this cluster.
    #[validate(range(min = 1, max = 3600))]
    pub poll_interval_secs: Option<u64>,
}

impl From<RegisterClusterRequest> for ClusterSpec {
    fn from(value: RegisterClusterRequest) -> Self {
        ClusterSpec {
            name: value.name,
            kubeconfig: value.kubeconfig,
            context: value.context,
            poll_interval: value.poll_interval_secs.map(std::time::Duration::from_secs),
        }
    }
}
