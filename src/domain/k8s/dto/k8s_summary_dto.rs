//! Table rows returned by the list endpoints. Full objects are served by the get endpoints.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct NodeSummary {
    pub name: String,
    pub ready: bool,
    pub unschedulable: bool,
    pub roles: Vec<String>,
    pub kubelet_version: Option<String>,
    pub internal_ip: Option<String>,
    pub cpu_allocatable_millicores: Option<u64>,
    pub memory_allocatable_bytes: Option<u64>,
    pub pool: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PodSummary {
    pub name: String,
    pub namespace: String,
    pub uid: Option<String>,
    pub phase: Option<String>,
    pub node: Option<String>,
    pub ready_containers: usize,
    pub total_containers: usize,
    pub restarts: i32,
    pub pod_ip: Option<String>,
    pub owner_kind: Option<String>,
    pub owner_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Deployments and StatefulSets share the same replica columns.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkloadSummary {
    pub name: String,
    pub namespace: String,
    pub desired_replicas: i32,
    pub ready_replicas: i32,
    pub available_replicas: i32,
    pub updated_replicas: i32,
    pub images: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ServiceSummary {
    pub name: String,
    pub namespace: String,
    pub service_type: Option<String>,
    pub cluster_ip: Option<String>,
    /// `port/protocol`, e.g. `443/TCP`
    pub ports: Vec<String>,
    pub selector: BTreeMap<String, String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NamespaceSummary {
    pub name: String,
    pub phase: Option<String>,
    pub labels: BTreeMap<String, String>,
    pub created_at: Option<DateTime<Utc>>,
}
