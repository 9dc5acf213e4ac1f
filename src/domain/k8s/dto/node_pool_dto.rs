use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct NodePoolTaint {
    pub key: String,
    pub value: Option<String>,
    pub effect: String,
}

/// Nodes sharing the same value of the node-pool label.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NodePool {
    pub name: String,
    pub node_count: usize,
    pub ready_count: usize,
    pub nodes: Vec<String>,
    /// Labels carrying the same value on every node of the pool
    pub common_labels: BTreeMap<String, String>,
    /// Distinct taints found on any node of the pool
    pub taints: Vec<NodePoolTaint>,
    pub cpu_allocatable_millicores: u64,
    pub memory_allocatable_bytes: u64,
}
