use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use kube::Client;

use crate::core::client::kube_resources::Node;
use crate::core::client::mappers::node_is_ready;
use crate::core::client::nodes::fetch_nodes;
use crate::core::util::quantity_util::QuantityUtil;
use crate::domain::k8s::dto::node_pool_dto::{NodePool, NodePoolTaint};
use crate::errors::AppError;

/// Pool name for nodes that do not carry the pool label.
pub const UNASSIGNED_POOL: &str = "unassigned";

pub async fn list_k8s_node_pools(client: Client, pool_label: String) -> Result<Vec<NodePool>> {
    let nodes = fetch_nodes(&client, None).await?;
    Ok(group_node_pools(&nodes, &pool_label))
}

pub async fn get_k8s_node_pool(client: Client, pool_label: String, pool_name: String) -> Result<NodePool> {
    let nodes = fetch_nodes(&client, None).await?;

    group_node_pools(&nodes, &pool_label)
        .into_iter()
        .find(|pool| pool.name == pool_name)
        .ok_or_else(|| AppError::NotFound(format!("node pool '{pool_name}'")).into())
}

/// Group nodes on the value of `pool_label`, pools sorted by name.
pub fn group_node_pools(nodes: &[Node], pool_label: &str) -> Vec<NodePool> {
    let mut grouped: BTreeMap<String, Vec<&Node>> = BTreeMap::new();

    for node in nodes {
        let pool = node
            .metadata
            .labels
            .as_ref()
            .and_then(|labels| labels.get(pool_label))
            .cloned()
            .unwrap_or_else(|| UNASSIGNED_POOL.to_string());
        grouped.entry(pool).or_default().push(node);
    }

    grouped
        .into_iter()
        .map(|(name, members)| build_pool(name, &members))
        .collect()
}

fn build_pool(name: String, members: &[&Node]) -> NodePool {
    let mut pool = NodePool {
        name,
        node_count: members.len(),
        ..Default::default()
    };

    let mut taints = BTreeSet::new();
    let mut common: Option<BTreeMap<String, String>> = None;

    for node in members {
        pool.nodes.push(node.metadata.name.clone().unwrap_or_default());
        if node_is_ready(node) {
            pool.ready_count += 1;
        }

        let labels = node.metadata.labels.clone().unwrap_or_default();
        common = Some(match common {
            None => labels,
            Some(mut acc) => {
                acc.retain(|k, v| labels.get(k) == Some(v));
                acc
            }
        });

        for taint in node.spec.as_ref().and_then(|s| s.taints.as_ref()).into_iter().flatten() {
            taints.insert(NodePoolTaint {
                key: taint.key.clone(),
                value: taint.value.clone(),
                effect: taint.effect.clone(),
            });
        }

        if let Some(allocatable) = node.status.as_ref().and_then(|s| s.allocatable.as_ref()) {
            let cpu = allocatable
                .get("cpu")
                .and_then(QuantityUtil::quantity_cpu_millicores)
                .unwrap_or(0);
            let memory = allocatable
                .get("memory")
                .and_then(QuantityUtil::quantity_memory_bytes)
                .unwrap_or(0);
            pool.cpu_allocatable_millicores = pool.cpu_allocatable_millicores.saturating_add(cpu);
            pool.memory_allocatable_bytes = pool.memory_allocatable_bytes.saturating_add(memory);
        }
    }

    pool.nodes.sort();
    pool.common_labels = common.unwrap_or_default();
    pool.taints = taints.into_iter().collect();
    pool
}
