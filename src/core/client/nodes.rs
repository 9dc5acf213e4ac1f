use anyhow::Result;
use kube::api::{ListParams, Patch, PatchParams};
use kube::{Api, Client};
use serde_json::json;
use tracing::{debug, info};

use crate::core::client::kube_resources::Node;

/// Fetch all nodes in the cluster, optionally filtered by label selector
pub async fn fetch_nodes(client: &Client, label_selector: Option<&str>) -> Result<Vec<Node>> {
    let nodes: Api<Node> = Api::all(client.clone());
    let mut lp = ListParams::default();
    if let Some(selector) = label_selector {
        lp = lp.labels(selector);
    }
    let node_list = nodes.list(&lp).await?;

    debug!("Discovered {} node(s)", node_list.items.len());
    Ok(node_list.items)
}

/// Fetch a single node by name
pub async fn fetch_node_by_name(client: &Client, name: &str) -> Result<Node> {
    let nodes: Api<Node> = Api::all(client.clone());
    let node = nodes.get(name).await?;

    debug!("Fetched node: {}", name);
    Ok(node)
}

/// Mark a node (un)schedulable, the same patch `kubectl cordon` sends
pub async fn set_node_unschedulable(client: &Client, name: &str, unschedulable: bool) -> Result<Node> {
    let nodes: Api<Node> = Api::all(client.clone());
    let patch = json!({ "spec": { "unschedulable": unschedulable } });
    let node = nodes
        .patch(name, &PatchParams::default(), &Patch::Merge(&patch))
        .await?;

    info!("Node {} unschedulable={}", name, unschedulable);
    Ok(node)
}
