use std::collections::BTreeMap;

use anyhow::Result;
use kube::Client;

use crate::core::client::deployments::fetch_deployments;
use crate::core::client::kube_resources::Pod;
use crate::core::client::mappers::node_is_ready;
use crate::core::client::namespaces::fetch_namespaces;
use crate::core::client::nodes::fetch_nodes;
use crate::core::client::pods::fetch_pods;
use crate::domain::k8s::dto::cluster_overview_dto::ClusterOverviewDto;
use crate::domain::metric::pod::dto::PodMetricsCacheStatus;

/// Counts across the whole cluster; the four lists are fetched concurrently.
pub async fn get_cluster_overview(
    client: Client,
    pod_metrics: Option<PodMetricsCacheStatus>,
) -> Result<ClusterOverviewDto> {
    let (nodes, namespaces, deployments, pods) = futures::try_join!(
        fetch_nodes(&client, None),
        fetch_namespaces(&client, None),
        fetch_deployments(&client, None, None),
        fetch_pods(&client, None, None, None),
    )?;

    Ok(ClusterOverviewDto {
        nodes: nodes.len(),
        ready_nodes: nodes.iter().filter(|n| node_is_ready(n)).count(),
        namespaces: namespaces.len(),
        deployments: deployments.len(),
        pods: pods.len(),
        pods_by_phase: count_pods_by_phase(&pods),
        pod_metrics,
    })
}

pub fn count_pods_by_phase(pods: &[Pod]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for pod in pods {
        let phase = pod
            .status
            .as_ref()
            .and_then(|s| s.phase.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        *counts.entry(phase).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn phases_are_counted_with_unknown_fallback() {
        let pods: Vec<Pod> = vec![
            json!({ "metadata": { "name": "a" }, "status": { "phase": "Running" } }),
            json!({ "metadata": { "name": "b" }, "status": { "phase": "Running" } }),
            json!({ "metadata": { "name": "c" }, "status": { "phase": "Pending" } }),
            json!({ "metadata": { "name": "d" } }),
        ]
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap())
        .collect();

        let counts = count_pods_by_phase(&pods);
        assert_eq!(counts.get("Running"), Some(&2));
        assert_eq!(counts.get("Pending"), Some(&1));
        assert_eq!(counts.get("Unknown"), Some(&1));
    }
}
