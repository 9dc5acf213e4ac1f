use anyhow::Result;
use kube::api::{DeleteParams, ListParams, LogParams};
use kube::{Api, Client};
use tracing::{debug, info};

use crate::core::client::kube_resources::Pod;

/// Fetch pods, scoped to a namespace when given, filtered by label selector
/// and/or the node they are scheduled on
pub async fn fetch_pods(
    client: &Client,
    namespace: Option<&str>,
    label_selector: Option<&str>,
    node_name: Option<&str>,
) -> Result<Vec<Pod>> {
    let pods: Api<Pod> = match namespace {
        Some(ns) => Api::namespaced(client.clone(), ns),
        None => Api::all(client.clone()),
    };

    let mut lp = ListParams::default();
    if let Some(selector) = label_selector {
        lp = lp.labels(selector);
    }
    if let Some(node) = node_name {
        lp = lp.fields(&format!("spec.nodeName={}", node));
    }

    let pod_list = pods.list(&lp).await?;

    debug!(
        "Discovered {} pod(s) in namespace '{}'",
        pod_list.items.len(),
        namespace.unwrap_or("*")
    );
    Ok(pod_list.items)
}

/// Fetch a single pod by name and namespace
pub async fn fetch_pod_by_name_and_namespace(
    client: &Client,
    namespace: &str,
    pod_name: &str,
) -> Result<Pod> {
    let pods: Api<Pod> = Api::namespaced(client.clone(), namespace);
    let pod = pods.get(pod_name).await?;

    debug!("Fetched pod: {}/{}", namespace, pod_name);
    Ok(pod)
}

pub async fn delete_pod(client: &Client, namespace: &str, pod_name: &str) -> Result<()> {
    let pods: Api<Pod> = Api::namespaced(client.clone(), namespace);
    pods.delete(pod_name, &DeleteParams::default()).await?;

    info!("Deleted pod: {}/{}", namespace, pod_name);
    Ok(())
}

/// Fetch the tail of a pod's log (one container when the pod has several)
pub async fn fetch_pod_logs(
    client: &Client,
    namespace: &str,
    pod_name: &str,
    container: Option<String>,
    tail_lines: i64,
) -> Result<String> {
    let pods: Api<Pod> = Api::namespaced(client.clone(), namespace);
    let params = LogParams {
        container,
        tail_lines: Some(tail_lines),
        ..LogParams::default()
    };
    let logs = pods.logs(pod_name, &params).await?;

    debug!("Fetched {} byte(s) of logs for {}/{}", logs.len(), namespace, pod_name);
    Ok(logs)
}
