use anyhow::Result;
use kube::api::{DeleteParams, ListParams, Patch, PatchParams};
use kube::{Api, Client};
use serde_json::json;
use tracing::{debug, info};

use crate::core::client::kube_resources::StatefulSet;

/// Fetch statefulsets, scoped to a namespace when given
pub async fn fetch_statefulsets(
    client: &Client,
    namespace: Option<&str>,
    label_selector: Option<&str>,
) -> Result<Vec<StatefulSet>> {
    let statefulsets: Api<StatefulSet> = match namespace {
        Some(ns) => Api::namespaced(client.clone(), ns),
        None => Api::all(client.clone()),
    };
    let mut lp = ListParams::default();
    if let Some(selector) = label_selector {
        lp = lp.labels(selector);
    }
    let statefulset_list = statefulsets.list(&lp).await?;

    debug!(
        "Discovered {} statefulset(s)",
        statefulset_list.items.len()
    );
    Ok(statefulset_list.items)
}

/// Fetch a single statefulset by name and namespace
pub async fn fetch_statefulset_by_name_and_namespace(
    client: &Client,
    namespace: &str,
    statefulset_name: &str,
) -> Result<StatefulSet> {
    let statefulsets: Api<StatefulSet> = Api::namespaced(client.clone(), namespace);
    let statefulset = statefulsets.get(statefulset_name).await?;

    debug!("Fetched statefulset: {}/{}", namespace, statefulset_name);
    Ok(statefulset)
}

pub async fn scale_statefulset(
    client: &Client,
    namespace: &str,
    statefulset_name: &str,
    replicas: i32,
) -> Result<()> {
    let statefulsets: Api<StatefulSet> = Api::namespaced(client.clone(), namespace);
    let patch = json!({ "spec": { "replicas": replicas } });
    statefulsets
        .patch_scale(statefulset_name, &PatchParams::default(), &Patch::Merge(&patch))
        .await?;

    info!("Scaled statefulset {}/{} to {} replica(s)", namespace, statefulset_name, replicas);
    Ok(())
}

pub async fn delete_statefulset(client: &Client, namespace: &str, statefulset_name: &str) -> Result<()> {
    let statefulsets: Api<StatefulSet> = Api::namespaced(client.clone(), namespace);
    statefulsets.delete(statefulset_name, &DeleteParams::default()).await?;

    info!("Deleted statefulset: {}/{}", namespace, statefulset_name);
    Ok(())
}
