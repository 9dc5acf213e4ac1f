use anyhow::Result;
use chrono::Utc;
use kube::api::{DeleteParams, ListParams, Patch, PatchParams};
use kube::{Api, Client};
use serde_json::json;
use tracing::{debug, info};

use crate::core::client::kube_resources::Deployment;

pub const RESTARTED_AT_ANNOTATION: &str = "kubectl.kubernetes.io/restartedAt";

/// Fetch deployments, scoped to a namespace when given
pub async fn fetch_deployments(
    client: &Client,
    namespace: Option<&str>,
    label_selector: Option<&str>,
) -> Result<Vec<Deployment>> {
    let deployments: Api<Deployment> = match namespace {
        Some(ns) => Api::namespaced(client.clone(), ns),
        None => Api::all(client.clone()),
    };
    let mut lp = ListParams::default();
    if let Some(selector) = label_selector {
        lp = lp.labels(selector);
    }
    let deployment_list = deployments.list(&lp).await?;

    debug!("Discovered {} deployment(s)", deployment_list.items.len());
    Ok(deployment_list.items)
}

/// Fetch a single deployment by name and namespace
pub async fn fetch_deployment_by_name_and_namespace(
    client: &Client,
    namespace: &str,
    deployment_name: &str,
) -> Result<Deployment> {
    let deployments: Api<Deployment> = Api::namespaced(client.clone(), namespace);
    let deployment = deployments.get(deployment_name).await?;

    debug!("Fetched deployment: {}/{}", namespace, deployment_name);
    Ok(deployment)
}

/// Set desired replicas through the scale subresource
pub async fn scale_deployment(
    client: &Client,
    namespace: &str,
    deployment_name: &str,
    replicas: i32,
) -> Result<()> {
    let deployments: Api<Deployment> = Api::namespaced(client.clone(), namespace);
    let patch = json!({ "spec": { "replicas": replicas } });
    deployments
        .patch_scale(deployment_name, &PatchParams::default(), &Patch::Merge(&patch))
        .await?;

    info!("Scaled deployment {}/{} to {} replica(s)", namespace, deployment_name, replicas);
    Ok(())
}

/// Rollout restart: bump the pod template annotation so the controller
/// replaces every pod, the same way `kubectl rollout restart` does
pub async fn restart_deployment(
    client: &Client,
    namespace: &str,
    deployment_name: &str,
) -> Result<Deployment> {
    let deployments: Api<Deployment> = Api::namespaced(client.clone(), namespace);
    let patch = restart_patch(&Utc::now().to_rfc3339());
    let deployment = deployments
        .patch(deployment_name, &PatchParams::default(), &Patch::Merge(&patch))
        .await?;

    info!("Restarted deployment {}/{}", namespace, deployment_name);
    Ok(deployment)
}

pub async fn delete_deployment(client: &Client, namespace: &str, deployment_name: &str) -> Result<()> {
    let deployments: Api<Deployment> = Api::namespaced(client.clone(), namespace);
    deployments.delete(deployment_name, &DeleteParams::default()).await?;

    info!("Deleted deployment: {}/{}", namespace, deployment_name);
    Ok(())
}

fn restart_patch(timestamp: &str) -> serde_json::Value {
    json!({
        "spec": {
            "template": {
                "metadata": {
                    "annotations": { RESTARTED_AT_ANNOTATION: timestamp }
                }
            }
        }
    })
}
