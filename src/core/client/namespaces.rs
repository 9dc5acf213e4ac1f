use std::collections::BTreeMap;

use anyhow::Result;
use kube::api::{DeleteParams, ListParams, PostParams};
use kube::{Api, Client};
use tracing::{debug, info};

use crate::core::client::kube_resources::{Namespace, ObjectMeta};

/// Fetch all namespaces in the cluster
pub async fn fetch_namespaces(client: &Client, label_selector: Option<&str>) -> Result<Vec<Namespace>> {
    let namespaces: Api<Namespace> = Api::all(client.clone());
    let mut lp = ListParams::default();
    if let Some(selector) = label_selector {
        lp = lp.labels(selector);
    }
    let namespace_list = namespaces.list(&lp).await?;

    debug!("Discovered {} namespace(s)", namespace_list.items.len());
    Ok(namespace_list.items)
}

/// Fetch a single namespace by name
pub async fn fetch_namespace_by_name(client: &Client, name: &str) -> Result<Namespace> {
    let namespaces: Api<Namespace> = Api::all(client.clone());
    let namespace = namespaces.get(name).await?;

    debug!("Fetched namespace: {}", name);
    Ok(namespace)
}

pub async fn create_namespace(
    client: &Client,
    name: &str,
    labels: BTreeMap<String, String>,
) -> Result<Namespace> {
    let namespaces: Api<Namespace> = Api::all(client.clone());
    let namespace = Namespace {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            labels: (!labels.is_empty()).then_some(labels),
            ..ObjectMeta::default()
        },
        ..Namespace::default()
    };
    let created = namespaces.create(&PostParams::default(), &namespace).await?;

    info!("Created namespace: {}", name);
    Ok(created)
}

pub async fn delete_namespace(client: &Client, name: &str) -> Result<()> {
    let namespaces: Api<Namespace> = Api::all(client.clone());
    namespaces.delete(name, &DeleteParams::default()).await?;

    info!("Deleted namespace: {}", name);
    Ok(())
}
