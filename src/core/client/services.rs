use anyhow::Result;
use kube::api::{DeleteParams, ListParams};
use kube::{Api, Client};
use tracing::{debug, info};

use crate::core::client::kube_resources::Service;

/// Fetch services, scoped to a namespace when given
pub async fn fetch_services(
    client: &Client,
    namespace: Option<&str>,
    label_selector: Option<&str>,
) -> Result<Vec<Service>> {
    let services: Api<Service> = match namespace {
        Some(ns) => Api::namespaced(client.clone(), ns),
        None => Api::all(client.clone()),
    };
    let mut lp = ListParams::default();
    if let Some(selector) = label_selector {
        lp = lp.labels(selector);
    }
    let svc_list = services.list(&lp).await?;

    debug!("Discovered {} service(s)", svc_list.items.len());
    Ok(svc_list.items)
}

/// Fetch a single service by name and namespace
pub async fn fetch_service_by_name_and_namespace(
    client: &Client,
    namespace: &str,
    name: &str,
) -> Result<Service> {
    let services: Api<Service> = Api::namespaced(client.clone(), namespace);
    let svc = services.get(name).await?;

    debug!("Fetched service: {}/{}", namespace, name);
    Ok(svc)
}

pub async fn delete_service(client: &Client, namespace: &str, name: &str) -> Result<()> {
    let services: Api<Service> = Api::namespaced(client.clone(), namespace);
    services.delete(name, &DeleteParams::default()).await?;

    info!("Deleted service: {}/{}", namespace, name);
    Ok(())
}
