use anyhow::Result;
use kube::Client;
use serde_json::{json, Value};

use crate::api::dto::k8s_dto::K8sListQuery;
use crate::api::dto::paginated_response::PaginatedResponse;
use crate::core::client::kube_resources::Service;
use crate::core::client::mappers::map_service_to_summary;
use crate::core::client::services::{delete_service, fetch_service_by_name_and_namespace, fetch_services};
use crate::domain::k8s::dto::k8s_summary_dto::ServiceSummary;

pub async fn list_k8s_services(client: Client, query: K8sListQuery) -> Result<PaginatedResponse<ServiceSummary>> {
    let services = fetch_services(&client, query.namespace.as_deref(), query.label_selector.as_deref()).await?;

    let mut summaries: Vec<ServiceSummary> = services.iter().map(map_service_to_summary).collect();
    summaries.sort_by(|a, b| (&a.namespace, &a.name).cmp(&(&b.namespace, &b.name)));

    Ok(PaginatedResponse::paginate(summaries, query.limit, query.offset))
}

pub async fn get_k8s_service(client: Client, namespace: String, name: String) -> Result<Service> {
    fetch_service_by_name_and_namespace(&client, &namespace, &name).await
}

pub async fn delete_k8s_service(client: Client, namespace: String, name: String) -> Result<Value> {
    delete_service(&client, &namespace, &name).await?;
    Ok(json!({ "deleted": true, "namespace": namespace, "name": name }))
}
