use anyhow::Result;
use kube::Client;
use serde_json::{json, Value};
use validator::Validate;

use crate::api::dto::k8s_dto::{CreateNamespaceRequest, K8sListQuery};
use crate::api::dto::paginated_response::PaginatedResponse;
use crate::core::client::kube_resources::Namespace;
use crate::core::client::mappers::map_namespace_to_summary;
use crate::core::client::namespaces::{create_namespace, delete_namespace, fetch_namespace_by_name, fetch_namespaces};
use crate::core::util::k8s_name_util::ensure_dns_label;
use crate::domain::k8s::dto::k8s_summary_dto::NamespaceSummary;

pub async fn list_k8s_namespaces(
    client: Client,
    query: K8sListQuery,
) -> Result<PaginatedResponse<NamespaceSummary>> {
    let namespaces = fetch_namespaces(&client, query.label_selector.as_deref()).await?;

    let mut summaries: Vec<NamespaceSummary> = namespaces.iter().map(map_namespace_to_summary).collect();
    summaries.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(PaginatedResponse::paginate(summaries, query.limit, query.offset))
}

pub async fn get_k8s_namespace(client: Client, name: String) -> Result<Namespace> {
    fetch_namespace_by_name(&client, &name).await
}

pub async fn create_k8s_namespace(client: Client, req: CreateNamespaceRequest) -> Result<Namespace> {
    req.validate()?;
    ensure_dns_label("namespace", &req.name)?;

    create_namespace(&client, &req.name, req.labels).await
}

pub async fn delete_k8s_namespace(client: Client, name: String) -> Result<Value> {
    delete_namespace(&client, &name).await?;
    Ok(json!({ "deleted": true, "name": name }))
}
