use anyhow::Result;
use kube::Client;
use serde_json::{json, Value};
use validator::Validate;

use crate::api::dto::k8s_dto::{K8sListQuery, ScaleRequest};
use crate::api::dto::paginated_response::PaginatedResponse;
use crate::core::client::kube_resources::StatefulSet;
use crate::core::client::mappers::map_statefulset_to_summary;
use crate::core::client::statefulsets::{
    delete_statefulset, fetch_statefulset_by_name_and_namespace, fetch_statefulsets, scale_statefulset,
};
use crate::domain::k8s::dto::k8s_summary_dto::WorkloadSummary;

pub async fn list_k8s_statefulsets(
    client: Client,
    query: K8sListQuery,
) -> Result<PaginatedResponse<WorkloadSummary>> {
    let statefulsets = fetch_statefulsets(&client, query.namespace.as_deref(), query.label_selector.as_deref()).await?;

    let mut summaries: Vec<WorkloadSummary> = statefulsets.iter().map(map_statefulset_to_summary).collect();
    summaries.sort_by(|a, b| (&a.namespace, &a.name).cmp(&(&b.namespace, &b.name)));

    Ok(PaginatedResponse::paginate(summaries, query.limit, query.offset))
}

pub async fn get_k8s_statefulset(client: Client, namespace: String, name: String) -> Result<StatefulSet> {
    fetch_statefulset_by_name_and_namespace(&client, &namespace, &name).await
}

pub async fn scale_k8s_statefulset(client: Client, namespace: String, name: String, req: ScaleRequest) -> Result<Value> {
    req.validate()?;
    scale_statefulset(&client, &namespace, &name, req.replicas).await?;
    Ok(json!({ "namespace": namespace, "name": name, "replicas": req.replicas }))
}

pub async fn delete_k8s_statefulset(client: Client, namespace: String, name: String) -> Result<Value> {
    delete_statefulset(&client, &namespace, &name).await?;
    Ok(json!({ "deleted": true, "namespace": namespace, "name": name }))
}
