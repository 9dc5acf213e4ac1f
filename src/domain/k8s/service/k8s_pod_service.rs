use anyhow::Result;
use kube::Client;
use serde_json::{json, Value};
use validator::Validate;

use crate::api::dto::k8s_dto::{K8sListQuery, PodLogQuery};
use crate::api::dto::paginated_response::PaginatedResponse;
use crate::core::client::kube_resources::Pod;
use crate::core::client::mappers::map_pod_to_summary;
use crate::core::client::pods::{delete_pod, fetch_pod_by_name_and_namespace, fetch_pod_logs, fetch_pods};
use crate::domain::k8s::dto::k8s_summary_dto::PodSummary;

pub async fn list_k8s_pods(client: Client, query: K8sListQuery) -> Result<PaginatedResponse<PodSummary>> {
    let pods = fetch_pods(
        &client,
        query.namespace.as_deref(),
        query.label_selector.as_deref(),
        query.node_name.as_deref(),
    )
    .await?;

    let mut summaries: Vec<PodSummary> = pods.iter().map(map_pod_to_summary).collect();
    summaries.sort_by(|a, b| (&a.namespace, &a.name).cmp(&(&b.namespace, &b.name)));

    Ok(PaginatedResponse::paginate(summaries, query.limit, query.offset))
}

pub async fn get_k8s_pod(client: Client, namespace: String, name: String) -> Result<Pod> {
    fetch_pod_by_name_and_namespace(&client, &namespace, &name).await
}

pub async fn delete_k8s_pod(client: Client, namespace: String, name: String) -> Result<Value> {
    delete_pod(&client, &namespace, &name).await?;
    Ok(json!({ "deleted": true, "namespace": namespace, "name": name }))
}

pub async fn get_k8s_pod_logs(client: Client, namespace: String, name: String, query: PodLogQuery) -> Result<String> {
    query.validate()?;
    let tail_lines = query.tail_lines.unwrap_or(PodLogQuery::DEFAULT_TAIL_LINES);

    fetch_pod_logs(&client, &namespace, &name, query.container, tail_lines).await
}
