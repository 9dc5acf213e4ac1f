use anyhow::Result;
use kube::Client;
use serde_json::{json, Value};
use validator::Validate;

use crate::api::dto::k8s_dto::{K8sListQuery, ScaleRequest};
use crate::api::dto::paginated_response::PaginatedResponse;
use crate::core::client::deployments::{
    delete_deployment, fetch_deployment_by_name_and_namespace, fetch_deployments, restart_deployment,
    scale_deployment,
};
use crate::core::client::kube_resources::Deployment;
use crate::core::client::mappers::map_deployment_to_summary;
use crate::domain::k8s::dto::k8s_summary_dto::WorkloadSummary;

pub async fn list_k8s_deployments(
    client: Client,
    query: K8sListQuery,
) -> Result<PaginatedResponse<WorkloadSummary>> {
    let deployments = fetch_deployments(&client, query.namespace.as_deref(), query.label_selector.as_deref()).await?;

    let mut summaries: Vec<WorkloadSummary> = deployments.iter().map(map_deployment_to_summary).collect();
    summaries.sort_by(|a, b| (&a.namespace, &a.name).cmp(&(&b.namespace, &b.name)));

    Ok(PaginatedResponse::paginate(summaries, query.limit, query.offset))
}

pub async fn get_k8s_deployment(client: Client, namespace: String, name: String) -> Result<Deployment> {
    fetch_deployment_by_name_and_namespace(&client, &namespace, &name).await
}

pub async fn scale_k8s_deployment(client: Client, namespace: String, name: String, req: ScaleRequest) -> Result<Value> {
    req.validate()?;
    scale_deployment(&client, &namespace, &name, req.replicas).await?;
    Ok(json!({ "namespace": namespace, "name": name, "replicas": req.replicas }))
}

pub async fn restart_k8s_deployment(client: Client, namespace: String, name: String) -> Result<Deployment> {
    restart_deployment(&client, &namespace, &name).await
}

pub async fn delete_k8s_deployment(client: Client, namespace: String, name: String) -> Result<Value> {
    delete_deployment(&client, &namespace, &name).await?;
    Ok(json!({ "deleted": true, "namespace": namespace, "name": name }))
}
