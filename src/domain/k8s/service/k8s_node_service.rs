use anyhow::Result;
use kube::Client;

use crate::api::dto::k8s_dto::K8sListQuery;
use crate::api::dto::paginated_response::PaginatedResponse;
use crate::core::client::kube_resources::Node;
use crate::core::client::mappers::map_node_to_summary;
use crate::core::client::nodes::{fetch_node_by_name, fetch_nodes, set_node_unschedulable};
use crate::domain::k8s::dto::k8s_summary_dto::NodeSummary;

pub async fn list_k8s_nodes(
    client: Client,
    pool_label: String,
    query: K8sListQuery,
) -> Result<PaginatedResponse<NodeSummary>> {
    let nodes = fetch_nodes(&client, query.label_selector.as_deref()).await?;

    let mut summaries: Vec<NodeSummary> = nodes
        .iter()
        .map(|node| map_node_to_summary(node, &pool_label))
        .collect();
    summaries.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(PaginatedResponse::paginate(summaries, query.limit, query.offset))
}

pub async fn get_k8s_node(client: Client, node_name: String) -> Result<Node> {
    fetch_node_by_name(&client, &node_name).await
}

pub async fn cordon_k8s_node(client: Client, node_name: String) -> Result<Node> {
    set_node_unschedulable(&client, &node_name, true).await
}

pub async fn uncordon_k8s_node(client: Client, node_name: String) -> Result<Node> {
    set_node_unschedulable(&client, &node_name, false).await
}
