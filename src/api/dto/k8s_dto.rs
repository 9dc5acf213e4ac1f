//! Kubernetes pass-through API DTOs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct K8sListQuery {
    pub namespace: Option<String>,
    #[serde(alias = "label-selector", alias = "labelSelector")]
    pub label_selector: Option<String>,
    #[serde(alias = "nodeName")]
    pub node_name: Option<String>, // for pods by node
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Validate)]
#[serde(default)]
pub struct PodLogQuery {
    pub container: Option<String>,
    #[validate(range(min = 1, max = 5000))]
    pub tail_lines: Option<i64>,
}

impl PodLogQuery {
    pub const DEFAULT_TAIL_LINES: i64 = 200;
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScaleRequest {
    #[validate(range(min = 0, max = 1000))]
    pub replicas: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNamespaceRequest {
    #[validate(length(min = 1, max = 63))]
    pub name: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}
