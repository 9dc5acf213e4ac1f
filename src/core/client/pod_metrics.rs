use std::collections::BTreeMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use kube::api::ListParams;
use kube::{Api, Client};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::client::kube_resources::ObjectMeta;
use crate::core::client::mappers::map_pod_metrics_to_snapshot;
use crate::core::client::pod_metrics_source_trait::PodMetricsSourceTrait;
use crate::core::state::runtime::pod_metrics::pod_metrics_entity::PodMetricsSnapshot;

// kubectl get --raw /apis/metrics.k8s.io/v1beta1/pods | jq .

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerMetrics {
    pub name: String,
    #[serde(default)]
    pub usage: BTreeMap<String, Quantity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodMetrics {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub containers: Vec<ContainerMetrics>,
    pub timestamp: Option<String>,
    pub window: Option<String>,
}

// metrics.k8s.io is not part of k8s-openapi
impl k8s_openapi::Resource for PodMetrics {
    const GROUP: &'static str = "metrics.k8s.io";
    const KIND: &'static str = "PodMetrics";
    const VERSION: &'static str = "v1beta1";
    const API_VERSION: &'static str = "metrics.k8s.io/v1beta1";
    const URL_PATH_SEGMENT: &'static str = "pods";
    type Scope = k8s_openapi::NamespaceResourceScope;
}

impl k8s_openapi::Metadata for PodMetrics {
    type Ty = ObjectMeta;

    fn metadata(&self) -> &Self::Ty {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Self::Ty {
        &mut self.metadata
    }
}

/// Reads pod usage from metrics-server through the cluster's API server.
#[derive(Clone)]
pub struct KubePodMetricsSource {
    client: Client,
}

impl KubePodMetricsSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, namespace: Option<&str>) -> Api<PodMetrics> {
        match namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        }
    }
}

#[async_trait]
impl PodMetricsSourceTrait for KubePodMetricsSource {
    async fn list_pod_metrics(&self, namespace: Option<&str>) -> Result<Vec<PodMetricsSnapshot>> {
        let list = self
            .api(namespace)
            .list(&ListParams::default())
            .await
            .context("failed to list pod metrics (is metrics-server installed?)")?;

        debug!("Fetched metrics for {} pod(s)", list.items.len());
        Ok(list.items.iter().map(map_pod_metrics_to_snapshot).collect())
    }

    async fn get_pod_metrics(&self, namespace: &str, name: &str) -> Result<Option<PodMetricsSnapshot>> {
        let metrics = self
            .api(Some(namespace))
            .get_opt(name)
            .await
            .with_context(|| format!("failed to get pod metrics for {namespace}/{name}"))?;

        Ok(metrics.as_ref().map(map_pod_metrics_to_snapshot))
    }
}
