use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::metric::pod::dto::PodMetricsCacheStatus;

#[derive(Debug, Clone, Serialize)]
pub struct ClusterOverviewDto {
    pub nodes: usize,
    pub ready_nodes: usize,
    pub namespaces: usize,
    pub deployments: usize,
    pub pods: usize,
    pub pods_by_phase: BTreeMap<String, usize>,
    pub pod_metrics: Option<PodMetricsCacheStatus>,
}
