//! Pod metrics API DTOs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PodMetricsSort {
    #[default]
    Cpu,
    Memory,
    Name,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct PodMetricsQuery {
    pub namespace: Option<String>,
    pub sort: PodMetricsSort,
    pub limit: Option<usize>,
}

impl PodMetricsQuery {
    pub const DEFAULT_LIMIT: usize = 100;
    pub const MAX_LIMIT: usize = 1000;

    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }
}
