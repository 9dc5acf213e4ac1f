use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a pod within one cluster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PodKey {
    pub namespace: String,
    pub name: String,
}

impl PodKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for PodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerUsage {
    pub name: String,
    pub cpu_millicores: u64,
    pub memory_bytes: u64,
}

/// One resource-usage sample of a pod as reported by the metrics API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodMetricsSnapshot {
    pub namespace: String,
    pub name: String,
    /// Sample time reported by metrics-server
    pub timestamp: Option<DateTime<Utc>>,
    /// Sampling window, e.g. "15s"
    pub window: Option<String>,
    pub containers: Vec<ContainerUsage>,
    pub cpu_millicores: u64,
    pub memory_bytes: u64,
}

impl PodMetricsSnapshot {
    /// Build a snapshot whose totals are the sums over `containers`.
    pub fn from_containers(
        namespace: impl Into<String>,
        name: impl Into<String>,
        timestamp: Option<DateTime<Utc>>,
        window: Option<String>,
        containers: Vec<ContainerUsage>,
    ) -> Self {
        let cpu_millicores = containers.iter().fold(0u64, |acc, c| acc.saturating_add(c.cpu_millicores));
        let memory_bytes = containers.iter().fold(0u64, |acc, c| acc.saturating_add(c.memory_bytes));

        Self {
            namespace: namespace.into(),
            name: name.into(),
            timestamp,
            window,
            containers,
            cpu_millicores,
            memory_bytes,
        }
    }

    pub fn key(&self) -> PodKey {
        PodKey::new(self.namespace.clone(), self.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(name: &str, cpu: u64, memory: u64) -> ContainerUsage {
        ContainerUsage {
            name: name.into(),
            cpu_millicores: cpu,
            memory_bytes: memory,
        }
    }

    #[test]
    fn totals_sum_containers() {
        let snapshot =
            PodMetricsSnapshot::from_containers("shop", "web-1", None, None, vec![usage("app", 120, 1024), usage("proxy", 30, 512)]);

        assert_eq!(snapshot.cpu_millicores, 150);
        assert_eq!(snapshot.memory_bytes, 1536);
    }

    #[test]
    fn huge_totals_saturate() {
        let snapshot = PodMetricsSnapshot::from_containers(
            "shop",
            "web-1",
            None,
            None,
            vec![usage("a", u64::MAX, 8 << 60), usage("b", 1, 8 << 60)],
        );

        assert_eq!(snapshot.cpu_millicores, u64::MAX);
        assert_eq!(snapshot.memory_bytes, u64::MAX);
    }
}
