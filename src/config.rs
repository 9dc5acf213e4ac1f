//! Process configuration, read from `KUBECONSOLE_*` environment variables
//! (optionally seeded from a `.env` file).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};

pub const ENV_SERVER_ADDR: &str = "KUBECONSOLE_SERVER_ADDR";
pub const ENV_LOG_DIR: &str = "KUBECONSOLE_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "KUBECONSOLE_LOG_LEVEL";
pub const ENV_METRICS_POLL_INTERVAL_SECS: &str = "KUBECONSOLE_METRICS_POLL_INTERVAL_SECS";
pub const ENV_METRICS_TTL_SECS: &str = "KUBECONSOLE_METRICS_TTL_SECS";
pub const ENV_METRICS_MAX_ENTRIES: &str = "KUBECONSOLE_METRICS_MAX_ENTRIES";
pub const ENV_CLUSTERS_FILE: &str = "KUBECONSOLE_CLUSTERS_FILE";
pub const ENV_NODE_POOL_LABEL: &str = "KUBECONSOLE_NODE_POOL_LABEL";

/// Settings of the pod metrics collector and cache, shared by every cluster
/// unless a cluster overrides its poll interval.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSettings {
    #[serde_as(as = "DurationSeconds<u64>")]
    pub poll_interval: Duration,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub ttl: Duration,
    pub max_entries: usize,
}

impl MetricsSettings {
    /// Cached entries would expire between two polls.
    pub fn ttl_below_interval(&self) -> bool {
        self.ttl < self.poll_interval
    }
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            ttl: Duration::from_secs(60),
            max_entries: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_addr: SocketAddr,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub metrics: MetricsSettings,
    pub clusters_file: Option<PathBuf>,
    pub node_pool_label: String,
}

impl AppConfig {
    /// Load from the real process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = MetricsSettings::default();

        let server_addr = match lookup(ENV_SERVER_ADDR) {
            Some(raw) => raw
                .parse::<SocketAddr>()
                .with_context(|| format!("{ENV_SERVER_ADDR}: invalid socket address '{raw}'"))?,
            None => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let poll_secs = parse_positive(&lookup, ENV_METRICS_POLL_INTERVAL_SECS, defaults.poll_interval.as_secs())?;
        let ttl_secs = parse_positive(&lookup, ENV_METRICS_TTL_SECS, defaults.ttl.as_secs())?;
        let max_entries = parse_positive(&lookup, ENV_METRICS_MAX_ENTRIES, defaults.max_entries as u64)? as usize;

        let node_pool_label = lookup(ENV_NODE_POOL_LABEL)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "node-pool".to_string());

        Ok(Self {
            server_addr,
            log_dir: lookup(ENV_LOG_DIR).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("logs")),
            log_level: lookup(ENV_LOG_LEVEL).unwrap_or_else(|| "info".to_string()),
            metrics: MetricsSettings {
                poll_interval: Duration::from_secs(poll_secs),
                ttl: Duration::from_secs(ttl_secs),
                max_entries,
            },
            clusters_file: lookup(ENV_CLUSTERS_FILE)
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            node_pool_label,
        })
    }
}

fn parse_positive<F>(lookup: &F, key: &str, default: u64) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    let value: u64 = raw
        .trim()
        .parse()
        .map_err(|e| anyhow!("{key}: '{raw}' is not a whole number ({e})"))?;

    if value == 0 {
        bail!("{key}: must be greater than zero");
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(cfg.server_addr.port(), 8080);
        assert_eq!(cfg.metrics, MetricsSettings::default());
        assert_eq!(cfg.node_pool_label, "node-pool");
        assert!(cfg.clusters_file.is_none());
        assert_eq!(cfg.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn reads_overrides() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            (ENV_SERVER_ADDR, "127.0.0.1:9000"),
            (ENV_METRICS_POLL_INTERVAL_SECS, "10"),
            (ENV_METRICS_TTL_SECS, "45"),
            (ENV_METRICS_MAX_ENTRIES, "500"),
            (ENV_CLUSTERS_FILE, "/etc/console/clusters.json"),
            (ENV_NODE_POOL_LABEL, "cloud.google.com/gke-nodepool"),
        ]))
        .unwrap();

        assert_eq!(cfg.server_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(cfg.metrics.poll_interval, Duration::from_secs(10));
        assert_eq!(cfg.metrics.ttl, Duration::from_secs(45));
        assert_eq!(cfg.metrics.max_entries, 500);
        assert_eq!(cfg.clusters_file, Some(PathBuf::from("/etc/console/clusters.json")));
        assert_eq!(cfg.node_pool_label, "cloud.google.com/gke-nodepool");
    }

    #[test]
    fn rejects_zero_and_garbage() {
        let err = AppConfig::from_lookup(lookup_from(&[(ENV_METRICS_TTL_SECS, "0")])).unwrap_err();
        assert!(err.to_string().contains(ENV_METRICS_TTL_SECS));

        let err = AppConfig::from_lookup(lookup_from(&[(ENV_METRICS_MAX_ENTRIES, "lots")])).unwrap_err();
        assert!(err.to_string().contains(ENV_METRICS_MAX_ENTRIES));

        assert!(AppConfig::from_lookup(lookup_from(&[(ENV_SERVER_ADDR, "nowhere")])).is_err());
    }

    #[test]
    fn short_ttl_is_accepted_but_flagged() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            (ENV_METRICS_POLL_INTERVAL_SECS, "60"),
            (ENV_METRICS_TTL_SECS, "30"),
        ]))
        .unwrap();

        assert!(cfg.metrics.ttl_below_interval());
        assert!(!MetricsSettings::default().ttl_below_interval());
    }

    #[test]
    fn metrics_settings_serialize_as_seconds() {
        let json = serde_json::to_value(MetricsSettings::default()).unwrap();
        assert_eq!(json["poll_interval"], 30);
        assert_eq!(json["ttl"], 60);
        assert_eq!(json["max_entries"], 10_000);
    }
}
