use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::cluster_entity::ClusterSpec;

/// Reads the clusters file: a JSON array of cluster specs.
pub struct ClusterFsAdapter;

impl ClusterFsAdapter {
    pub fn read(path: &Path) -> Result<Vec<ClusterSpec>> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read clusters file {}", path.display()))?;

        let specs: Vec<ClusterSpec> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse clusters file {}", path.display()))?;

        debug!("Loaded {} cluster spec(s) from {}", specs.len(), path.display());
        Ok(specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", uuid::Uuid::new_v4(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_cluster_array() {
        let path = write_temp(
            "clusters.json",
            r#"[
                { "name": "prod", "kubeconfig": "/etc/kube/prod.yaml", "poll_interval_secs": 10 },
                { "name": "staging", "context": "staging" }
            ]"#,
        );

        let specs = ClusterFsAdapter::read(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].poll_interval, Some(Duration::from_secs(10)));
        assert_eq!(specs[1].context.as_deref(), Some("staging"));
    }

    #[test]
    fn malformed_file_names_the_path() {
        let path = write_temp("broken.json", r#"{ "name": "not-an-array" }"#);

        let err = ClusterFsAdapter::read(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(ClusterFsAdapter::read(Path::new("/nonexistent/clusters.json")).is_err());
    }
}
