use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use kube::Client;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::cluster_entity::{ClusterEntry, ClusterInfo};
use crate::errors::AppError;

/// Registered clusters by id. Names are unique.
#[derive(Default)]
pub struct ClusterRegistry {
    clusters: RwLock<HashMap<Uuid, Arc<ClusterEntry>>>,
}

impl ClusterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains_name(&self, name: &str) -> bool {
        self.clusters
            .read()
            .await
            .values()
            .any(|entry| entry.info.name == name)
    }

    /// Store a new entry; a name already in use is a `Conflict`.
    pub async fn insert(&self, entry: ClusterEntry) -> Result<Arc<ClusterEntry>> {
        let mut guard = self.clusters.write().await;

        if guard.values().any(|e| e.info.name == entry.info.name) {
            return Err(AppError::Conflict(format!(
                "cluster '{}' is already registered",
                entry.info.name
            ))
            .into());
        }

        let entry = Arc::new(entry);
        guard.insert(entry.info.id, entry.clone());
        Ok(entry)
    }

    pub async fn remove(&self, id: Uuid) -> Option<Arc<ClusterEntry>> {
        self.clusters.write().await.remove(&id)
    }

    pub async fn get(&self, id: Uuid) -> Result<Arc<ClusterEntry>> {
        self.clusters
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("cluster '{id}'")).into())
    }

    pub async fn client(&self, id: Uuid) -> Result<Client> {
        Ok(self.get(id).await?.client.clone())
    }

    /// Cluster infos sorted by name.
    pub async fn list(&self) -> Vec<ClusterInfo> {
        let mut infos: Vec<ClusterInfo> = self
            .clusters
            .read()
            .await
            .values()
            .map(|entry| entry.info.clone())
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    pub async fn len(&self) -> usize {
        self.clusters.read().await.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Utc;

    /// A client pointing nowhere; nothing connects until a request is sent.
    pub(crate) fn offline_client() -> Client {
        let config = kube::Config::new("http://127.0.0.1:9".parse().unwrap());
        Client::try_from(config).unwrap()
    }

    pub(crate) fn entry(name: &str) -> ClusterEntry {
        ClusterEntry {
            info: ClusterInfo {
                id: Uuid::new_v4(),
                name: name.to_string(),
                kubeconfig: None,
                context: None,
                server_version: None,
                poll_interval_secs: 30,
                registered_at: Utc::now(),
            },
            client: offline_client(),
        }
    }

    #[tokio::test]
    async fn duplicate_names_conflict() {
        let registry = ClusterRegistry::new();
        registry.insert(entry("prod")).await.unwrap();

        let err = registry.insert(entry("prod")).await.err().expect("duplicate insert");
        assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::Conflict(_))));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn list_is_sorted_by_name() {
        let registry = ClusterRegistry::new();
        for name in ["staging", "dev", "prod"] {
            registry.insert(entry(name)).await.unwrap();
        }

        let names: Vec<String> = registry.list().await.into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["dev", "prod", "staging"]);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let registry = ClusterRegistry::new();
        let err = registry.get(Uuid::new_v4()).await.err().expect("unknown id");
        assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::NotFound(_))));
        assert!(registry.client(Uuid::new_v4()).await.is_err());
    }

    #[tokio::test]
    async fn remove_frees_the_name() {
        let registry = ClusterRegistry::new();
        let id = registry.insert(entry("prod")).await.unwrap().info.id;

        assert!(registry.remove(id).await.is_some());
        assert!(registry.remove(id).await.is_none());
        assert!(!registry.contains_name("prod").await);
        registry.insert(entry("prod")).await.unwrap();
    }
}
