use std::path::Path;

use anyhow::{Context, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::debug;

/// Creates a Kubernetes client for one managed cluster.
///
/// - `kubeconfig` set: read that file, optionally selecting `context`
/// - only `context` set: use the default kubeconfig with that context
/// - neither: in-cluster service account, falling back to `~/.kube/config`
pub async fn build_kube_client(kubeconfig: Option<&Path>, context: Option<&str>) -> Result<Client> {
    let options = KubeConfigOptions {
        context: context.map(str::to_string),
        cluster: None,
        user: None,
    };

    let client = match (kubeconfig, context) {
        (Some(path), _) => {
            debug!("Using kubeconfig file {}", path.display());
            let kube_config = Kubeconfig::read_from(path)
                .with_context(|| format!("failed to read kubeconfig {}", path.display()))?;
            let config = Config::from_custom_kubeconfig(kube_config, &options)
                .await
                .context("failed to load kubeconfig")?;
            Client::try_from(config)?
        }
        (None, Some(ctx)) => {
            debug!("Using default kubeconfig with context '{}'", ctx);
            let config = Config::from_kubeconfig(&options)
                .await
                .with_context(|| format!("failed to load kubeconfig context '{ctx}'"))?;
            Client::try_from(config)?
        }
        (None, None) => {
            debug!("Using in-cluster or default configuration");
            Client::try_default().await.context("failed to infer kube configuration")?
        }
    };

    debug!("Kubernetes client initialized successfully");
    Ok(client)
}

/// Ask the API server for its version; used as a connectivity probe.
pub async fn fetch_server_version(client: &Client) -> Result<String> {
    let info = client.apiserver_version().await?;
    Ok(info.git_version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_kubeconfig_file_is_an_error() {
        let result = build_kube_client(Some(Path::new("/nonexistent/kubeconfig")), None).await;
        let err = result.err().expect("client from a missing kubeconfig");
        assert!(format!("{err:#}").contains("/nonexistent/kubeconfig"));
    }
}
