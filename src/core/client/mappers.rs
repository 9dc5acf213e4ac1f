/// Maps kube-rs / k8s-openapi types → console DTOs
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use tracing::debug;

use crate::core::client::kube_resources::{Deployment, Namespace, Node, ObjectMeta, Pod, Service, StatefulSet};
use crate::core::client::pod_metrics::PodMetrics;
use crate::core::state::runtime::pod_metrics::pod_metrics_entity::{ContainerUsage, PodMetricsSnapshot};
use crate::core::util::quantity_util::QuantityUtil;
use crate::domain::k8s::dto::k8s_summary_dto::{
    NamespaceSummary, NodeSummary, PodSummary, ServiceSummary, WorkloadSummary,
};

const NODE_ROLE_LABEL_PREFIX: &str = "node-role.kubernetes.io/";

/// Go through the wire format so the conversion does not depend on the
/// date type k8s-openapi wraps.
pub fn time_to_utc(time: &Time) -> Option<DateTime<Utc>> {
    serde_json::to_value(time)
        .ok()?
        .as_str()?
        .parse::<DateTime<Utc>>()
        .ok()
}

fn created_at(metadata: &ObjectMeta) -> Option<DateTime<Utc>> {
    metadata.creation_timestamp.as_ref().and_then(time_to_utc)
}

/// Converts a metrics.k8s.io PodMetrics object into a cache snapshot
pub fn map_pod_metrics_to_snapshot(metrics: &PodMetrics) -> PodMetricsSnapshot {
    let namespace = metrics.metadata.namespace.clone().unwrap_or_default();
    let name = metrics.metadata.name.clone().unwrap_or_default();

    let containers = metrics
        .containers
        .iter()
        .map(|c| {
            let cpu = c.usage.get("cpu").and_then(|q| {
                let parsed = QuantityUtil::quantity_cpu_millicores(q);
                if parsed.is_none() {
                    debug!("Unparsable cpu quantity '{}' for {}/{}", q.0, namespace, name);
                }
                parsed
            });
            let memory = c.usage.get("memory").and_then(|q| {
                let parsed = QuantityUtil::quantity_memory_bytes(q);
                if parsed.is_none() {
                    debug!("Unparsable memory quantity '{}' for {}/{}", q.0, namespace, name);
                }
                parsed
            });

            ContainerUsage {
                name: c.name.clone(),
                cpu_millicores: cpu.unwrap_or(0),
                memory_bytes: memory.unwrap_or(0),
            }
        })
        .collect();

    let timestamp = metrics
        .timestamp
        .as_deref()
        .and_then(|ts| ts.parse::<DateTime<Utc>>().ok());

    PodMetricsSnapshot::from_containers(namespace, name, timestamp, metrics.window.clone(), containers)
}

pub fn node_is_ready(node: &Node) -> bool {
    node.status
        .as_ref()
        .and_then(|s| s.conditions.as_ref())
        .and_then(|conds| conds.iter().find(|c| c.type_ == "Ready"))
        .map(|c| c.status == "True")
        .unwrap_or(false)
}

/// Converts a k8s-openapi Node object into a NodeSummary
pub fn map_node_to_summary(node: &Node, pool_label: &str) -> NodeSummary {
    let metadata = &node.metadata;
    let status = node.status.as_ref();
    let labels = metadata.labels.clone().unwrap_or_default();

    let mut roles: Vec<String> = labels
        .keys()
        .filter_map(|k| k.strip_prefix(NODE_ROLE_LABEL_PREFIX))
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect();
    roles.sort();

    let internal_ip = status
        .and_then(|s| s.addresses.as_ref())
        .and_then(|addresses| addresses.iter().find(|a| a.type_ == "InternalIP"))
        .map(|a| a.address.clone());

    let allocatable = status.and_then(|s| s.allocatable.as_ref());

    NodeSummary {
        name: metadata.name.clone().unwrap_or_default(),
        ready: node_is_ready(node),
        unschedulable: node
            .spec
            .as_ref()
            .and_then(|s| s.unschedulable)
            .unwrap_or(false),
        roles,
        kubelet_version: status
            .and_then(|s| s.node_info.as_ref())
            .map(|info| info.kubelet_version.clone()),
        internal_ip,
        cpu_allocatable_millicores: allocatable
            .and_then(|m| m.get("cpu"))
            .and_then(QuantityUtil::quantity_cpu_millicores),
        memory_allocatable_bytes: allocatable
            .and_then(|m| m.get("memory"))
            .and_then(QuantityUtil::quantity_memory_bytes),
        pool: labels.get(pool_label).cloned(),
        created_at: created_at(metadata),
    }
}

/// Converts a k8s-openapi Pod object into a PodSummary
pub fn map_pod_to_summary(pod: &Pod) -> PodSummary {
    let metadata = &pod.metadata;
    let status = pod.status.as_ref();
    let statuses = status
        .and_then(|s| s.container_statuses.as_deref())
        .unwrap_or_default();

    let total_containers = pod
        .spec
        .as_ref()
        .map(|s| s.containers.len())
        .unwrap_or(statuses.len());

    let owner = metadata
        .owner_references
        .as_ref()
        .and_then(|owners| {
            owners
                .iter()
                .find(|o| o.controller == Some(true))
                .or_else(|| owners.first())
        });

    PodSummary {
        name: metadata.name.clone().unwrap_or_default(),
        namespace: metadata.namespace.clone().unwrap_or_default(),
        uid: metadata.uid.clone(),
        phase: status.and_then(|s| s.phase.clone()),
        node: pod.spec.as_ref().and_then(|s| s.node_name.clone()),
        ready_containers: statuses.iter().filter(|cs| cs.ready).count(),
        total_containers,
        restarts: statuses.iter().map(|cs| cs.restart_count).sum(),
        pod_ip: status.and_then(|s| s.pod_ip.clone()),
        owner_kind: owner.map(|o| o.kind.clone()),
        owner_name: owner.map(|o| o.name.clone()),
        created_at: created_at(metadata),
    }
}

/// Converts a k8s-openapi Deployment object into a WorkloadSummary
pub fn map_deployment_to_summary(deployment: &Deployment) -> WorkloadSummary {
    let spec = deployment.spec.as_ref();
    let status = deployment.status.as_ref();

    WorkloadSummary {
        name: deployment.metadata.name.clone().unwrap_or_default(),
        namespace: deployment.metadata.namespace.clone().unwrap_or_default(),
        // an unset replica count means 1 for both workload kinds
        desired_replicas: spec.and_then(|s| s.replicas).unwrap_or(1),
        ready_replicas: status.and_then(|s| s.ready_replicas).unwrap_or(0),
        available_replicas: status.and_then(|s| s.available_replicas).unwrap_or(0),
        updated_replicas: status.and_then(|s| s.updated_replicas).unwrap_or(0),
        images: spec
            .and_then(|s| s.template.spec.as_ref())
            .map(|ps| ps.containers.iter().filter_map(|c| c.image.clone()).collect())
            .unwrap_or_default(),
        created_at: created_at(&deployment.metadata),
    }
}

/// Converts a k8s-openapi StatefulSet object into a WorkloadSummary
pub fn map_statefulset_to_summary(statefulset: &StatefulSet) -> WorkloadSummary {
    let spec = statefulset.spec.as_ref();
    let status = statefulset.status.as_ref();

    WorkloadSummary {
        name: statefulset.metadata.name.clone().unwrap_or_default(),
        namespace: statefulset.metadata.namespace.clone().unwrap_or_default(),
        desired_replicas: spec.and_then(|s| s.replicas).unwrap_or(1),
        ready_replicas: status.and_then(|s| s.ready_replicas).unwrap_or(0),
        available_replicas: status.and_then(|s| s.available_replicas).unwrap_or(0),
        updated_replicas: status.and_then(|s| s.updated_replicas).unwrap_or(0),
        images: spec
            .and_then(|s| s.template.spec.as_ref())
            .map(|ps| ps.containers.iter().filter_map(|c| c.image.clone()).collect())
            .unwrap_or_default(),
        created_at: created_at(&statefulset.metadata),
    }
}

/// Converts a k8s-openapi Service object into a ServiceSummary
pub fn map_service_to_summary(service: &Service) -> ServiceSummary {
    let spec = service.spec.as_ref();

    let ports = spec
        .and_then(|s| s.ports.as_ref())
        .map(|ports| {
            ports
                .iter()
                .map(|p| format!("{}/{}", p.port, p.protocol.as_deref().unwrap_or("TCP")))
                .collect()
        })
        .unwrap_or_default();

    ServiceSummary {
        name: service.metadata.name.clone().unwrap_or_default(),
        namespace: service.metadata.namespace.clone().unwrap_or_default(),
        service_type: spec.and_then(|s| s.type_.clone()),
        cluster_ip: spec.and_then(|s| s.cluster_ip.clone()),
        ports,
        selector: spec
            .and_then(|s| s.selector.clone())
            .unwrap_or_default(),
        created_at: created_at(&service.metadata),
    }
}

/// Converts a k8s-openapi Namespace object into a NamespaceSummary
pub fn map_namespace_to_summary(namespace: &Namespace) -> NamespaceSummary {
    NamespaceSummary {
        name: namespace.metadata.name.clone().unwrap_or_default(),
        phase: namespace.status.as_ref().and_then(|s| s.phase.clone()),
        labels: namespace
            .metadata
            .labels
            .clone()
            .unwrap_or_else(BTreeMap::new),
        created_at: created_at(&namespace.metadata),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn from_json<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
        serde_json::from_value(value).expect("valid k8s object")
    }

    #[test]
    fn pod_metrics_totals_are_container_sums() {
        let metrics: PodMetrics = from_json(json!({
            "metadata": { "name": "web-1", "namespace": "shop" },
            "timestamp": "2026-03-01T12:00:00Z",
            "window": "15s",
            "containers": [
                { "name": "app", "usage": { "cpu": "250m", "memory": "128Mi" } },
                { "name": "sidecar", "usage": { "cpu": "1500000n", "memory": "1Ki" } }
            ]
        }));

        let snapshot = map_pod_metrics_to_snapshot(&metrics);

        assert_eq!(snapshot.namespace, "shop");
        assert_eq!(snapshot.name, "web-1");
        assert_eq!(snapshot.window.as_deref(), Some("15s"));
        assert!(snapshot.timestamp.is_some());
        assert_eq!(snapshot.containers.len(), 2);
        assert_eq!(snapshot.cpu_millicores, 252);
        assert_eq!(snapshot.memory_bytes, 134_217_728 + 1024);
    }

    #[test]
    fn pod_metrics_garbage_quantity_counts_as_zero() {
        let metrics: PodMetrics = from_json(json!({
            "metadata": { "name": "p", "namespace": "n" },
            "containers": [ { "name": "c", "usage": { "cpu": "lots", "memory": "64Mi" } } ]
        }));

        let snapshot = map_pod_metrics_to_snapshot(&metrics);
        assert_eq!(snapshot.cpu_millicores, 0);
        assert_eq!(snapshot.memory_bytes, 67_108_864);
        assert!(snapshot.timestamp.is_none());
    }

    #[test]
    fn node_summary_reads_roles_pool_and_capacity() {
        let node: Node = from_json(json!({
            "metadata": {
                "name": "worker-1",
                "creationTimestamp": "2026-01-02T03:04:05Z",
                "labels": {
                    "node-role.kubernetes.io/worker": "",
                    "node-role.kubernetes.io/ingress": "",
                    "node-pool": "general"
                }
            },
            "spec": { "unschedulable": true },
            "status": {
                "conditions": [ { "type": "Ready", "status": "True" } ],
                "addresses": [
                    { "type": "Hostname", "address": "worker-1" },
                    { "type": "InternalIP", "address": "10.0.0.5" }
                ],
                "allocatable": { "cpu": "3920m", "memory": "15Gi" }
            }
        }));

        let summary = map_node_to_summary(&node, "node-pool");

        assert_eq!(summary.name, "worker-1");
        assert!(summary.ready);
        assert!(summary.unschedulable);
        assert_eq!(summary.roles, vec!["ingress", "worker"]);
        assert_eq!(summary.internal_ip.as_deref(), Some("10.0.0.5"));
        assert_eq!(summary.cpu_allocatable_millicores, Some(3920));
        assert_eq!(summary.memory_allocatable_bytes, Some(15 * 1_073_741_824));
        assert_eq!(summary.pool.as_deref(), Some("general"));
        assert_eq!(
            summary.created_at,
            Some("2026-01-02T03:04:05Z".parse::<DateTime<Utc>>().unwrap())
        );
    }

    #[test]
    fn node_without_ready_condition_is_not_ready() {
        let node: Node = from_json(json!({ "metadata": { "name": "n" } }));
        assert!(!node_is_ready(&node));
    }

    #[test]
    fn pod_summary_counts_ready_and_restarts() {
        let pod: Pod = from_json(json!({
            "metadata": {
                "name": "api-7d9f-abc",
                "namespace": "shop",
                "uid": "1234",
                "ownerReferences": [
                    { "apiVersion": "apps/v1", "kind": "ReplicaSet", "name": "api-7d9f", "uid": "rs", "controller": true }
                ]
            },
            "spec": {
                "nodeName": "worker-1",
                "containers": [ { "name": "api" }, { "name": "proxy" } ]
            },
            "status": {
                "phase": "Running",
                "podIP": "10.1.2.3",
                "containerStatuses": [
                    { "name": "api", "ready": true, "restartCount": 2, "image": "api:1", "imageID": "" },
                    { "name": "proxy", "ready": false, "restartCount": 5, "image": "proxy:1", "imageID": "" }
                ]
            }
        }));

        let summary = map_pod_to_summary(&pod);

        assert_eq!(summary.phase.as_deref(), Some("Running"));
        assert_eq!(summary.node.as_deref(), Some("worker-1"));
        assert_eq!(summary.ready_containers, 1);
        assert_eq!(summary.total_containers, 2);
        assert_eq!(summary.restarts, 7);
        assert_eq!(summary.owner_kind.as_deref(), Some("ReplicaSet"));
        assert_eq!(summary.owner_name.as_deref(), Some("api-7d9f"));
    }

    #[test]
    fn deployment_summary_defaults_missing_status() {
        let deployment: Deployment = from_json(json!({
            "metadata": { "name": "api", "namespace": "shop" },
            "spec": {
                "selector": { "matchLabels": { "app": "api" } },
                "template": {
                    "spec": { "containers": [ { "name": "api", "image": "registry/api:2.1" } ] }
                }
            }
        }));

        let summary = map_deployment_to_summary(&deployment);

        assert_eq!(summary.desired_replicas, 1);
        assert_eq!(summary.ready_replicas, 0);
        assert_eq!(summary.images, vec!["registry/api:2.1"]);
    }

    #[test]
    fn service_summary_formats_ports() {
        let service: Service = from_json(json!({
            "metadata": { "name": "web", "namespace": "shop" },
            "spec": {
                "type": "ClusterIP",
                "clusterIP": "10.96.0.10",
                "selector": { "app": "web" },
                "ports": [ { "port": 80 }, { "port": 53, "protocol": "UDP" } ]
            }
        }));

        let summary = map_service_to_summary(&service);

        assert_eq!(summary.ports, vec!["80/TCP", "53/UDP"]);
        assert_eq!(summary.service_type.as_deref(), Some("ClusterIP"));
        assert_eq!(summary.selector.get("app").map(String::as_str), Some("web"));
    }

    #[test]
    fn namespace_summary_keeps_labels() {
        let ns: Namespace = from_json(json!({
            "metadata": { "name": "shop", "labels": { "team": "payments" } },
            "status": { "phase": "Active" }
        }));

        let summary = map_namespace_to_summary(&ns);
        assert_eq!(summary.phase.as_deref(), Some("Active"));
        assert_eq!(summary.labels.get("team").map(String::as_str), Some("payments"));
    }
}
