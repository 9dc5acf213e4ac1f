// Kube-rs based Kubernetes client
pub mod kube_client;
pub mod kube_resources;
pub mod nodes;
pub mod pods;
pub mod deployments;
pub mod statefulsets;
pub mod services;
pub mod namespaces;
pub mod mappers;

// metrics.k8s.io
pub mod pod_metrics;
pub mod pod_metrics_source_trait;
