pub mod pod_metrics;
