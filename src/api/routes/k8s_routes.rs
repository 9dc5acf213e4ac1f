//! Live Kubernetes routes (proxied directly to the cluster's API server)

use axum::{routing::{get, post}, Router};
use crate::api::controller::k8s::deployment::K8sDeploymentController;
use crate::api::controller::k8s::namespace::K8sNamespaceController;
use crate::api::controller::k8s::node::K8sNodeController;
use crate::api::controller::k8s::node_pool::K8sNodePoolController;
use crate::api::controller::k8s::pod::K8sPodController;
use crate::api::controller::k8s::service::K8sServiceController;
use crate::api::controller::k8s::statefulset::K8sStatefulSetController;
use crate::app_state::AppState;

pub fn k8s_routes() -> Router<AppState> {
    Router::new()
        // nodes
        .route("/nodes", get(K8sNodeController::list_k8s_nodes))
        .route("/nodes/{name}", get(K8sNodeController::get_k8s_node))
        .route("/nodes/{name}/cordon", post(K8sNodeController::cordon_k8s_node))
        .route("/nodes/{name}/uncordon", post(K8sNodeController::uncordon_k8s_node))
        .route("/nodepools", get(K8sNodePoolController::list_k8s_node_pools))
        .route("/nodepools/{pool}", get(K8sNodePoolController::get_k8s_node_pool))

        // pods
        .route("/pods", get(K8sPodController::list_k8s_pods))
        .route(
            "/pods/{namespace}/{name}",
            get(K8sPodController::get_k8s_pod).delete(K8sPodController::delete_k8s_pod),
        )
        .route("/pods/{namespace}/{name}/logs", get(K8sPodController::get_k8s_pod_logs))

        // deployments
        .route("/deployments", get(K8sDeploymentController::list_k8s_deployments))
        .route(
            "/deployments/{namespace}/{name}",
            get(K8sDeploymentController::get_k8s_deployment).delete(K8sDeploymentController::delete_k8s_deployment),
        )
        .route(
            "/deployments/{namespace}/{name}/scale",
            post(K8sDeploymentController::scale_k8s_deployment),
        )
        .route(
            "/deployments/{namespace}/{name}/restart",
            post(K8sDeploymentController::restart_k8s_deployment),
        )

        // statefulsets
        .route("/statefulsets", get(K8sStatefulSetController::list_k8s_statefulsets))
        .route(
            "/statefulsets/{namespace}/{name}",
            get(K8sStatefulSetController::get_k8s_statefulset).delete(K8sStatefulSetController::delete_k8s_statefulset),
        )
        .route(
            "/statefulsets/{namespace}/{name}/scale",
            post(K8sStatefulSetController::scale_k8s_statefulset),
        )

        // services
        .route("/services", get(K8sServiceController::list_k8s_services))
        .route(
            "/services/{namespace}/{name}",
            get(K8sServiceController::get_k8s_service).delete(K8sServiceController::delete_k8s_service),
        )

        // namespaces
        .route(
            "/namespaces",
            get(K8sNamespaceController::list_k8s_namespaces).post(K8sNamespaceController::create_k8s_namespace),
        )
        .route(
            "/namespaces/{name}",
            get(K8sNamespaceController::get_k8s_namespace).delete(K8sNamespaceController::delete_k8s_namespace),
        )
}
