use axum::{response::IntoResponse, Json};
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("K8s API error: {0}")]
    K8sApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Metrics unavailable: {0}")]
    MetricsUnavailable(String),
}

/// Helper for mapping any unknown error into internal error
pub fn internal_error<E: ToString>(err: E) -> AppError {
    AppError::InternalServerError(err.to_string())
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        // Walk the context chain: services wrap kube errors with `.context(..)`
        for cause in err.chain() {
            if let Some(app) = cause.downcast_ref::<AppError>() {
                return app.clone();
            }
            if let Some(errors) = cause.downcast_ref::<validator::ValidationErrors>() {
                return AppError::BadRequest(errors.to_string());
            }
            if let Some(kube::Error::Api(status)) = cause.downcast_ref::<kube::Error>() {
                let message = format!("{err:#}");
                return match status.code {
                    404 => AppError::NotFound(message),
                    409 => AppError::Conflict(message),
                    400 | 422 => AppError::BadRequest(message),
                    _ => AppError::K8sApiError(message),
                };
            }
        }

        internal_error(format!("{err:#}"))
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::K8sApiError(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::MetricsUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();

        // String provided by thiserror → safe JSON message
        let body = Json(json!({
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn app_error_survives_anyhow_context() {
        let err: anyhow::Error = AppError::NotFound("cluster 'x'".into()).into();
        let err = err.context("while loading overview");

        let mapped = AppError::from(err);
        assert!(matches!(mapped, AppError::NotFound(ref m) if m == "cluster 'x'"));
        assert_eq!(mapped.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_errors_become_bad_request() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("replicas", validator::ValidationError::new("range"));

        let mapped = AppError::from(anyhow::Error::new(errors));
        assert_eq!(mapped.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unknown_errors_are_internal() {
        let err: anyhow::Result<()> = Err(std::io::Error::other("disk gone")).context("reading");
        let mapped = AppError::from(err.unwrap_err());

        assert_eq!(mapped.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(mapped.to_string().contains("disk gone"));
    }

    #[test]
    fn status_codes_per_variant() {
        assert_eq!(AppError::Conflict(String::new()).status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::K8sApiError(String::new()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::MetricsUnavailable(String::new()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
