use anyhow::Result;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::api::dto::system_dto::SystemStatusDto;
use crate::config::MetricsSettings;
use crate::logging::APP_NAME;

pub async fn status(started_at: DateTime<Utc>, clusters: usize, metrics: MetricsSettings) -> Result<SystemStatusDto> {
    Ok(SystemStatusDto {
        name: APP_NAME,
        version: env!("CARGO_PKG_VERSION"),
        started_at,
        uptime_secs: (Utc::now() - started_at).num_seconds().max(0),
        clusters,
        metrics,
    })
}

pub async fn health() -> Result<Value> {
    Ok(json!({ "status": "ok" }))
}
