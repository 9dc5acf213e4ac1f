//! System API DTOs
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::MetricsSettings;

#[derive(Debug, Serialize)]
pub struct SystemStatusDto {
    pub name: &'static str,
    pub version: &'static str,
    pub started_at: DateTime<Utc>,
    pub uptime_secs: i64,
    pub clusters: usize,
    pub metrics: MetricsSettings,
}
