use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::AppConfig;

pub const APP_NAME: &str = "kube-console";

/// Initializes stdout + daily rolling file logging and returns the worker guard
/// that flushes the file writer on drop.
pub fn initialize(config: &AppConfig) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)?;

    let appender = tracing_appender::rolling::daily(&config.log_dir, format!("{APP_NAME}.log"));
    let (non_blocking_appender, guard) = tracing_appender::non_blocking(appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    let stdout_layer = fmt::layer()
        .with_target(true)
        .with_level(true);

    let file_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_thread_ids(true)
        .with_ansi(false)
        .with_writer(non_blocking_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

/// Our own crate logs at `level`, dependencies (kube, hyper, tower) at warn.
fn default_directives(level: &str) -> String {
    format!("warn,kube_console_core={level}")
}
