//! Logging setup and configuration

use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub struct LoggingGuard {
    pub _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Console layer for the operator, non-blocking hourly file layer for
/// forensics. Keep the returned guard alive for the process lifetime.
pub fn setup_logging() -> Result<Arc<LoggingGuard>> {
    std::fs::create_dir_all("output/logs")?;

    let file_appender = tracing_appender::rolling::hourly("output/logs", "arbibot.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_ansi(true)
                .with_level(true),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_thread_ids(false)
                .with_level(true)
                .with_ansi(false)
                .compact(),
        )
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse()?)
                .add_directive("hyper=warn".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    Ok(Arc::new(LoggingGuard { _guard: guard }))
}
