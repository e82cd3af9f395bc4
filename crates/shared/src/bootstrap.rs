use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize dotenvy
pub fn init_env() {
    dotenvy::dotenv().ok();
}

/// Whether `ENABLE_FILE_LOGGING` asks for a log file (default: off)
fn file_logging_enabled() -> bool {
    std::env::var("ENABLE_FILE_LOGGING")
        .map(|v| v.to_lowercase() != "false" && v != "0")
        .unwrap_or(false)
}

/// Initialize tracing with optional JSON file logging
///
/// Human-readable logs go to stderr so stdout stays free for the rendered
/// view. The returned guard must be kept alive for the duration of the
/// program to ensure file logs are flushed.
pub fn init_tracing(service_name: &str) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!(
        "info,{}=debug,view=debug,detector=debug,timetraveler_core=debug",
        service_name
    );

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    if file_logging_enabled() {
        let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
        let file_appender =
            tracing_appender::rolling::daily(&log_dir, format!("{}.log", service_name));
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking)
            .json();

        registry.with(file_layer).init();

        Some(guard)
    } else {
        registry.init();
        None
    }
}
