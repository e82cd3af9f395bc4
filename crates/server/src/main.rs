use std::io::Write;

use anyhow::{Context, Result};
use chrono::Datelike;
use detector::Detector;
use tokio::signal;
use view::{EventView, MonotonicClock, ViewOptions, countdown_line};

mod config;

use config::OutputFormat;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env
    timetraveler_shared::bootstrap::init_env();

    // The guard must be kept alive for the duration of the program to ensure logs are flushed
    let _guard = timetraveler_shared::bootstrap::init_tracing("timetraveler");

    tracing::info!("Starting Time Traveler");

    let config = config::UnifiedConfig::from_env()?;
    tracing::info!("✓ Configuration loaded");

    let event = config
        .core
        .event_definition()
        .context("EVENT_START and EVENT_TIMEZONE must describe a single instant")?;
    let detector = Detector::from_config(&config.detector)?;
    let options = ViewOptions::from_config(&config.view, config.core.locale);

    let mut view = EventView::mount(event, detector, MonotonicClock::new(), options);

    let outcome = tokio::select! {
        result = present(&mut view, config.output) => result,
        _ = wait_for_shutdown() => {
            tracing::info!("📡 Shutdown signal received");
            Ok(())
        }
    };

    view.unmount().await;
    tracing::info!("✓ Stopped");

    outcome
}

/// Print the page once resolved, then follow the countdown until it ends
async fn present(view: &mut EventView, format: OutputFormat) -> Result<()> {
    let year = chrono::Local::now().year();
    let mut stdout = std::io::stdout();

    view.resolved().await;

    match format {
        OutputFormat::Text => writeln!(stdout, "{}\n", view.render_text(year))?,
        OutputFormat::Json => writeln!(stdout, "{}", view.render_json()?)?,
    }

    while view.countdown_handle().changed().await {
        match format {
            OutputFormat::Text => {
                let line = countdown_line(&view.countdown(), view.locale());
                write!(stdout, "\r{:<64}", line)?;
                stdout.flush()?;
            }
            OutputFormat::Json => writeln!(stdout, "{}", view.render_json()?)?,
        }
    }

    if format == OutputFormat::Text {
        writeln!(stdout)?;
    }

    tracing::info!("Countdown finished");
    Ok(())
}

async fn wait_for_shutdown() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
