//! Heart Companion: heart-disease risk estimation in the terminal.
//!
//! Main entry point for the terminal application.

use anyhow::{Context, Result};
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use heart_companion::adapters::sanitize::SanitizingMakeWriter;
use heart_companion::config::ENV_PREFIX;
use heart_companion::tui::{App, AppContext};
use heart_companion::AppConfig;

const DEFAULT_LOG_FILE: &str = "heart_companion.log";

fn main() -> Result<()> {
    // Writing logs to the terminal corrupts the TUI (alternate screen).
    // - interactive TTY: log to a file
    // - non-interactive: log to stdout
    let log_mode = std::env::var(format!("{ENV_PREFIX}LOG_MODE"))
        .unwrap_or_else(|_| "auto".to_string());

    let interactive = std::io::stdout().is_terminal();
    let use_file = match log_mode.as_str() {
        "file" => true,
        "stdout" => false,
        // auto
        _ => interactive,
    };

    let (writer, _guard) = if use_file {
        let log_file = std::env::var(format!("{ENV_PREFIX}LOG_FILE"))
            .unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());

        if let Some(parent) = std::path::Path::new(&log_file).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory {parent:?}"))?;
            }
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .with_context(|| format!("Failed to open log file {log_file:?}"))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting Heart Companion...");

    let config = AppConfig::from_env().context("Invalid configuration")?;
    tracing::debug!("Configuration: {:?}", config);

    // Refuse to start without a usable model.
    let context = AppContext::from_config(&config)
        .with_context(|| format!("Failed to initialize from model {:?}", config.model_path))?;

    let mut app = App::new(context);
    app.run()?;

    tracing::info!("Heart Companion shutdown complete.");
    Ok(())
}
