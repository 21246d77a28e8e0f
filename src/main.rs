//! Cardiorisk: guided heart-attack risk intake.
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardiorisk::adapters::sanitize::SanitizingMakeWriter;
use cardiorisk::config::AppConfig;
use cardiorisk::tui::App;

fn main() -> Result<()> {
    let config = AppConfig::from_env();

    // Logging to the terminal would corrupt the TUI (alternate screen), so an
    // interactive session logs to a file unless told otherwise.
    let interactive = std::io::stdout().is_terminal();
    let (writer, _guard) = if config.log_mode.use_file(interactive) {
        if let Some(parent) = config.log_file.parent() {
            // Best-effort: don't fail startup just because the directory is missing.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!(
        "Starting Cardiorisk (locale={:?}, model={:?})",
        config.locale,
        config.model_path
    );

    let mut app = App::new(&config);
    app.run()?;

    tracing::info!("Cardiorisk shutdown complete.");
    Ok(())
}
