//! Tracing initialization: console and optional log file share one fmt layer.

use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Initializes the global tracing subscriber.
///
/// Uses the fmt layer's full format (level, target, span close events).
/// The filter comes from the RUST_LOG environment variable (e.g. info,
/// debug, trace); unset defaults to info. When `log_file_path` is given the
/// same output is additionally appended to that file via a Tee writer.
/// Note: load .env (e.g. dotenvy::dotenv()) before calling this, or RUST_LOG
/// set there will not take effect.
pub fn init_tracing(log_file_path: Option<&str>) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    let result = match log_file_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let file = Arc::new(file);

            use tracing_subscriber::fmt::writer::MakeWriterExt;
            let writer = io::stdout.and(file);

            Registry::default()
                .with(env_filter)
                .with(fmt_layer.with_writer(writer))
                .try_init()
        }
        None => Registry::default().with(env_filter).with(fmt_layer).try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}
