//! Tracing initialization: stdout via the tracing_subscriber fmt layer, with an
//! optional log-file tee sharing the same format.

use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Initializes the global tracing subscriber.
/// Output goes to stdout; when `log_file_path` is given, the same stream is also
/// appended to that file. The log level comes from RUST_LOG (e.g. info, debug, trace);
/// defaults to info when unset. Load .env (e.g. dotenvy::dotenv()) before calling this,
/// or RUST_LOG from .env will not take effect.
pub fn init_tracing(log_file_path: Option<&str>) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = match log_file_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let file = Arc::new(file);
            use tracing_subscriber::fmt::writer::MakeWriterExt;
            tracing_subscriber::fmt::layer()
                .with_writer(io::stdout.and(file))
                .boxed()
        }
        None => tracing_subscriber::fmt::layer().with_writer(io::stdout).boxed(),
    };

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}
