//! Console and rolling-file tracing output.
//!
//! The console honours `RUST_LOG`, falling back to the configured level. The
//! file layer writes `csv-studio.log` under the data directory's `logs/`
//! folder, rotated daily, at debug level.

use std::path::Path;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub fn init(default_level: &str, logs_dir: Option<&Path>) {
    let console_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match logs_dir.map(ensure_logs_dir) {
        Some(Ok(logs_dir)) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "csv-studio.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Some(Err(err)) => {
            eprintln!("Warning: could not initialize file logging: {err}");
            None
        }
        None => None,
    };

    if let Err(err) = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Warning: tracing already initialized: {err}");
    }
}

fn ensure_logs_dir(logs_dir: &Path) -> std::io::Result<&Path> {
    std::fs::create_dir_all(logs_dir)?;
    Ok(logs_dir)
}
