//! Logging setup
//!
//! Console output goes to stderr so stdout stays machine-readable. Filter it
//! with RUST_LOG (default `warn`):
//! - `RUST_LOG=vimkeys::keymap::driver=trace` - every keystroke
//! - `RUST_LOG=vimkeys::keymap::resolver=debug` - resolution steps
//!
//! A debug-level copy goes to `<config dir>/logs/vimkeys.log`, rotated daily.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global subscriber
///
/// Keep the returned guard alive until exit; dropping it flushes the log
/// file. `None` means file logging could not be set up.
pub fn init() -> Option<WorkerGuard> {
    let console_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        );

    let (file_layer, guard) = match crate::config_paths::ensure_logs_dir() {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "vimkeys.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_line_number(true)
                .with_filter(EnvFilter::new("vimkeys=debug"));
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("Warning: file logging disabled: {}", e);
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}
