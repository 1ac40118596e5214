//! Logging setup for embedding applications

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber
///
/// Level comes from `RUST_LOG` when set, `info` otherwise. Call once at
/// app start; a second call is a silent no-op so tests and demos can
/// share it.
pub fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
