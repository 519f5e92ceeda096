use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global tracing subscriber. Filtering follows `RUST_LOG`.
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
