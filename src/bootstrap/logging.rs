use tracing_subscriber::EnvFilter;

/// Filter variable checked first; `RUST_LOG` is the fallback
pub const LOG_ENV: &str = "DOCSTORE_LOG";

pub fn initialize() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries command output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
