use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SCRIBE_LOG";

/// Installs the global fmt subscriber. `SCRIBE_LOG` wins over the configured
/// filter. Safe to call more than once.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .try_init();
}
