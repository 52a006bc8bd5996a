use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Installs the global fmt subscriber.
///
/// The filter comes from `log_filter`, then `RUST_LOG`, then `info`. Calling
/// this again after a subscriber is installed is a no-op, since hosts may
/// create several runtimes in one process.
pub fn init_tracing(log_filter: Option<&str>) {
    let filter = match log_filter {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|error| {
            eprintln!("invalid log filter {directives:?}: {error}");
            EnvFilter::new(DEFAULT_FILTER)
        }),
        None => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("tracing initialized");
    }
}
