use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive (e.g. `psa=debug`).
pub const LOG_ENV: &str = "PSA_LOG";

/// Install the stderr subscriber. `PSA_LOG` wins over the verbosity flag.
pub fn init(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
