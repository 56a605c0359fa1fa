use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "JANA_LOG";

/// Installs the global subscriber. `JANA_LOG` wins over `RUST_LOG`, which wins
/// over `default_level`. Output goes to stderr so stdout stays reserved for
/// command output.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
