use std::env;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable selecting the log format (`pretty` or `json`).
pub const LOG_FORMAT_VAR: &str = "ARGTREE_LOG_FORMAT";

/// Initialize tracing for a program using argtree
///
/// Uses RUST_LOG environment variable if set, otherwise defaults to "warn" so
/// that only ambiguous arguments are reported. Supports both pretty console
/// output and JSON output based on ARGTREE_LOG_FORMAT. Logs go to stderr to
/// keep stdout free for program output.
///
/// # Errors
/// Returns error if a global tracing subscriber is already installed
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let format = env::var(LOG_FORMAT_VAR).unwrap_or_else(|_| "pretty".to_string());

    let registry = tracing_subscriber::registry().with(env_filter);

    match format.as_str() {
        "json" => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        _ => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}
