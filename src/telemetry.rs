//! Tracing initialization.
//!
//! Plain tracing-subscriber with an env filter and a fmt layer. The
//! scanner's own observable surface is its log/unlock event streams; an
//! export pipeline can be layered onto this registry if a deployment
//! needs one.

use crate::error::{Error, Result};

/// Initialize the global tracing subscriber.
///
/// `default_level` applies when `RUST_LOG` is unset. Errors if a
/// subscriber was already installed.
pub fn init_tracing(default_level: &str) -> Result<()> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| Error::Other(format!("failed to init tracing subscriber: {e}")))
}
