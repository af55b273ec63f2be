#![forbid(unsafe_code)]

//! Tracing subscriber setup.
//!
//! Library code only emits `tracing` events; hosts call [`init`] once at
//! startup. The filter is read from `SHOPFRONT_LOG` (same syntax as
//! `RUST_LOG`), falling back to the level passed in. With the
//! `tracing-json` feature, events are written as JSON lines.

use tracing_subscriber::EnvFilter;

use crate::error::LoggingError;

/// Environment variable holding the filter directives.
pub const LOG_ENV_VAR: &str = "SHOPFRONT_LOG";

/// Install the global fmt subscriber.
///
/// `default_directive` is used when `SHOPFRONT_LOG` is unset, e.g. `"info"`
/// or `"shopfront_cart=debug"`.
pub fn init(default_directive: &str) -> Result<(), LoggingError> {
    let filter = build_filter(std::env::var(LOG_ENV_VAR).ok().as_deref(), default_directive)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    #[cfg(feature = "tracing-json")]
    let result = builder.json().try_init();
    #[cfg(not(feature = "tracing-json"))]
    let result = builder.try_init();

    result.map_err(|_| LoggingError::AlreadyInstalled)
}

fn build_filter(from_env: Option<&str>, default_directive: &str) -> Result<EnvFilter, LoggingError> {
    let directives = from_env
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);
    Ok(EnvFilter::try_new(directives)?)
}
