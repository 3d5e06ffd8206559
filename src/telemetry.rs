//! Opt-in `tracing` subscriber setup.
//!
//! Pipeline stages, dataset loading, recommendation fallbacks and library
//! writes only emit `tracing` events. Hosts that already install their own
//! subscriber never need this module.

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "TABVIZ_LOG";

/// Directive used when neither `TABVIZ_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a compact `fmt` subscriber filtered by `TABVIZ_LOG`, then
/// `RUST_LOG`, then [`DEFAULT_FILTER`].
///
/// Returns `false` without the `telemetry` feature or when a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
