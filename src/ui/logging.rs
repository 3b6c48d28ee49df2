//! ui::logging
//!
//! Developer logging through `tracing`.
//!
//! Events go to stderr so they never mix with the progress lines on
//! stdout. The filter comes from `GQL_BOOTSTRAP_LOG` (EnvFilter syntax);
//! without it the level is `warn`, or `debug` for this crate under
//! `--debug`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::output::Verbosity;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "GQL_BOOTSTRAP_LOG";

/// Default filter directive for a verbosity level.
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Debug => "gql_bootstrap=debug,warn",
        Verbosity::Normal => "warn",
        Verbosity::Quiet => "error",
    }
}

/// Install the global subscriber.
///
/// A second call is a no-op, so tests may call it freely.
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}
