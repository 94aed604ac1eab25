//! Logging setup for the `panekit` binary.

use std::env;
use std::panic;

use tracing::{error, trace};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Our crate logs at debug, everything else at warn.
const DEFAULT_FILTER: &str = "warn,panekit=debug";

/// Builds the filter from [`DEFAULT_FILTER`] followed by anything in `RUST_LOG`,
/// so directives from the environment win.
pub fn filter() -> EnvFilter {
    let mut directives = DEFAULT_FILTER.to_owned();
    if let Ok(from_env) = env::var(EnvFilter::DEFAULT_ENV) {
        directives.push(',');
        directives.push_str(&from_env);
    }
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs a compact stderr subscriber and routes panic messages through it.
///
/// Calling this more than once leaves the first subscriber in place.
pub fn init_logging() {
    let layer = fmt::layer().compact().with_writer(std::io::stderr).with_line_number(true);
    if Registry::default().with(filter()).with(layer).try_init().is_err() {
        return;
    }

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        error!("{info}");
        default_hook(info);
    }));
    trace!("installed panic hook");
}
