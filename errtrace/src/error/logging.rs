//! Logging helpers for decorated errors
//!
//! Built on the `log` facade with `env_logger` as the default backend.
//! Constructors and rendering never log; these helpers are the only place
//! the crate emits records.

use super::render::{RenderMode, RenderOptions, SystemClock};
use super::types::Error;
use log::{debug, error};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Reports decorated errors through the `log` facade
pub struct ErrorLogger;

impl ErrorLogger {
    /// Initialize `env_logger` once at application startup
    ///
    /// Levels come from `RUST_LOG`, e.g. `RUST_LOG=errtrace=debug`.
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; later calls are no-ops.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log `err` at error level with its timestamp and stack frames
    pub fn log_error(err: &Error) {
        let rendered = err.render_with(
            RenderMode::Full,
            true,
            RenderOptions::shared(),
            &SystemClock,
        );
        error!("{}", rendered.trim_end());
    }

    /// Log every link of a causal chain at debug level, outermost first
    pub fn log_chain(err: &(dyn std::error::Error + 'static)) {
        let mut depth = 0usize;
        let mut current = Some(err);
        while let Some(link) = current {
            if depth == 0 {
                debug!("Error: {link}");
            } else {
                debug!("  Caused by ({depth}): {link}");
            }
            depth += 1;
            current = link.source();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_helpers_do_not_panic() {
        ErrorLogger::init_test();

        let err = Error::with_stack(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        ErrorLogger::log_error(&err);
        ErrorLogger::log_chain(&err);
    }
}
