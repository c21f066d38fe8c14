//! Rendering modes, options and the clock used for timestamps

use chrono::{Local, NaiveDateTime};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// How an error is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// The cause's message only
    Plain,
    /// The message as a double-quoted literal
    ///
    /// Escaping follows Rust's `{:?}` for strings, so a control byte is
    /// written as `\u{1}` rather than `\x01`.
    Quoted,
    /// Timestamp and message, optionally followed by stack frames
    Full,
}

/// Formatting knobs for [`RenderMode::Full`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// chrono `strftime` pattern for the leading timestamp
    pub timestamp_format: String,
    /// Spaces written before the separator space of each frame line
    pub indent: usize,
    /// Frames whose function starts with one of these are left out
    pub noise_prefixes: Vec<String>,
}

/// Runtime and unwinder internals that never point at user code
pub const DEFAULT_NOISE_PREFIXES: &[&str] = &[
    "std::rt::",
    "std::sys::",
    "std::panicking::",
    "std::panic::",
    "std::thread::",
    "core::panicking::",
    "core::panic::unwind_safe::",
    "core::ops::function::",
    "alloc::boxed::",
    "__rust_",
    "backtrace::",
    "__libc_start",
    "_start",
    "start_thread",
    "__clone",
    "clone3",
];

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            // width of the default timestamp
            indent: 19,
            noise_prefixes: DEFAULT_NOISE_PREFIXES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

static SHARED_DEFAULT: Lazy<RenderOptions> = Lazy::new(RenderOptions::default);

impl RenderOptions {
    /// Process-wide default options, built once
    #[must_use]
    pub fn shared() -> &'static RenderOptions {
        &SHARED_DEFAULT
    }
}

/// Source of the render-time timestamp
pub trait Clock {
    /// Current wall-clock time
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_defaults_are_built_once() {
        let first = RenderOptions::shared();
        let second = RenderOptions::shared();

        assert!(std::ptr::eq(first, second));
        assert_eq!(*first, RenderOptions::default());
    }
}
