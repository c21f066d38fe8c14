//! Error decoration with stack capture and attached data
//!
//! Provides:
//! - The [`Error`] wrapper and its two construction paths
//! - Lazily symbolicated stack traces
//! - Verb-style rendering with an injectable clock
//! - Extension traits and logging helpers

pub mod constructors;
pub mod display;
pub mod extensions;
pub mod logging;
pub mod render;
pub mod stack;
pub mod types;

pub use constructors::{unwrap_data, unwrap_payload, with_data, with_stack};
pub use display::Chain;
pub use extensions::{OptionExt, ResultExt};
pub use logging::ErrorLogger;
pub use render::{
    Clock, FixedClock, RenderMode, RenderOptions, SystemClock, DEFAULT_NOISE_PREFIXES,
};
pub use stack::{Frame, StackTrace, MAX_FRAMES};
pub use types::{BoxError, Error, Message, Payload, Result};
