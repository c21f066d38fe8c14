//! Error decoration with captured call stacks and side-channel data
//!
//! This crate wraps an existing error without changing its message and adds:
//! - A call-stack snapshot taken where the error was wrapped
//! - Optional arbitrary data attached to the error
//! - A timestamped rendering that can include a compact stack trace
//!
//! ```
//! use errtrace::{unwrap_data, with_data, with_stack, RenderMode};
//! use std::io;
//!
//! let err = with_stack(io::Error::new(io::ErrorKind::NotFound, "file not found"));
//! assert_eq!(err.to_string(), "file not found");
//! let _trace = err.render(RenderMode::Full, true);
//!
//! let tagged = with_data("request failed", 42_u32);
//! assert_eq!(unwrap_data::<u32>(&tagged), Some(&42));
//! ```

pub mod error;
#[doc(hidden)]
pub mod macros;

pub use error::*;
