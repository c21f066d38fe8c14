//! Core error types and definitions

use super::stack::StackTrace;
use std::any::Any;
use std::sync::Arc;
use thiserror::Error;

/// Boxed cause accepted by every constructor
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Side-channel data attached to an error
pub type Payload = Box<dyn Any + Send + Sync + 'static>;

/// Error wrapper carrying a stack snapshot and optional attached data
///
/// The message is always the cause's own message. Cloning is cheap and
/// shares the same cause, trace and payload.
#[derive(Clone)]
pub struct Error {
    pub(super) inner: Arc<ErrorInner>,
}

pub(super) struct ErrorInner {
    /// The wrapped error
    pub cause: BoxError,
    /// Call stack recorded at construction, if any
    pub trace: Option<StackTrace>,
    /// Data attached at construction, if any
    pub payload: Option<Payload>,
}

/// Plain message error used for string causes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct Message(pub String);

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
