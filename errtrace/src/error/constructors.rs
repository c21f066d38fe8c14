//! Error constructors and accessors

use super::stack::StackTrace;
use super::types::{BoxError, Error, ErrorInner, Message, Payload};
use std::any::Any;
use std::sync::Arc;

impl Error {
    fn from_parts(cause: BoxError, trace: Option<StackTrace>, payload: Option<Payload>) -> Self {
        Self {
            inner: Arc::new(ErrorInner {
                cause,
                trace,
                payload,
            }),
        }
    }

    /// Wrap `cause` and record the caller's stack
    ///
    /// Capture starts at the function calling this one. When the platform
    /// cannot unwind, the error simply carries no frames.
    #[inline(never)]
    #[must_use]
    pub fn with_stack<E>(cause: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::from_parts(cause.into(), Some(StackTrace::capture(1)), None)
    }

    /// Wrap `cause` and attach `payload` without recording a stack
    #[must_use]
    pub fn with_data<E, D>(cause: E, payload: D) -> Self
    where
        E: Into<BoxError>,
        D: Any + Send + Sync,
    {
        Self::from_parts(cause.into(), None, Some(Box::new(payload)))
    }

    /// Wrap `cause`, record the caller's stack and attach `payload`
    #[inline(never)]
    #[must_use]
    pub fn with_stack_and_data<E, D>(cause: E, payload: D) -> Self
    where
        E: Into<BoxError>,
        D: Any + Send + Sync,
    {
        Self::from_parts(
            cause.into(),
            Some(StackTrace::capture(1)),
            Some(Box::new(payload)),
        )
    }

    /// Wrap `cause` with an existing trace
    #[must_use]
    pub fn with_trace<E>(cause: E, trace: StackTrace) -> Self
    where
        E: Into<BoxError>,
    {
        Self::from_parts(cause.into(), Some(trace), None)
    }

    /// Wrap a plain message and record the caller's stack
    #[inline(never)]
    pub fn msg<S: Into<String>>(message: S) -> Self {
        Self::from_parts(
            Box::new(Message(message.into())),
            Some(StackTrace::capture(1)),
            None,
        )
    }

    /// The directly wrapped error
    #[must_use]
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.inner.cause
    }

    /// The innermost error of the causal chain
    #[must_use]
    pub fn root_cause(&self) -> &(dyn std::error::Error + 'static) {
        let mut current: &(dyn std::error::Error + 'static) = self.cause();
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }

    /// Stack recorded at construction, absent for the data path
    #[must_use]
    pub fn trace(&self) -> Option<&StackTrace> {
        self.inner.trace.as_ref()
    }

    /// Attached data, if any
    #[must_use]
    pub fn payload(&self) -> Option<&(dyn Any + Send + Sync)> {
        self.inner.payload.as_deref()
    }

    /// Attached data as `T`; `None` when absent or of another type
    #[must_use]
    pub fn data<T: Any>(&self) -> Option<&T> {
        self.payload()?.downcast_ref::<T>()
    }
}

/// Wrap `cause` and record the caller's stack
#[inline(never)]
#[must_use]
pub fn with_stack<E>(cause: E) -> Error
where
    E: Into<BoxError>,
{
    Error::from_parts(cause.into(), Some(StackTrace::capture(1)), None)
}

/// Wrap `cause` and attach `payload`
#[must_use]
pub fn with_data<E, D>(cause: E, payload: D) -> Error
where
    E: Into<BoxError>,
    D: Any + Send + Sync,
{
    Error::with_data(cause, payload)
}

/// Data attached to `err` as `T`
///
/// Only the outermost error is inspected: data attached to an [`Error`]
/// nested deeper in the chain is not found. Any other error type yields
/// `None`.
#[must_use]
pub fn unwrap_data<'a, T: Any>(err: &'a (dyn std::error::Error + 'static)) -> Option<&'a T> {
    err.downcast_ref::<Error>()?.data::<T>()
}

/// Untyped data attached to `err`, outermost error only
#[must_use]
pub fn unwrap_payload<'a>(
    err: &'a (dyn std::error::Error + 'static),
) -> Option<&'a (dyn Any + Send + Sync)> {
    err.downcast_ref::<Error>()?.payload()
}
