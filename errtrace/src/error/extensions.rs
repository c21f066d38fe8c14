//! Extension traits for `Result` and `Option`

use super::stack::StackTrace;
use super::types::{BoxError, Error, Result};
use std::any::Any;

/// Decorate the error side of a `Result`
pub trait ResultExt<T> {
    /// Wrap the error and record the stack of the caller of `stack`
    ///
    /// # Errors
    ///
    /// Returns the original error wrapped in [`Error`].
    fn stack(self) -> Result<T>;

    /// Wrap the error and attach `payload`
    ///
    /// # Errors
    ///
    /// Returns the original error wrapped in [`Error`].
    fn attach<D>(self, payload: D) -> Result<T>
    where
        D: Any + Send + Sync;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<BoxError>,
{
    #[inline(never)]
    fn stack(self) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(cause) => Err(Error::with_trace(cause, StackTrace::capture(1))),
        }
    }

    fn attach<D>(self, payload: D) -> Result<T>
    where
        D: Any + Send + Sync,
    {
        self.map_err(|cause| Error::with_data(cause, payload))
    }
}

/// Turn a missing value into a stacked error
pub trait OptionExt<T> {
    /// `Some(v)` becomes `Ok(v)`; `None` becomes `cause` wrapped with the caller's stack
    ///
    /// # Errors
    ///
    /// Returns `cause` wrapped in [`Error`] when the option is `None`.
    fn ok_or_stack<E>(self, cause: E) -> Result<T>
    where
        E: Into<BoxError>;
}

impl<T> OptionExt<T> for Option<T> {
    #[inline(never)]
    fn ok_or_stack<E>(self, cause: E) -> Result<T>
    where
        E: Into<BoxError>,
    {
        match self {
            Some(value) => Ok(value),
            None => Err(Error::with_trace(cause, StackTrace::capture(1))),
        }
    }
}
