//! Macros for stacked error creation

/// Wrap an error with the stack at the macro call site
#[macro_export]
macro_rules! stack {
    ($cause:expr) => {
        $crate::error::with_stack($cause)
    };
}

/// Return early with a stacked error
#[macro_export]
macro_rules! bail {
    ($cause:expr) => {
        return ::std::result::Result::Err($crate::stack!($cause).into())
    };
}

/// Return early with a stacked error unless a condition holds
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $cause:expr) => {
        if !$cond {
            $crate::bail!($cause);
        }
    };
}
