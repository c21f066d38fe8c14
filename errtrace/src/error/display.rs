//! Display, rendering and trait implementations for Error

use super::render::{Clock, RenderMode, RenderOptions, SystemClock};
use super::types::Error;
use std::fmt::{self, Write};

impl Error {
    /// Render with the system clock and default options
    #[must_use]
    pub fn render(&self, mode: RenderMode, with_detail: bool) -> String {
        self.render_with(mode, with_detail, RenderOptions::shared(), &SystemClock)
    }

    /// Render with explicit options and clock
    #[must_use]
    pub fn render_with(
        &self,
        mode: RenderMode,
        with_detail: bool,
        options: &RenderOptions,
        clock: &dyn Clock,
    ) -> String {
        let mut out = String::new();
        // Only a failing Display impl of the cause can stop the write; keep
        // whatever was written before it.
        let _ = self.write_rendered(&mut out, mode, with_detail, options, clock);
        out
    }

    /// Write the rendering into `out`
    ///
    /// `with_detail` only affects [`RenderMode::Full`], adding one line per
    /// retained stack frame after the timestamped message.
    pub fn write_rendered<W: Write + ?Sized>(
        &self,
        out: &mut W,
        mode: RenderMode,
        with_detail: bool,
        options: &RenderOptions,
        clock: &dyn Clock,
    ) -> fmt::Result {
        match mode {
            RenderMode::Plain => write!(out, "{}", self.cause()),
            RenderMode::Quoted => {
                let mut message = String::new();
                let written = write!(message, "{}", self.cause());
                write!(out, "{message:?}")?;
                written
            }
            RenderMode::Full => {
                writeln!(out, "{} {}", timestamp(options, clock), self.cause())?;
                if with_detail {
                    self.write_frames(out, options)?;
                }
                Ok(())
            }
        }
    }

    fn write_frames<W: Write + ?Sized>(&self, out: &mut W, options: &RenderOptions) -> fmt::Result {
        let Some(trace) = self.trace() else {
            return Ok(());
        };

        for frame in trace.frames() {
            if frame.is_noise(options.noise_prefixes.as_slice()) {
                continue;
            }
            writeln!(
                out,
                "{:indent$} {} ({})",
                "",
                frame.function_name(),
                frame.location(),
                indent = options.indent
            )?;
        }
        Ok(())
    }

    /// Iterate the causal chain, starting with this error
    #[must_use]
    pub fn chain(&self) -> Chain<'_> {
        Chain {
            next: Some(self as &(dyn std::error::Error + 'static)),
        }
    }
}

fn timestamp(options: &RenderOptions, clock: &dyn Clock) -> String {
    let now = clock.now();
    let mut stamp = String::new();
    if write!(stamp, "{}", now.format(&options.timestamp_format)).is_err() {
        stamp.clear();
        let fallback = &RenderOptions::shared().timestamp_format;
        let _ = write!(stamp, "{}", now.format(fallback));
    }
    stamp
}

/// Iterator over an error and its successive sources
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn std::error::Error + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn std::error::Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.cause(), f)
    }
}

/// `{:?}` renders [`RenderMode::Full`]; `{:#?}` adds the stack frames.
impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let with_detail = f.alternate();
        self.write_rendered(
            f,
            RenderMode::Full,
            with_detail,
            RenderOptions::shared(),
            &SystemClock,
        )
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.cause())
    }
}
