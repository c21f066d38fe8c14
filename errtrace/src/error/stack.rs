//! Call-stack capture and lazy symbolication

use std::borrow::Cow;
use std::ffi::c_void;
use std::path::{Path, PathBuf};

/// Maximum number of frames recorded per capture
pub const MAX_FRAMES: usize = 20;

/// Placeholder for names and paths the symbolizer could not recover
const UNKNOWN: &str = "??";

/// Trait impls through which closures are invoked
const CALL_SHIMS: &[&str] = &[
    " as core::ops::function::FnOnce",
    " as core::ops::function::FnMut",
    " as core::ops::function::Fn<",
];

/// Extra frames walked past the capture limit to find our own frame
#[cfg(feature = "full-backtrace")]
const SCAN_SLACK: usize = 16;

/// One resolved stack frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Demangled function name without the hash suffix
    pub function: Option<String>,
    /// Source file the frame belongs to
    pub file: Option<PathBuf>,
    /// Line within `file`
    pub line: Option<u32>,
}

impl Frame {
    /// Create a fully resolved frame
    pub fn new(function: impl Into<String>, file: impl Into<PathBuf>, line: u32) -> Self {
        Self {
            function: Some(function.into()),
            file: Some(file.into()),
            line: Some(line),
        }
    }

    /// A frame the symbolizer knows nothing about
    #[must_use]
    pub fn unresolved() -> Self {
        Self {
            function: None,
            file: None,
            line: None,
        }
    }

    /// Function name, or `??` when unresolved
    #[must_use]
    pub fn function_name(&self) -> &str {
        self.function.as_deref().unwrap_or(UNKNOWN)
    }

    /// Compact `dir/file:line` location using only the immediate parent directory
    #[must_use]
    pub fn location(&self) -> String {
        let line = self.line.unwrap_or(0);
        let Some(path) = self.file.as_deref() else {
            return format!("{UNKNOWN}/{UNKNOWN}:{line}");
        };

        let file = path
            .file_name()
            .map_or(Cow::Borrowed(UNKNOWN), |name| name.to_string_lossy());
        let dir = path
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();

        format!("{dir}/{file}:{line}")
    }

    /// Whether the frame is runtime plumbing rather than user code
    ///
    /// Unresolved frames count as noise. Prefixes are matched against the
    /// name with a leading `<` removed, so `<std::sys::..>::f` matches
    /// `std::sys::`. Closure call shims (`<F as FnOnce>::call_once`) are
    /// always noise.
    pub fn is_noise<S: AsRef<str>>(&self, prefixes: &[S]) -> bool {
        let Some(name) = self.function.as_deref() else {
            return true;
        };
        if CALL_SHIMS.iter().any(|shim| name.contains(shim)) {
            return true;
        }

        let bare = name.strip_prefix('<').unwrap_or(name);
        prefixes.iter().any(|p| bare.starts_with(p.as_ref()))
    }
}

/// Call stack recorded when an error was wrapped
///
/// Captured traces hold raw instruction pointers and are symbolicated only
/// when [`StackTrace::frames`] is iterated.
#[derive(Debug, Clone, Default)]
pub struct StackTrace {
    frames: Frames,
}

#[derive(Debug, Clone)]
enum Frames {
    Captured(Vec<usize>),
    Resolved(Vec<Frame>),
}

impl Default for Frames {
    fn default() -> Self {
        Self::Captured(Vec::new())
    }
}

impl StackTrace {
    /// Capture the current thread's stack
    ///
    /// Frames up to and including this function are dropped, then `skip`
    /// more. At most [`MAX_FRAMES`] are kept. An unwinder that yields
    /// nothing produces an empty trace.
    #[inline(never)]
    #[must_use]
    pub fn capture(skip: usize) -> Self {
        let marker = (Self::capture as fn(usize) -> Self) as usize;
        Self {
            frames: Frames::Captured(walk(marker, skip)),
        }
    }

    /// Build a trace from frames that are already resolved
    pub fn from_frames<I>(frames: I) -> Self
    where
        I: IntoIterator<Item = Frame>,
    {
        Self {
            frames: Frames::Resolved(frames.into_iter().collect()),
        }
    }

    /// Number of recorded entries
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.frames {
            Frames::Captured(ips) => ips.len(),
            Frames::Resolved(frames) => frames.len(),
        }
    }

    /// Whether nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw instruction pointers, empty for synthetic traces
    #[must_use]
    pub fn ips(&self) -> &[usize] {
        match &self.frames {
            Frames::Captured(ips) => ips,
            Frames::Resolved(_) => &[],
        }
    }

    /// Resolved frames in capture order, deepest call first
    ///
    /// Each pointer is resolved when the iterator reaches it. Inlined
    /// functions expand into several frames.
    pub fn frames(&self) -> Box<dyn Iterator<Item = Frame> + '_> {
        match &self.frames {
            Frames::Captured(ips) => Box::new(ips.iter().flat_map(|&ip| resolve(ip))),
            Frames::Resolved(frames) => Box::new(frames.iter().cloned()),
        }
    }
}

#[cfg(feature = "full-backtrace")]
fn walk(marker: usize, skip: usize) -> Vec<usize> {
    let limit = MAX_FRAMES + skip + SCAN_SLACK;
    let mut raw: Vec<(usize, usize)> = Vec::with_capacity(limit);

    backtrace::trace(|frame| {
        raw.push((frame.ip() as usize, frame.symbol_address() as usize));
        raw.len() < limit
    });

    // Without a symbol address for our own frame nothing can be skipped safely.
    let start = raw
        .iter()
        .position(|&(_, symbol)| symbol == marker)
        .map_or(0, |pos| pos + 1 + skip);

    raw.into_iter()
        .skip(start)
        .map(|(ip, _)| ip)
        .filter(|&ip| ip != 0)
        .take(MAX_FRAMES)
        .collect()
}

#[cfg(not(feature = "full-backtrace"))]
fn walk(_marker: usize, _skip: usize) -> Vec<usize> {
    Vec::new()
}

fn resolve(ip: usize) -> Vec<Frame> {
    let mut frames = Vec::new();

    // Return addresses point one past the call instruction.
    let addr = ip.saturating_sub(1) as *mut c_void;
    backtrace::resolve(addr, |symbol| {
        frames.push(Frame {
            function: symbol.name().map(|name| format!("{name:#}")),
            file: symbol.filename().map(Path::to_path_buf),
            line: symbol.lineno(),
        });
    });

    if frames.is_empty() {
        frames.push(Frame::unresolved());
    }
    frames
}
