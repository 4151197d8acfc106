// (C) 2025 - Enzo Lombardi

//! Error types for paneled operations.
//!
//! This module provides the main error types used throughout the library,
//! with proper backtrace support and context preservation. The event loop's
//! exit convention maps onto these kinds via [`PaneledError::exit_status`].

use std::backtrace::Backtrace;
use std::fmt::{Display, Formatter};

/// Exit status reported when the input queue overflowed.
pub const EXIT_QUEUE_FULL: i32 = 1;

/// Error type for paneled operations.
///
/// Wraps error kinds with backtrace support for debugging.
///
/// # Examples
///
/// ```rust,no_run
/// use paneled::core::error::Result;
///
/// fn init_session() -> Result<()> {
///     // Operations that can fail
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct PaneledError {
    kind: ErrorKind,
    backtrace: Backtrace,
}

/// The specific kind of error that occurred.
#[derive(Debug)]
pub(crate) enum ErrorKind {
    /// An OS read on standard input failed with an errno other than EINTR.
    Read { code: i32 },

    /// The input queue cannot accept more bytes.
    QueueFull,

    /// A byte invalidated the escape-sequence machine. The decoder
    /// recovers in place, so this kind never ends a session on its own.
    Parse(String),

    /// The user hit the exit keystroke.
    ExitRequested,

    /// I/O operation failed
    Io(std::io::Error),

    /// Terminal initialization failed
    TerminalInit(String),
}

impl PaneledError {
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a read error from an OS error code.
    pub(crate) fn read(code: i32) -> Self {
        Self::new(ErrorKind::Read { code })
    }

    /// Creates a queue-full error.
    pub(crate) fn queue_full() -> Self {
        Self::new(ErrorKind::QueueFull)
    }

    /// Creates a parse error.
    #[allow(dead_code)]
    pub(crate) fn parse(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse(msg.into()))
    }

    /// Creates an exit-requested marker.
    pub(crate) fn exit_requested() -> Self {
        Self::new(ErrorKind::ExitRequested)
    }

    /// Creates a terminal initialization error.
    #[allow(dead_code)]
    pub(crate) fn terminal_init(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::TerminalInit(msg.into()))
    }

    /// Returns `true` if this error is a failed OS read.
    pub fn is_read(&self) -> bool {
        matches!(self.kind, ErrorKind::Read { .. })
    }

    /// Returns `true` if this error is a queue overflow.
    pub fn is_queue_full(&self) -> bool {
        matches!(self.kind, ErrorKind::QueueFull)
    }

    /// Returns `true` if this error is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self.kind, ErrorKind::Parse(_))
    }

    /// Returns `true` if this error is the user's exit request.
    pub fn is_exit_requested(&self) -> bool {
        matches!(self.kind, ErrorKind::ExitRequested)
    }

    /// Returns `true` if this error is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self.kind, ErrorKind::Io(_))
    }

    /// Returns `true` if this error is a terminal initialization error.
    pub fn is_terminal_init(&self) -> bool {
        matches!(self.kind, ErrorKind::TerminalInit(_))
    }

    /// Maps the error onto the event loop's integer exit convention:
    /// `0` for a clean exit request, the OS error code for failed reads,
    /// [`EXIT_QUEUE_FULL`] for a fatal queue overflow.
    pub fn exit_status(&self) -> i32 {
        match &self.kind {
            ErrorKind::ExitRequested => 0,
            ErrorKind::Read { code } => *code,
            ErrorKind::QueueFull => EXIT_QUEUE_FULL,
            ErrorKind::Io(e) => e.raw_os_error().unwrap_or(EXIT_QUEUE_FULL + 1),
            _ => EXIT_QUEUE_FULL + 1,
        }
    }
}

impl Display for PaneledError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ErrorKind::Read { code } => write!(f, "read from stdin failed: errno {}", code)?,
            ErrorKind::QueueFull => write!(f, "input queue is full of unprocessed data")?,
            ErrorKind::Parse(msg) => write!(f, "Parse error: {}", msg)?,
            ErrorKind::ExitRequested => write!(f, "exit requested")?,
            ErrorKind::Io(e) => write!(f, "I/O error: {}", e)?,
            ErrorKind::TerminalInit(msg) => write!(f, "Terminal initialization failed: {}", msg)?,
        }

        // Include backtrace if captured
        if self.backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            write!(f, "\n\nBacktrace:\n{}", self.backtrace)?;
        }

        Ok(())
    }
}

impl std::error::Error for PaneledError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PaneledError {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorKind::Io(e))
    }
}

/// Result type for paneled operations.
///
/// This is a type alias for `Result<T, PaneledError>`.
pub type Result<T> = std::result::Result<T, PaneledError>;
