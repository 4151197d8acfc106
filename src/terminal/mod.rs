// (C) 2025 - Enzo Lombardi

//! Terminal abstraction layer for paneled.
//!
//! The [`Backend`] trait covers the output side of a terminal session:
//! raw writes, size queries and the mode switches that bracket a session.
//! Two implementations ship with the crate:
//!
//! - [`TtyBackend`] - the process's controlling terminal (default)
//! - [`MemoryBackend`] - byte capture with a fixed reported size, for
//!   headless rendering and tests
//!
//! The escape sequences the framework speaks are collected here so the
//! wire protocol is visible in one place.

mod backend;
mod memory;
#[cfg(unix)]
mod tty;

pub use backend::Backend;
pub use memory::{CaptureHandle, MemoryBackend, SizeHandle};
#[cfg(unix)]
pub use tty::{query_winsize, TtyBackend};

/// Enter the alternate screen buffer.
pub const ALT_SCREEN_ON: &str = "\x1b[?1049h";
/// Leave the alternate screen buffer.
pub const ALT_SCREEN_OFF: &str = "\x1b[?1049l";
/// Hide the cursor.
pub const CURSOR_HIDE: &str = "\x1b[?25l";
/// Show the cursor.
pub const CURSOR_SHOW: &str = "\x1b[?25h";
/// Report all mouse motion, button and scroll activity.
pub const MOUSE_EVENTS_ON: &str = "\x1b[?1003h";
/// Stop mouse reporting.
pub const MOUSE_EVENTS_OFF: &str = "\x1b[?1003l";
/// Frame pasted text in `CSI 200~` / `CSI 201~`.
pub const PASTE_MODE_ON: &str = "\x1b[?2004h";
/// Stop bracketed paste framing.
pub const PASTE_MODE_OFF: &str = "\x1b[?2004l";
/// Erase the visible screen.
pub const CLEAR: &str = "\x1b[2J";
/// Reset all character attributes.
pub const RESET_STYLE: &str = "\x1b[0m";
