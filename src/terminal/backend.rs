// (C) 2025 - Enzo Lombardi

//! Backend trait for terminal output abstraction.
//!
//! This module defines the [`Backend`] trait that abstracts the output side
//! of a terminal: raw byte writes, flushing and size queries, plus the
//! mode switches (raw mode, alternate screen, mouse and paste reporting)
//! that bracket a session.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  Display                        │
//! │  (high-level: cell grids, diff rendering)       │
//! └─────────────────────┬───────────────────────────┘
//!                       │
//!                       ▼
//! ┌─────────────────────────────────────────────────┐
//! │              Backend Trait                      │
//! │  (low-level: raw writes, size, init/cleanup)    │
//! └────────┬────────────────────────────┬───────────┘
//!          │                            │
//!          ▼                            ▼
//! ┌─────────────────┐          ┌─────────────────┐
//! │   TtyBackend    │          │  MemoryBackend  │
//! │ (real terminal) │          │ (headless/test) │
//! └─────────────────┘          └─────────────────┘
//! ```
//!
//! Input never goes through the backend: the [`Input`](crate::input::Input)
//! machinery reads standard input directly, byte by byte.

use std::io;

/// The core abstraction for terminal output.
///
/// Backends are responsible for:
/// - Entering and leaving the terminal modes a session needs (raw mode,
///   alternate screen, mouse-event reporting, bracketed paste)
/// - Reporting terminal dimensions
/// - Writing raw output data (ANSI escape sequences and glyphs)
///
/// The [`Display`](crate::display::Display) struct handles the higher-level
/// concerns: double-buffered cell grids, differential updates and resize
/// bookkeeping.
pub trait Backend {
    /// Enter the modes a session needs.
    ///
    /// For a real terminal this means raw mode (no line buffering, no echo,
    /// no signal generation), the alternate screen buffer, a hidden cursor,
    /// mouse-event reporting and bracketed paste.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be configured.
    fn init(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Reverse all changes made by [`init`](Self::init).
    ///
    /// Cleanup failures are often non-fatal; the terminal may still be
    /// usable afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if restoration fails.
    fn cleanup(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Current terminal dimensions as `(columns, rows)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions cannot be queried.
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Write raw bytes to the terminal without any processing.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn write(&mut self, data: &[u8]) -> io::Result<()>;

    /// Flush any buffered output to the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&mut self) -> io::Result<()>;
}
