// (C) 2025 - Enzo Lombardi

//! Real-terminal backend: raw mode, alternate screen, mouse and paste
//! reporting over standard output, window size via `TIOCGWINSZ`.

use super::backend::Backend;
use super::{
    ALT_SCREEN_OFF, ALT_SCREEN_ON, CURSOR_HIDE, CURSOR_SHOW, MOUSE_EVENTS_OFF, MOUSE_EVENTS_ON,
    PASTE_MODE_OFF, PASTE_MODE_ON,
};
use nix::sys::termios::{self, LocalFlags, SetArg, SpecialCharacterIndices, Termios};
use std::io::{self, Write};

/// Backend driving the process's controlling terminal.
///
/// `init` switches standard input to raw mode (canonical processing, echo
/// and signal generation off, one-byte reads with no timeout) and turns on
/// the alternate screen, mouse-event reporting and bracketed paste. Every
/// switch is undone by `cleanup`, which also runs on drop so a panicking
/// session still hands back a usable terminal.
pub struct TtyBackend {
    out: io::Stdout,
    saved: Option<Termios>,
}

impl TtyBackend {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            saved: None,
        }
    }

    fn enter_raw_mode(&mut self) -> io::Result<()> {
        let attr = termios::tcgetattr(libc::STDIN_FILENO).map_err(into_io)?;
        self.saved = Some(attr.clone());

        let mut raw = attr;
        // One byte at a time, no read timeout.
        raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
        raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
        raw.local_flags
            .remove(LocalFlags::ICANON | LocalFlags::ECHO | LocalFlags::ISIG);
        termios::tcsetattr(libc::STDIN_FILENO, SetArg::TCSANOW, &raw).map_err(into_io)
    }

    fn leave_raw_mode(&mut self) -> io::Result<()> {
        if let Some(saved) = self.saved.take() {
            termios::tcsetattr(libc::STDIN_FILENO, SetArg::TCSANOW, &saved).map_err(into_io)?;
        }
        Ok(())
    }
}

impl Default for TtyBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for TtyBackend {
    fn init(&mut self) -> io::Result<()> {
        self.enter_raw_mode()?;
        self.out.write_all(ALT_SCREEN_ON.as_bytes())?;
        self.out.write_all(CURSOR_HIDE.as_bytes())?;
        self.out.write_all(MOUSE_EVENTS_ON.as_bytes())?;
        self.out.write_all(PASTE_MODE_ON.as_bytes())?;
        self.out.flush()
    }

    fn cleanup(&mut self) -> io::Result<()> {
        self.out.write_all(PASTE_MODE_OFF.as_bytes())?;
        self.out.write_all(MOUSE_EVENTS_OFF.as_bytes())?;
        self.out.write_all(CURSOR_SHOW.as_bytes())?;
        self.out.write_all(ALT_SCREEN_OFF.as_bytes())?;
        self.out.flush()?;
        self.leave_raw_mode()
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        query_winsize()
    }

    fn write(&mut self, data: &[u8]) -> io::Result<()> {
        self.out.write_all(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl Drop for TtyBackend {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Ask the kernel for the terminal size in cells, `(columns, rows)`.
pub fn query_winsize() -> io::Result<(u16, u16)> {
    let mut ws = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    // SAFETY: TIOCGWINSZ only writes into the winsize out-parameter.
    let rc = unsafe { libc::ioctl(libc::STDIN_FILENO, libc::TIOCGWINSZ, &mut ws) };
    if rc == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok((ws.ws_col, ws.ws_row))
}

fn into_io(err: nix::errno::Errno) -> io::Error {
    io::Error::from_raw_os_error(err as i32)
}
