// (C) 2025 - Enzo Lombardi

//! Double-buffered cell display with a differential renderer.
//!
//! Drawing operations write into the *active* grid only. Rendering an area
//! compares the active grid against the previously rendered one cell by
//! cell and emits output for changed cells alone: the cell's style sequence
//! (when non-empty), a cursor positioning sequence, the glyph, and a style
//! reset. After a render the buffers swap roles.
//!
//! A `SIGWINCH` handler stores into an atomic flag; the next render
//! re-queries the terminal size, invokes the registered resize hook with
//! the new dimensions and reprints every visited cell. The handler itself
//! does nothing but store the flag.

use crate::core::error::Result;
use crate::core::geometry::{Area, Position};
use crate::core::style::{BorderSet, Style};
use crate::layout::Alignment;
use crate::terminal::{Backend, CLEAR, RESET_STYLE};
use log::debug;
use std::io::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};

/// Number of cell grids held by a display.
pub const BUFFER_COUNT: usize = 2;

/// Set by the `SIGWINCH` handler, observed and cleared by the render path.
static RESIZE_DETECTED: AtomicBool = AtomicBool::new(false);

/// A single character cell: one code point plus its style.
///
/// Equality is byte equality of both fields; the diff renderer relies on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }

    pub fn blank() -> Self {
        Self::new(' ', Style::default())
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

/// Hook invoked from the render path when a window resize was observed.
/// Receives the new size; panel layouts are recalculated from it.
pub type ResizeHook = Box<dyn FnMut(Position)>;

/// The double-buffered display.
pub struct Display {
    buffers: [Vec<Cell>; BUFFER_COUNT],
    active: usize,
    size: Position,
    backend: Box<dyn Backend>,
    resize_hook: Option<ResizeHook>,
    resize_armed: bool,
}

impl Display {
    /// Initialize the backend and build both grids at the reported size.
    ///
    /// # Errors
    ///
    /// Returns an error if backend initialization or the size query fails.
    pub fn new(mut backend: Box<dyn Backend>) -> Result<Self> {
        backend.init()?;
        let (cols, rows) = backend.size()?;
        let cells = cols as usize * rows as usize;
        Ok(Self {
            buffers: [vec![Cell::blank(); cells], vec![Cell::blank(); cells]],
            active: 0,
            size: Position::new(cols, rows),
            backend,
            resize_hook: None,
            resize_armed: false,
        })
    }

    /// Restore the terminal. Also runs on drop; calling it explicitly
    /// surfaces errors.
    pub fn shutdown(&mut self) -> Result<()> {
        self.backend.cleanup()?;
        Ok(())
    }

    /// Cached terminal size, `x` columns by `y` rows.
    pub fn size(&self) -> Position {
        self.size
    }

    /// The whole screen as an area, invalid when either dimension is zero.
    pub fn bounds(&self) -> Area {
        if self.size.x == 0 || self.size.y == 0 {
            return Area::INVALID;
        }
        Area::from_coords(0, 0, self.size.x - 1, self.size.y - 1)
    }

    /// Register the resize hook and start observing `SIGWINCH`.
    ///
    /// The signal handler only raises a flag; `hook` runs on the render
    /// thread during the next [`render_area`](Self::render_area).
    pub fn set_resize_handler(&mut self, hook: ResizeHook) -> Result<()> {
        self.resize_hook = Some(hook);
        self.resize_armed = true;
        #[cfg(unix)]
        install_sigwinch_handler();
        self.refresh_size()?;
        self.backend.write(CLEAR.as_bytes())?;
        Ok(())
    }

    /// Raise the resize flag by hand, as the signal handler would.
    /// Useful for embedders without signal delivery and for tests.
    pub fn notify_resize() {
        RESIZE_DETECTED.store(true, Ordering::Relaxed);
    }

    fn index(&self, pos: Position) -> usize {
        pos.y as usize * self.size.x as usize + pos.x as usize
    }

    fn prev_index(&self) -> usize {
        (self.active + BUFFER_COUNT - 1) % BUFFER_COUNT
    }

    /// Write one code point into the active buffer. Writing outside the
    /// current size is a programming error.
    pub fn set_char(&mut self, pos: Position, ch: char) {
        assert!(
            pos.x < self.size.x && pos.y < self.size.y,
            "cell write at {} outside display {}",
            pos,
            self.size
        );
        let idx = self.index(pos);
        self.buffers[self.active][idx].ch = ch;
    }

    /// Write one style into the active buffer. Writing outside the current
    /// size is a programming error.
    pub fn set_style(&mut self, pos: Position, style: Style) {
        assert!(
            pos.x < self.size.x && pos.y < self.size.y,
            "style write at {} outside display {}",
            pos,
            self.size
        );
        let idx = self.index(pos);
        self.buffers[self.active][idx].style = style;
    }

    /// Fill an area with blanks in the default style, clipped to the
    /// display size.
    pub fn clear_area(&mut self, area: Area) {
        if !area.is_valid() || self.size.x == 0 || self.size.y == 0 {
            return;
        }
        for y in area.first.y..=area.second.y.min(self.size.y.saturating_sub(1)) {
            for x in area.first.x..=area.second.x.min(self.size.x.saturating_sub(1)) {
                let idx = self.index(Position::new(x, y));
                self.buffers[self.active][idx] = Cell::blank();
            }
        }
    }

    /// Clear the whole active grid.
    pub fn clear(&mut self) {
        self.clear_area(self.bounds());
    }

    /// Emit a terminal clear, bypassing the buffers.
    pub fn erase(&mut self) -> Result<()> {
        self.backend.write(CLEAR.as_bytes())?;
        self.backend.flush()?;
        Ok(())
    }

    /// Fill an area with spaces in the given style.
    pub fn fill_area(&mut self, style: &Style, area: Area) {
        if !area.is_valid() {
            return;
        }
        for y in area.first.y..=area.second.y {
            for x in area.first.x..=area.second.x {
                let pos = Position::new(x, y);
                self.set_style(pos, style.clone());
                self.set_char(pos, ' ');
            }
        }
    }

    /// Draw a border along the edge cells of an area.
    pub fn draw_border(&mut self, style: &Style, border: &BorderSet, area: Area) {
        if !area.is_valid() {
            return;
        }
        for y in area.first.y..=area.second.y {
            for x in area.first.x..=area.second.x {
                let pos = Position::new(x, y);
                let ch = if x == area.first.x && y == area.first.y {
                    border.top_left
                } else if x == area.second.x && y == area.first.y {
                    border.top_right
                } else if x == area.second.x && y == area.second.y {
                    border.bot_right
                } else if x == area.first.x && y == area.second.y {
                    border.bot_left
                } else if x == area.first.x || x == area.second.x {
                    border.vertical
                } else if y == area.first.y || y == area.second.y {
                    border.horizontal
                } else {
                    continue;
                };
                self.set_style(pos, style.clone());
                self.set_char(pos, ch);
            }
        }
    }

    /// Draw a string left to right starting at `pos`.
    pub fn draw_string(&mut self, s: &str, pos: Position, style: &Style) {
        let mut x = pos.x;
        for ch in s.chars() {
            let p = Position::new(x, pos.y);
            self.set_char(p, ch);
            self.set_style(p, style.clone());
            x += 1;
        }
    }

    /// Draw a string centred in an area, truncated when it does not fit.
    pub fn draw_string_centered(&mut self, s: &str, area: Area, style: &Style) {
        if !area.is_valid() {
            return;
        }
        let hmax = (area.second.x - area.first.x) as usize;
        let len = s.chars().count();
        let y = (area.first.y + area.second.y) / 2;
        let (x, take) = if hmax <= len {
            (area.first.x, hmax)
        } else {
            (area.first.x + ((hmax - len) / 2) as u16, len)
        };
        let truncated: String = s.chars().take(take).collect();
        self.draw_string(&truncated, Position::new(x, y), style);
    }

    /// Draw a string aligned inside an area. Overlong strings are
    /// truncated, keeping the head for left alignment and the tail
    /// otherwise.
    pub fn draw_string_aligned(&mut self, s: &str, area: Area, style: &Style, align: Alignment) {
        if !area.is_valid() {
            return;
        }
        let hmax = (area.second.x - area.first.x) as usize;
        let vmax = area.second.y - area.first.y;
        let chars: Vec<char> = s.chars().collect();
        let mut len = chars.len();
        let mut skip = 0;
        let mut pos = Position::zero();

        let center_h = |len: usize, skip: &mut usize| -> (u16, usize) {
            if len <= hmax {
                (area.first.x + ((hmax - len) / 2) as u16, len)
            } else {
                *skip = len - hmax;
                (area.first.x, hmax)
            }
        };

        if align.is_empty() || align == Alignment::CENTER {
            pos.y = area.first.y + vmax / 2;
            let (x, l) = center_h(len, &mut skip);
            pos.x = x;
            len = l;
        } else if align == Alignment::TOP | Alignment::H_CENTER {
            pos.y = area.first.y;
            let (x, l) = center_h(len, &mut skip);
            pos.x = x;
            len = l;
        } else if align == Alignment::BOTTOM | Alignment::H_CENTER {
            pos.y = area.second.y;
            let (x, l) = center_h(len, &mut skip);
            pos.x = x;
            len = l;
        } else if align == Alignment::LEFT | Alignment::V_CENTER {
            pos.y = area.first.y + vmax / 2;
            pos.x = area.first.x;
            len = len.min(hmax);
        } else if align == Alignment::RIGHT | Alignment::V_CENTER {
            pos.y = area.first.y + vmax / 2;
            pos.x = area.first.x;
            if len > hmax {
                skip = len - hmax;
                len = hmax;
            } else {
                pos.x += (hmax - len) as u16 + 1;
            }
        } else {
            if align.contains(Alignment::TOP) {
                pos.y = area.first.y;
            }
            if align.contains(Alignment::BOTTOM) {
                pos.y = area.second.y;
            }
            if align.contains(Alignment::LEFT) {
                pos.x = area.first.x;
                len = len.min(hmax);
            }
            if align.contains(Alignment::RIGHT) {
                pos.x = area.first.x;
                if len > hmax {
                    skip = len - hmax;
                    len = hmax;
                } else {
                    pos.x += (hmax - len) as u16 + 1;
                }
            }
        }

        let visible: String = chars.into_iter().skip(skip).take(len).collect();
        self.draw_string(&visible, pos, style);
    }

    /// Render the whole screen differentially.
    pub fn render(&mut self) -> Result<()> {
        let area = self.bounds();
        self.render_area(area)
    }

    /// Render an area: emit every cell that differs from the previously
    /// rendered frame, then swap buffers. A pending window resize is
    /// observed here first - the size is re-queried, the resize hook runs,
    /// and every visited cell is reprinted.
    pub fn render_area(&mut self, area: Area) -> Result<()> {
        let mut force = false;
        if self.resize_armed && RESIZE_DETECTED.swap(false, Ordering::Relaxed) {
            self.refresh_size()?;
            debug!("resize observed, new size {}", self.size);
            let new_size = self.size;
            if let Some(hook) = self.resize_hook.as_mut() {
                hook(new_size);
            }
            force = true;
        }

        if !area.is_valid() || self.size.x == 0 || self.size.y == 0 {
            return Ok(());
        }

        let mut out: Vec<u8> = Vec::new();
        let prev = self.prev_index();
        for y in area.first.y..=area.second.y.min(self.size.y - 1) {
            for x in area.first.x..=area.second.x.min(self.size.x - 1) {
                let idx = self.index(Position::new(x, y));
                let cell = &self.buffers[self.active][idx];
                if force || *cell != self.buffers[prev][idx] {
                    if !cell.style.is_empty() {
                        out.extend_from_slice(cell.style.seq().as_bytes());
                    }
                    write!(out, "\x1b[{};{}H", y + 1, x + 1).map_err(std::io::Error::from)?;
                    let mut utf8 = [0u8; 4];
                    out.extend_from_slice(cell.ch.encode_utf8(&mut utf8).as_bytes());
                    out.extend_from_slice(RESET_STYLE.as_bytes());
                }
            }
        }

        if !out.is_empty() {
            self.backend.write(&out)?;
        }
        self.backend.flush()?;
        self.active = (self.active + 1) % BUFFER_COUNT;
        Ok(())
    }

    /// Re-query the terminal size; on change both grids are rebuilt blank.
    fn refresh_size(&mut self) -> Result<()> {
        let (cols, rows) = self.backend.size()?;
        let new_size = Position::new(cols, rows);
        if new_size != self.size {
            let cells = cols as usize * rows as usize;
            self.buffers = [vec![Cell::blank(); cells], vec![Cell::blank(); cells]];
            self.size = new_size;
        }
        Ok(())
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

#[cfg(unix)]
extern "C" fn handle_sigwinch(_: libc::c_int) {
    // Nothing but the flag store: no allocation, no locks.
    RESIZE_DETECTED.store(true, Ordering::Relaxed);
}

#[cfg(unix)]
fn install_sigwinch_handler() {
    use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
    let action = SigAction::new(
        SigHandler::Handler(handle_sigwinch),
        SaFlags::empty(),
        SigSet::empty(),
    );
    // SAFETY: the handler is async-signal-safe, see above.
    unsafe {
        let _ = sigaction(Signal::SIGWINCH, &action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::MemoryBackend;

    fn test_display(cols: u16, rows: u16) -> (Display, crate::terminal::CaptureHandle) {
        let backend = MemoryBackend::new(cols, rows);
        let captured = backend.capture();
        let display = Display::new(Box::new(backend)).unwrap();
        (display, captured)
    }

    fn draw_frame(display: &mut Display) {
        display.clear();
        display.draw_string("hi", Position::new(1, 1), &Style::default());
    }

    #[test]
    fn test_identical_frames_emit_nothing() {
        let (mut display, captured) = test_display(10, 4);
        draw_frame(&mut display);
        display.render().unwrap();
        assert!(!captured.borrow().is_empty());

        captured.borrow_mut().clear();
        draw_frame(&mut display);
        display.render().unwrap();
        assert!(captured.borrow().is_empty());
    }

    #[test]
    fn test_clearing_emits_only_cleared_cells() {
        let (mut display, captured) = test_display(10, 4);
        draw_frame(&mut display);
        display.render().unwrap();

        captured.borrow_mut().clear();
        display.clear();
        display.render().unwrap();
        let out = String::from_utf8(captured.borrow().clone()).unwrap();
        // Only the two cells of "hi" changed back to blanks.
        assert_eq!(out.matches("\x1b[2;2H").count(), 1);
        assert_eq!(out.matches("\x1b[2;3H").count(), 1);
        assert_eq!(out.matches('\u{1b}').count(), 4); // 2 x (position + reset)
    }

    #[test]
    fn test_style_emitted_before_cursor_and_reset_after() {
        let (mut display, captured) = test_display(4, 2);
        display.clear();
        display.set_char(Position::new(0, 0), 'x');
        display.set_style(Position::new(0, 0), Style::new("\x1b[31m"));
        display.render().unwrap();
        let out = String::from_utf8(captured.borrow().clone()).unwrap();
        assert!(out.contains("\x1b[31m\x1b[1;1Hx\x1b[0m"));
    }

    #[test]
    fn test_cursor_positions_are_one_based() {
        let (mut display, captured) = test_display(4, 2);
        display.clear();
        display.set_char(Position::new(2, 1), 'z');
        display.render().unwrap();
        let out = String::from_utf8(captured.borrow().clone()).unwrap();
        assert!(out.contains("\x1b[2;3Hz"));
    }

    #[test]
    fn test_border_glyphs() {
        let (mut display, _) = test_display(6, 4);
        display.draw_border(
            &Style::default(),
            &BorderSet::ROUNDED,
            Area::from_coords(0, 0, 5, 3),
        );
        let idx = |x: u16, y: u16| display.index(Position::new(x, y));
        assert_eq!(display.buffers[0][idx(0, 0)].ch, '╭');
        assert_eq!(display.buffers[0][idx(5, 0)].ch, '╮');
        assert_eq!(display.buffers[0][idx(5, 3)].ch, '╯');
        assert_eq!(display.buffers[0][idx(0, 3)].ch, '╰');
        assert_eq!(display.buffers[0][idx(0, 1)].ch, '│');
        assert_eq!(display.buffers[0][idx(3, 0)].ch, '─');
    }

    #[test]
    fn test_zero_sized_display_renders_nothing() {
        let (mut display, captured) = test_display(0, 0);
        assert!(!display.bounds().is_valid());
        display.render().unwrap();
        assert!(captured.borrow().is_empty());
    }

    #[test]
    #[should_panic(expected = "outside display")]
    fn test_out_of_range_write_asserts() {
        let (mut display, _) = test_display(4, 2);
        display.set_char(Position::new(4, 0), 'x');
    }
}
