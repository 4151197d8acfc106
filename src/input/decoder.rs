// (C) 2025 - Enzo Lombardi

//! Escape-sequence decoder.
//!
//! A byte-at-a-time state machine over the raw input stream. Recognised
//! sequences dispatch exactly one hook call each; a byte that invalidates
//! a sequence logs a warning, resets the machine to ground and the session
//! continues. The machine deliberately tracks the specific sequences real
//! terminals send rather than the full CSI grammar:
//!
//! - plain bytes and `0x7f` in ground state
//! - `ESC <byte>` as the Alt chord, `ESC ESC` as a literal escape
//! - `CSI A/B/C/D/F/H` navigation, `CSI 1;<mod><sel>` modified navigation
//!   and F1-F4, `SS3 P..S` plain F1-F4
//! - `CSI 2~` insert, `CSI 3[;<mod>]~` delete, `CSI 5/6[;<mod>]~` page keys
//! - `CSI 15/17/18/19/20/21/23/24[;<mod>]~` for F5-F12
//! - `CSI M <flags> <col> <row>` X10 mouse reports
//! - `CSI 200~ ... CSI 201~` bracketed paste, body accumulated
//!
//! Mouse reports are folded into higher-level press / drag / release /
//! hover / scroll events by comparing each report against the previous one.
//!
//! A bare `ESC` is indistinguishable from the start of a sequence until
//! more bytes arrive; the 10 ms poll timeout (see
//! [`ESC_TIMEOUT_MS`](super::ESC_TIMEOUT_MS)) is the sole tie-breaker:
//! when it expires right after an escape, the escape was a keypress.

use super::event::{
    is_control_byte, map_ascii, map_fk, map_nav, KeyCode, KeystrokeEvent, Modifiers, MouseButton,
    MouseEvent, MouseMotion,
};
use crate::core::geometry::Position;
use log::{trace, warn};

/// Scratch capacity for in-flight sequence bytes.
pub const EVENT_BUF_SIZE: usize = 8;

/// Coordinate bias of X10 mouse report bytes.
const MOUSE_OFFSET: u8 = 0x20;

/// Event sinks the decoder dispatches into. Every operation has a no-op
/// default so a consumer implements only what it routes.
pub trait EventHooks {
    fn on_hover(&mut self, _hover: &MouseEvent) {}
    fn on_press(&mut self, _press: &MouseEvent) {}
    fn on_release(&mut self, _release: &MouseEvent) {}
    fn on_drag_begin(&mut self, _begin: &MouseEvent) {}
    fn on_drag(&mut self, _begin: &MouseEvent, _moved: &MouseEvent) {}
    fn on_drag_end(&mut self, _begin: &MouseEvent, _end: &MouseEvent) {}
    fn on_scroll(&mut self, _scroll: &MouseEvent) {}
    fn on_keystroke(&mut self, _keystroke: &KeystrokeEvent) {}
    fn on_paste(&mut self, _text: &[u8]) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing in flight.
    Ground,
    /// Consumed `ESC`.
    Escape,
    /// Consumed `ESC [`.
    Csi,
    /// Mouse report: awaiting the flags byte.
    MouseFlags,
    /// Mouse report: awaiting the column byte.
    MouseColumn,
    /// Mouse report: awaiting the row byte.
    MouseRow,
    /// Consumed `CSI 2`.
    CsiDigit2,
    /// Consumed `CSI 20`.
    PasteOpen20,
    /// Consumed `CSI 200`.
    PasteOpen200,
    /// Inside a bracketed paste, accumulating the body.
    PasteBody,
    /// Paste body hit `ESC`.
    PasteEsc,
    /// Paste body hit `ESC [`.
    PasteCsi,
    /// Closing frame: consumed `CSI 2`.
    PasteClose2,
    /// Closing frame: consumed `CSI 20`.
    PasteClose20,
    /// Closing frame: consumed `CSI 201`.
    PasteClose201,
    /// Consumed `CSI 1`.
    CsiDigit1,
    /// Consumed `CSI 1;` - next byte is the modifier.
    ArrowModifier,
    /// Consumed `CSI 1;<mod>` - next byte selects navigation or F1-F4.
    ArrowFinal,
    /// Page key seen - awaiting `~` or `;`.
    PageTilde,
    /// Page key modifier byte.
    PageModifier,
    /// Page key awaiting the closing `~` after a modifier.
    PageFinalTilde,
    /// Delete or an F-key seen - awaiting `~` or `;`.
    SpecialTilde,
    /// Delete/F-key modifier byte; returns to `SpecialTilde` for the `~`.
    SpecialModifier,
    /// Consumed `ESC O`.
    Ss3,
}

#[derive(Default)]
struct MouseTracker {
    prev: MouseEvent,
    last: MouseEvent,
    pressed: MouseEvent,
    drag: bool,
}

/// The decoder proper. One instance per input session.
pub struct InputDecoder {
    state: State,
    escape_pressed: bool,
    event_buf: [u8; EVENT_BUF_SIZE],
    pending: KeystrokeEvent,
    mouse: MouseTracker,
    paste: Vec<u8>,
}

impl InputDecoder {
    pub fn new() -> Self {
        Self {
            state: State::Ground,
            escape_pressed: false,
            event_buf: [0; EVENT_BUF_SIZE],
            pending: KeystrokeEvent::new(KeyCode::Esc, Modifiers::empty(), 0),
            mouse: MouseTracker::default(),
            paste: Vec::new(),
        }
    }

    /// The last decoded mouse state, for overlays and debugging.
    pub fn last_mouse(&self) -> &MouseEvent {
        &self.mouse.last
    }

    /// The readiness wait expired with nothing to read. If the last byte
    /// consumed was a lone `ESC`, it was a keypress, not a sequence prefix.
    pub fn on_timeout(&mut self, hooks: &mut dyn EventHooks) {
        if self.escape_pressed && self.pending.stroke == 0x1b {
            self.state = State::Ground;
            self.pending.code = KeyCode::Esc;
            self.emit(hooks);
        }
        self.escape_pressed = false;
    }

    /// Advance the machine by one byte, dispatching any event the byte
    /// completes.
    pub fn feed(&mut self, byte: u8, hooks: &mut dyn EventHooks) {
        self.pending.stroke = byte;

        match self.state {
            State::Ground => {
                self.pending.modifier = Modifiers::empty();
                match byte {
                    0x1b => {
                        self.state = State::Escape;
                        self.escape_pressed = true;
                    }
                    0x7f => {
                        self.pending.code = KeyCode::Backspace;
                        self.emit(hooks);
                    }
                    _ => self.keystroke(byte, Modifiers::empty(), hooks),
                }
            }

            State::Escape => match byte {
                0x1b => {
                    self.state = State::Ground;
                    self.escape_pressed = false;
                    self.pending.code = KeyCode::Esc;
                    self.emit(hooks);
                }
                b'[' => self.state = State::Csi,
                b'O' => self.state = State::Ss3,
                _ => {
                    self.state = State::Ground;
                    self.keystroke(byte, Modifiers::ALT, hooks);
                }
            },

            State::Csi => match byte {
                b'0' => self.state = State::Ground,
                b'1' => self.state = State::CsiDigit1,
                b'2' => self.state = State::CsiDigit2,
                b'3' => {
                    self.pending.code = KeyCode::Delete;
                    self.state = State::SpecialTilde;
                }
                b'5' | b'6' => {
                    // map_nav covers both page keys.
                    self.pending.code = map_nav(byte).unwrap_or(KeyCode::PageUp);
                    self.state = State::PageTilde;
                }
                b'M' => self.state = State::MouseFlags,
                b'A' | b'B' | b'C' | b'D' | b'F' | b'H' => match map_nav(byte) {
                    Some(code) => {
                        self.pending.code = code;
                        self.state = State::Ground;
                        self.emit(hooks);
                    }
                    None => self.parse_error(byte),
                },
                _ => {
                    self.state = State::Ground;
                    if let Some((code, _)) = map_ascii(byte) {
                        self.pending.code = code;
                        self.emit(hooks);
                    } else {
                        self.parse_error(byte);
                    }
                }
            },

            State::MouseFlags => {
                self.event_buf[0] = byte;
                self.state = State::MouseColumn;
            }
            State::MouseColumn => {
                self.event_buf[1] = byte;
                self.state = State::MouseRow;
            }
            State::MouseRow => {
                self.event_buf[2] = byte;
                self.state = State::Ground;
                self.handle_mouse(hooks);
            }

            State::CsiDigit2 => match byte {
                b'0' => self.state = State::PasteOpen20,
                b'1' | b'3' | b'4' => match map_fk(byte) {
                    Some(code) => {
                        self.pending.code = code;
                        self.state = State::SpecialTilde;
                    }
                    None => self.parse_error(byte),
                },
                b'~' => {
                    self.pending.code = KeyCode::Insert;
                    self.state = State::Ground;
                    self.emit(hooks);
                }
                _ => self.parse_error(byte),
            },

            State::PasteOpen20 => match byte {
                b'0' => self.state = State::PasteOpen200,
                // F9 arrives as `CSI 20~`, colliding with the paste-open
                // prefix until this byte decides.
                b';' => {
                    self.pending.code = KeyCode::F9;
                    self.state = State::SpecialModifier;
                }
                b'~' => {
                    self.pending.code = KeyCode::F9;
                    self.state = State::Ground;
                    self.emit(hooks);
                }
                _ => self.parse_error(byte),
            },

            State::PasteOpen200 => match byte {
                b'~' => {
                    self.paste.clear();
                    self.state = State::PasteBody;
                }
                _ => self.parse_error(byte),
            },

            State::PasteBody => match byte {
                0x1b => self.state = State::PasteEsc,
                _ => self.paste.push(byte),
            },

            State::PasteEsc => match byte {
                b'[' => self.state = State::PasteCsi,
                _ => self.parse_error(byte),
            },
            State::PasteCsi => match byte {
                b'2' => self.state = State::PasteClose2,
                _ => self.parse_error(byte),
            },
            State::PasteClose2 => match byte {
                b'0' => self.state = State::PasteClose20,
                _ => self.parse_error(byte),
            },
            State::PasteClose20 => match byte {
                b'1' => self.state = State::PasteClose201,
                _ => self.parse_error(byte),
            },
            State::PasteClose201 => match byte {
                b'~' => {
                    self.state = State::Ground;
                    trace!("paste end, {} bytes", self.paste.len());
                    let body = std::mem::take(&mut self.paste);
                    hooks.on_paste(&body);
                }
                _ => self.parse_error(byte),
            },

            State::CsiDigit1 => match byte {
                b';' => self.state = State::ArrowModifier,
                b'5' | b'7' | b'8' | b'9' => match map_fk(byte) {
                    Some(code) => {
                        self.pending.code = code;
                        self.state = State::SpecialTilde;
                    }
                    None => self.parse_error(byte),
                },
                _ => self.parse_error(byte),
            },

            State::ArrowModifier => {
                self.pending.modifier = decode_modifier(byte);
                self.state = State::ArrowFinal;
            }

            State::ArrowFinal => {
                self.state = State::Ground;
                match byte {
                    b'P' | b'Q' | b'R' | b'S' => match map_fk(byte) {
                        Some(code) => {
                            self.pending.code = code;
                            self.emit(hooks);
                        }
                        None => self.parse_error(byte),
                    },
                    _ => match map_nav(byte) {
                        Some(code) => {
                            self.pending.code = code;
                            self.emit(hooks);
                        }
                        None => self.parse_error(byte),
                    },
                }
            }

            State::PageTilde => match byte {
                b';' => self.state = State::PageModifier,
                b'~' => {
                    self.state = State::Ground;
                    self.emit(hooks);
                }
                _ => self.parse_error(byte),
            },

            State::PageModifier => {
                self.pending.modifier = decode_modifier(byte);
                self.state = State::PageFinalTilde;
            }

            State::PageFinalTilde => match byte {
                b'~' => {
                    self.state = State::Ground;
                    self.emit(hooks);
                }
                _ => self.parse_error(byte),
            },

            State::SpecialTilde => match byte {
                b';' => self.state = State::SpecialModifier,
                b'~' => {
                    self.state = State::Ground;
                    self.emit(hooks);
                }
                _ => self.parse_error(byte),
            },

            State::SpecialModifier => {
                self.pending.modifier = decode_modifier(byte);
                self.state = State::SpecialTilde;
            }

            State::Ss3 => match map_fk(byte) {
                Some(code) => {
                    self.pending.code = code;
                    self.state = State::Ground;
                    self.emit(hooks);
                }
                None => self.parse_error(byte),
            },
        }
    }

    /// Ground-state keystroke: canonical code plus derived modifiers.
    fn keystroke(&mut self, byte: u8, extra: Modifiers, hooks: &mut dyn EventHooks) {
        self.state = State::Ground;
        match map_ascii(byte) {
            Some((code, shifted)) => {
                self.pending.code = code;
                self.pending.modifier = extra;
                if shifted {
                    self.pending.modifier |= Modifiers::SHIFT;
                }
                if is_control_byte(byte) {
                    self.pending.modifier |= Modifiers::CTRL;
                }
                self.emit(hooks);
            }
            None => trace!("ignoring unmapped byte {byte:#04x}"),
        }
    }

    fn emit(&mut self, hooks: &mut dyn EventHooks) {
        trace!(
            "keystroke {:?} mod={:?} stroke={:#04x}",
            self.pending.code,
            self.pending.modifier,
            self.pending.stroke
        );
        hooks.on_keystroke(&self.pending);
    }

    /// Unexpected byte inside a sequence: report, drop the sequence, carry
    /// on from ground.
    fn parse_error(&mut self, byte: u8) {
        warn!("parse error: {byte:#04x} ('{}')", byte.escape_ascii());
        self.state = State::Ground;
        self.paste.clear();
    }

    /// A complete three-byte mouse report: fold it into the higher-level
    /// press / drag / hover / release / scroll stream.
    fn handle_mouse(&mut self, hooks: &mut dyn EventHooks) {
        let event = decode_mouse_event(&self.event_buf);
        self.mouse.prev = self.mouse.last;
        self.mouse.last = event;

        let prev = self.mouse.prev;
        let last = self.mouse.last;
        let was_engaged =
            prev.motion == MouseMotion::Static || prev.motion == MouseMotion::Moving;

        if was_engaged && prev.button == MouseButton::None && last.button != MouseButton::None {
            self.mouse.pressed = last;
            hooks.on_press(&self.mouse.pressed);
        }

        if prev.motion == MouseMotion::Static
            && prev.button != MouseButton::None
            && last.motion == MouseMotion::Moving
            && last.button != MouseButton::None
        {
            self.mouse.drag = true;
            hooks.on_drag_begin(&self.mouse.pressed);
        }

        if self.mouse.drag {
            hooks.on_drag(&self.mouse.pressed, &self.mouse.last);
        } else if last.motion == MouseMotion::Moving {
            hooks.on_hover(&self.mouse.last);
        }

        if was_engaged
            && prev.button != MouseButton::None
            && last.motion == MouseMotion::Static
            && last.button == MouseButton::None
        {
            if !self.mouse.drag {
                hooks.on_release(&self.mouse.pressed);
            } else {
                self.mouse.drag = false;
                hooks.on_drag_end(&self.mouse.pressed, &last);
            }
        }

        if last.motion == MouseMotion::Scrolling {
            hooks.on_scroll(&last);
        }
    }
}

impl Default for InputDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// `CSI 1;<m>` style modifier byte: three bits biased by `0x31`.
fn decode_modifier(byte: u8) -> Modifiers {
    Modifiers::from_bits_truncate(byte.wrapping_sub(0x31) & 0x7)
}

/// Crack a three-byte X10 report into its fields. Coordinates arrive
/// one-based with a `0x20` bias and come out zero-based.
fn decode_mouse_event(buf: &[u8; EVENT_BUF_SIZE]) -> MouseEvent {
    MouseEvent {
        button: MouseButton::from_bits(buf[0] & 0x3),
        modifier: Modifiers::from_bits_truncate((buf[0] >> 2) & 0x7),
        motion: MouseMotion::from_bits((buf[0] >> 5) & 0x3),
        position: Position::new(
            (buf[1].wrapping_sub(MOUSE_OFFSET) as u16).saturating_sub(1),
            (buf[2].wrapping_sub(MOUSE_OFFSET) as u16).saturating_sub(1),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Collector {
        keystrokes: Vec<KeystrokeEvent>,
        hovers: Vec<MouseEvent>,
        presses: Vec<MouseEvent>,
        releases: Vec<MouseEvent>,
        drag_begins: Vec<MouseEvent>,
        drags: Vec<(MouseEvent, MouseEvent)>,
        drag_ends: Vec<(MouseEvent, MouseEvent)>,
        scrolls: Vec<MouseEvent>,
        pastes: Vec<Vec<u8>>,
    }

    impl EventHooks for Collector {
        fn on_hover(&mut self, hover: &MouseEvent) {
            self.hovers.push(*hover);
        }
        fn on_press(&mut self, press: &MouseEvent) {
            self.presses.push(*press);
        }
        fn on_release(&mut self, release: &MouseEvent) {
            self.releases.push(*release);
        }
        fn on_drag_begin(&mut self, begin: &MouseEvent) {
            self.drag_begins.push(*begin);
        }
        fn on_drag(&mut self, begin: &MouseEvent, moved: &MouseEvent) {
            self.drags.push((*begin, *moved));
        }
        fn on_drag_end(&mut self, begin: &MouseEvent, end: &MouseEvent) {
            self.drag_ends.push((*begin, *end));
        }
        fn on_scroll(&mut self, scroll: &MouseEvent) {
            self.scrolls.push(*scroll);
        }
        fn on_keystroke(&mut self, keystroke: &KeystrokeEvent) {
            self.keystrokes.push(*keystroke);
        }
        fn on_paste(&mut self, text: &[u8]) {
            self.pastes.push(text.to_vec());
        }
    }

    fn feed_all(decoder: &mut InputDecoder, bytes: &[u8], hooks: &mut Collector) {
        for &b in bytes {
            decoder.feed(b, hooks);
        }
    }

    #[test]
    fn test_plain_letters() {
        let mut decoder = InputDecoder::new();
        let mut hooks = Collector::default();
        feed_all(&mut decoder, b"aZ", &mut hooks);
        assert_eq!(hooks.keystrokes.len(), 2);
        assert_eq!(hooks.keystrokes[0].code, KeyCode::KeyA);
        assert_eq!(hooks.keystrokes[0].modifier, Modifiers::empty());
        assert_eq!(hooks.keystrokes[1].code, KeyCode::KeyZ);
        assert_eq!(hooks.keystrokes[1].modifier, Modifiers::SHIFT);
    }

    #[test]
    fn test_shift_left_arrow() {
        // End-to-end bytes for a Shift-modified left arrow.
        let mut decoder = InputDecoder::new();
        let mut hooks = Collector::default();
        feed_all(&mut decoder, &[0x1b, 0x5b, 0x31, 0x3b, 0x32, 0x44], &mut hooks);
        assert_eq!(hooks.keystrokes.len(), 1);
        assert_eq!(hooks.keystrokes[0].code, KeyCode::Left);
        assert_eq!(hooks.keystrokes[0].modifier, Modifiers::SHIFT);
    }

    #[test]
    fn test_bare_escape_then_letter() {
        let mut decoder = InputDecoder::new();
        let mut hooks = Collector::default();
        decoder.feed(0x1b, &mut hooks);
        assert!(hooks.keystrokes.is_empty());

        // Quiet period: the readiness wait expires.
        decoder.on_timeout(&mut hooks);
        assert_eq!(hooks.keystrokes.len(), 1);
        assert_eq!(hooks.keystrokes[0].code, KeyCode::Esc);

        decoder.feed(0x61, &mut hooks);
        assert_eq!(hooks.keystrokes.len(), 2);
        assert_eq!(hooks.keystrokes[1].code, KeyCode::KeyA);
        assert_eq!(hooks.keystrokes[1].modifier, Modifiers::empty());
        assert_eq!(hooks.keystrokes[1].stroke, 0x61);
    }

    #[test]
    fn test_alt_chord() {
        let mut decoder = InputDecoder::new();
        let mut hooks = Collector::default();
        feed_all(&mut decoder, &[0x1b, 0x66], &mut hooks);
        assert_eq!(hooks.keystrokes.len(), 1);
        assert_eq!(hooks.keystrokes[0].code, KeyCode::KeyF);
        assert_eq!(hooks.keystrokes[0].modifier, Modifiers::ALT);
    }

    #[test]
    fn test_scroll_down_report() {
        let mut decoder = InputDecoder::new();
        let mut hooks = Collector::default();
        feed_all(&mut decoder, &[0x1b, 0x5b, 0x4d, 0x61, 0x25, 0x2a], &mut hooks);
        assert_eq!(hooks.scrolls.len(), 1);
        let scroll = &hooks.scrolls[0];
        assert_eq!(scroll.button, MouseButton::SCROLL_DOWN);
        assert_eq!(scroll.motion, MouseMotion::Scrolling);
        assert_eq!(scroll.position, Position::new(4, 9));
        assert!(hooks.keystrokes.is_empty());
    }

    #[test]
    fn test_bracketed_paste() {
        let mut decoder = InputDecoder::new();
        let mut hooks = Collector::default();
        feed_all(
            &mut decoder,
            &[
                0x1b, 0x5b, 0x32, 0x30, 0x30, 0x7e, 0x61, 0x62, 0x1b, 0x5b, 0x32, 0x30, 0x31,
                0x7e,
            ],
            &mut hooks,
        );
        assert_eq!(hooks.pastes, vec![b"ab".to_vec()]);
        assert!(hooks.keystrokes.is_empty());
    }

    #[test]
    fn test_function_keys() {
        let mut decoder = InputDecoder::new();
        let mut hooks = Collector::default();
        feed_all(&mut decoder, b"\x1bOP", &mut hooks);
        feed_all(&mut decoder, b"\x1bOS", &mut hooks);
        feed_all(&mut decoder, b"\x1b[15~", &mut hooks);
        feed_all(&mut decoder, b"\x1b[24~", &mut hooks);
        feed_all(&mut decoder, b"\x1b[20~", &mut hooks);
        let codes: Vec<KeyCode> = hooks.keystrokes.iter().map(|k| k.code).collect();
        assert_eq!(
            codes,
            vec![
                KeyCode::F1,
                KeyCode::F4,
                KeyCode::F5,
                KeyCode::F12,
                KeyCode::F9
            ]
        );
    }

    #[test]
    fn test_modified_function_and_arrow_keys() {
        let mut decoder = InputDecoder::new();
        let mut hooks = Collector::default();
        feed_all(&mut decoder, b"\x1b[1;5A", &mut hooks); // Ctrl+Up
        feed_all(&mut decoder, b"\x1b[1;2P", &mut hooks); // Shift+F1
        assert_eq!(hooks.keystrokes[0].code, KeyCode::Up);
        assert_eq!(hooks.keystrokes[0].modifier, Modifiers::CTRL);
        assert_eq!(hooks.keystrokes[1].code, KeyCode::F1);
        assert_eq!(hooks.keystrokes[1].modifier, Modifiers::SHIFT);
    }

    #[test]
    fn test_navigation_and_editing_keys() {
        let mut decoder = InputDecoder::new();
        let mut hooks = Collector::default();
        feed_all(&mut decoder, b"\x1b[A", &mut hooks);
        feed_all(&mut decoder, b"\x1b[H", &mut hooks);
        feed_all(&mut decoder, b"\x1b[5~", &mut hooks);
        feed_all(&mut decoder, b"\x1b[6;2~", &mut hooks);
        feed_all(&mut decoder, b"\x1b[3~", &mut hooks);
        feed_all(&mut decoder, b"\x1b[3;2~", &mut hooks);
        feed_all(&mut decoder, b"\x1b[2~", &mut hooks);
        feed_all(&mut decoder, b"\x7f", &mut hooks);
        let expected = [
            (KeyCode::Up, Modifiers::empty()),
            (KeyCode::Home, Modifiers::empty()),
            (KeyCode::PageUp, Modifiers::empty()),
            (KeyCode::PageDown, Modifiers::SHIFT),
            (KeyCode::Delete, Modifiers::empty()),
            (KeyCode::Delete, Modifiers::SHIFT),
            (KeyCode::Insert, Modifiers::empty()),
            (KeyCode::Backspace, Modifiers::CTRL),
        ];
        assert_eq!(hooks.keystrokes.len(), expected.len());
        for (event, (code, modifier)) in hooks.keystrokes.iter().zip(expected) {
            assert_eq!(event.code, code);
            assert_eq!(event.modifier, modifier);
        }
    }

    #[test]
    fn test_control_letter_carries_ctrl() {
        let mut decoder = InputDecoder::new();
        let mut hooks = Collector::default();
        decoder.feed(0x04, &mut hooks); // Ctrl+D
        assert_eq!(hooks.keystrokes.len(), 1);
        assert_eq!(hooks.keystrokes[0].code, KeyCode::KeyD);
        assert!(hooks.keystrokes[0].modifier.contains(Modifiers::CTRL));
    }

    #[test]
    fn test_press_drag_release_cycle() {
        let mut decoder = InputDecoder::new();
        let mut hooks = Collector::default();
        // Button 1 down at (2,2), motion with the button held, release.
        feed_all(&mut decoder, &[0x1b, b'[', b'M', 0x20, 0x23, 0x23], &mut hooks);
        feed_all(&mut decoder, &[0x1b, b'[', b'M', 0x40, 0x24, 0x23], &mut hooks);
        feed_all(&mut decoder, &[0x1b, b'[', b'M', 0x23, 0x25, 0x23], &mut hooks);

        assert_eq!(hooks.presses.len(), 1);
        assert_eq!(hooks.presses[0].position, Position::new(2, 2));
        assert_eq!(hooks.drag_begins.len(), 1);
        // The motion report and the release report both arrive while the
        // drag flag is set.
        assert_eq!(hooks.drags.len(), 2);
        assert_eq!(hooks.drag_ends.len(), 1);
        assert_eq!(hooks.drag_ends[0].1.position, Position::new(4, 2));
        assert!(hooks.releases.is_empty());
        assert!(hooks.hovers.is_empty());
    }

    #[test]
    fn test_click_without_motion_releases() {
        let mut decoder = InputDecoder::new();
        let mut hooks = Collector::default();
        feed_all(&mut decoder, &[0x1b, b'[', b'M', 0x20, 0x21, 0x21], &mut hooks);
        feed_all(&mut decoder, &[0x1b, b'[', b'M', 0x23, 0x21, 0x21], &mut hooks);
        assert_eq!(hooks.presses.len(), 1);
        assert_eq!(hooks.presses[0].position, Position::new(0, 0));
        assert_eq!(hooks.releases.len(), 1);
        assert!(hooks.drag_ends.is_empty());
    }

    #[test]
    fn test_hover_stream() {
        let mut decoder = InputDecoder::new();
        let mut hooks = Collector::default();
        feed_all(&mut decoder, &[0x1b, b'[', b'M', 0x43, 0x22, 0x22], &mut hooks);
        feed_all(&mut decoder, &[0x1b, b'[', b'M', 0x43, 0x23, 0x22], &mut hooks);
        assert_eq!(hooks.hovers.len(), 2);
        assert_eq!(hooks.hovers[1].position, Position::new(2, 1));
        assert!(hooks.presses.is_empty());
    }

    #[test]
    fn test_parse_error_recovers() {
        let mut decoder = InputDecoder::new();
        let mut hooks = Collector::default();
        feed_all(&mut decoder, b"\x1b[8", &mut hooks); // invalid CSI payload
        assert!(hooks.keystrokes.is_empty());
        feed_all(&mut decoder, b"a", &mut hooks);
        assert_eq!(hooks.keystrokes.len(), 1);
        assert_eq!(hooks.keystrokes[0].code, KeyCode::KeyA);
    }

    #[test]
    fn test_one_event_per_recognised_sequence() {
        let mut decoder = InputDecoder::new();
        let mut hooks = Collector::default();
        feed_all(&mut decoder, b"ab\x1b[A\x1b[3~\x1bOP", &mut hooks);
        assert_eq!(hooks.keystrokes.len(), 5);
    }

    #[test]
    fn test_timeout_mid_sequence_does_not_emit() {
        let mut decoder = InputDecoder::new();
        let mut hooks = Collector::default();
        feed_all(&mut decoder, b"\x1b[", &mut hooks);
        decoder.on_timeout(&mut hooks);
        assert!(hooks.keystrokes.is_empty());
        // The sequence still completes afterwards.
        feed_all(&mut decoder, b"A", &mut hooks);
        assert_eq!(hooks.keystrokes.len(), 1);
        assert_eq!(hooks.keystrokes[0].code, KeyCode::Up);
    }
}
