// (C) 2025 - Enzo Lombardi

//! Input event structures and byte-to-key mapping tables.
//!
//! Keys are a closed enumeration of canonical "unshifted" codes: a typed
//! `!` arrives as [`KeyCode::Key1`] with [`Modifiers::SHIFT`] set, `{` as
//! [`KeyCode::SqBrOpen`] with Shift, and so on. The raw byte that produced
//! a keystroke travels along in [`KeystrokeEvent::stroke`] so text editing
//! code can insert it verbatim.

use crate::core::geometry::Position;
use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a keystroke or mouse event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1;
        const ALT   = 2;
        const CTRL  = 4;
    }
}

/// Canonical key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[rustfmt::skip]
pub enum KeyCode {
    Esc,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    Up, Down, Right, Left,
    PageUp, PageDown, Home, End,
    Return,
    Backspace,
    Delete,
    Insert,
    Space,
    Tab,
    Backtick,
    Semicolon,
    Quote,
    Comma,
    Period,
    Slash,
    Minus,
    Plus,
    SqBrOpen,
    SqBrClose,
    BackSlash,
    Key0, Key1, Key2, Key3, Key4, Key5, Key6, Key7, Key8, Key9,
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ,
    KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR, KeyS, KeyT,
    KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
}

/// A decoded keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeystrokeEvent {
    pub code: KeyCode,
    pub modifier: Modifiers,
    /// Raw byte that terminated the decode.
    pub stroke: u8,
}

impl KeystrokeEvent {
    pub fn new(code: KeyCode, modifier: Modifiers, stroke: u8) -> Self {
        Self {
            code,
            modifier,
            stroke,
        }
    }
}

/// Mouse buttons as reported in X10 mouse reports. The first two double
/// as the scroll directions when the motion is `Scrolling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    Mouse1,
    Mouse2,
    Mouse3,
    #[default]
    None,
}

impl MouseButton {
    /// Scroll wheel up (same wire code as button 1).
    pub const SCROLL_UP: MouseButton = MouseButton::Mouse1;
    /// Scroll wheel down (same wire code as button 2).
    pub const SCROLL_DOWN: MouseButton = MouseButton::Mouse2;

    pub(crate) fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            0 => MouseButton::Mouse1,
            1 => MouseButton::Mouse2,
            2 => MouseButton::Mouse3,
            _ => MouseButton::None,
        }
    }
}

/// What the pointer was doing when the report was generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseMotion {
    #[default]
    Static,
    Moving,
    Scrolling,
}

impl MouseMotion {
    pub(crate) fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            2 => MouseMotion::Moving,
            3 => MouseMotion::Scrolling,
            _ => MouseMotion::Static,
        }
    }
}

/// A decoded mouse event. Positions are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseEvent {
    pub button: MouseButton,
    pub modifier: Modifiers,
    pub motion: MouseMotion,
    pub position: Position,
}

/// Map a plain input byte to its canonical key code and whether Shift was
/// involved (an uppercase letter or the upper member of a symbol pair).
/// Returns `None` for bytes outside the keyboard repertoire.
pub fn map_ascii(byte: u8) -> Option<(KeyCode, bool)> {
    use KeyCode::*;
    let shifted = byte.is_ascii_uppercase() || is_upper_symbol(byte);
    let lower = byte.to_ascii_lowercase();
    let code = match lower {
        0x1b => Esc,
        b'\n' => Return,
        0x7f => Backspace,
        b' ' => Space,
        b'\t' => Tab,
        // Control bytes carry the letter they were struck with.
        0x01..=0x1a => {
            return Some((letter(lower - 0x01), false));
        }
        b'0'..=b'9' => digit(lower - b'0'),
        b'a'..=b'z' => letter(lower - b'a'),
        b'~' | b'`' => Backtick,
        b':' | b';' => Semicolon,
        b'"' | b'\'' => Quote,
        b'<' | b',' => Comma,
        b'>' | b'.' => Period,
        b'/' | b'?' => Slash,
        b'-' | b'_' => Minus,
        b'=' | b'+' => Plus,
        b'[' | b'{' => SqBrOpen,
        b']' | b'}' => SqBrClose,
        b'\\' | b'|' => BackSlash,
        b'!' => Key1,
        b'@' => Key2,
        b'#' => Key3,
        b'$' => Key4,
        b'%' => Key5,
        b'^' => Key6,
        b'&' => Key7,
        b'*' => Key8,
        b'(' => Key9,
        b')' => Key0,
        _ => return None,
    };
    Some((code, shifted))
}

/// Whether a byte produces the Ctrl modifier on its own: anything outside
/// the printable ASCII range.
pub fn is_control_byte(byte: u8) -> bool {
    byte < 0x20 || byte > 0x7e
}

fn is_upper_symbol(byte: u8) -> bool {
    matches!(
        byte,
        b'~' | b':'
            | b'"'
            | b'<'
            | b'>'
            | b'?'
            | b'_'
            | b'+'
            | b'{'
            | b'}'
            | b'|'
            | b'!'
            | b'@'
            | b'#'
            | b'$'
            | b'%'
            | b'^'
            | b'&'
            | b'*'
            | b'('
            | b')'
    )
}

fn digit(n: u8) -> KeyCode {
    use KeyCode::*;
    [Key0, Key1, Key2, Key3, Key4, Key5, Key6, Key7, Key8, Key9][n as usize]
}

fn letter(n: u8) -> KeyCode {
    use KeyCode::*;
    [
        KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO,
        KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
    ][n as usize]
}

/// Map a navigation selector byte (`CSI` final or page-key digit).
pub fn map_nav(byte: u8) -> Option<KeyCode> {
    match byte {
        b'5' => Some(KeyCode::PageUp),
        b'6' => Some(KeyCode::PageDown),
        b'A' => Some(KeyCode::Up),
        b'B' => Some(KeyCode::Down),
        b'C' => Some(KeyCode::Right),
        b'D' => Some(KeyCode::Left),
        b'H' => Some(KeyCode::Home),
        b'F' => Some(KeyCode::End),
        _ => None,
    }
}

/// Map a function-key selector byte: `P..S` for F1-F4 (SS3 and modified
/// CSI forms), digits for the `CSI n ~` encodings of F5-F12.
pub fn map_fk(byte: u8) -> Option<KeyCode> {
    match byte {
        0x1b => Some(KeyCode::Esc),
        b'P' => Some(KeyCode::F1),
        b'Q' => Some(KeyCode::F2),
        b'R' => Some(KeyCode::F3),
        b'S' => Some(KeyCode::F4),
        b'5' => Some(KeyCode::F5),
        b'7' => Some(KeyCode::F6),
        b'8' => Some(KeyCode::F7),
        b'9' => Some(KeyCode::F8),
        b'0' => Some(KeyCode::F9),
        b'1' => Some(KeyCode::F10),
        b'3' => Some(KeyCode::F11),
        b'4' => Some(KeyCode::F12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_fold_case() {
        assert_eq!(map_ascii(b'a'), Some((KeyCode::KeyA, false)));
        assert_eq!(map_ascii(b'A'), Some((KeyCode::KeyA, true)));
        assert_eq!(map_ascii(b'z'), Some((KeyCode::KeyZ, false)));
    }

    #[test]
    fn test_digits() {
        assert_eq!(map_ascii(b'0'), Some((KeyCode::Key0, false)));
        assert_eq!(map_ascii(b'9'), Some((KeyCode::Key9, false)));
    }

    #[test]
    fn test_symbol_pairs_fold_to_lower_member() {
        assert_eq!(map_ascii(b'-'), Some((KeyCode::Minus, false)));
        assert_eq!(map_ascii(b'_'), Some((KeyCode::Minus, true)));
        assert_eq!(map_ascii(b'['), Some((KeyCode::SqBrOpen, false)));
        assert_eq!(map_ascii(b'{'), Some((KeyCode::SqBrOpen, true)));
        assert_eq!(map_ascii(b'('), Some((KeyCode::Key9, true)));
        assert_eq!(map_ascii(b'!'), Some((KeyCode::Key1, true)));
    }

    #[test]
    fn test_control_letters() {
        assert_eq!(map_ascii(0x01), Some((KeyCode::KeyA, false)));
        assert_eq!(map_ascii(0x04), Some((KeyCode::KeyD, false)));
        assert_eq!(map_ascii(0x1a), Some((KeyCode::KeyZ, false)));
        assert!(is_control_byte(0x04));
        assert!(!is_control_byte(b'd'));
        assert!(is_control_byte(0x7f));
    }

    #[test]
    fn test_mouse_bit_decoding() {
        assert_eq!(MouseButton::from_bits(0), MouseButton::SCROLL_UP);
        assert_eq!(MouseButton::from_bits(1), MouseButton::SCROLL_DOWN);
        assert_eq!(MouseButton::from_bits(3), MouseButton::None);
        assert_eq!(MouseMotion::from_bits(1), MouseMotion::Static);
        assert_eq!(MouseMotion::from_bits(2), MouseMotion::Moving);
        assert_eq!(MouseMotion::from_bits(3), MouseMotion::Scrolling);
    }

    #[test]
    fn test_fk_and_nav_tables() {
        assert_eq!(map_fk(b'P'), Some(KeyCode::F1));
        assert_eq!(map_fk(b'4'), Some(KeyCode::F12));
        assert_eq!(map_fk(b'x'), None);
        assert_eq!(map_nav(b'A'), Some(KeyCode::Up));
        assert_eq!(map_nav(b'F'), Some(KeyCode::End));
        assert_eq!(map_nav(b'z'), None);
    }
}
