// (C) 2025 - Enzo Lombardi

//! Text input field interior - a single-line byte editor with a sliding
//! window, caret, and submit action.
//!
//! The field renders into the first grid area of its layout. The visible
//! window is the area width minus two border columns; `<` and `>` markers
//! flag text scrolled out to either side. The caret is drawn only while
//! the field is active.

use super::interior::{Interior, InteriorBase};
use super::interior_layout::InteriorLayout;
use crate::core::geometry::{Area, Position};
use crate::core::style::{BorderSet, Style};
use crate::display::Display;
use crate::input::{KeyCode, KeystrokeEvent, MouseButton};
use crate::layout::Alignment;
use log::trace;

/// Field activity state, also the index into the chrome tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextInputState {
    #[default]
    Inactive,
    Active,
    Error,
}

/// Per-state styling: border glyphs and styles, plus the caret style.
#[derive(Debug, Clone)]
pub struct TextInputChrome {
    pub borders: [BorderSet; 3],
    pub styles: [Style; 3],
    pub caret: Style,
}

impl Default for TextInputChrome {
    fn default() -> Self {
        Self {
            borders: [BorderSet::LIGHT, BorderSet::DOUBLE, BorderSet::BLOCK],
            styles: [
                Style::new("\x1b[37m"),
                Style::new("\x1b[37m"),
                Style::new("\x1b[30;41m"),
            ],
            caret: Style::new("\x1b[30;47m"),
        }
    }
}

/// Callback fired when the field submits (Return).
pub type SubmitFn = Box<dyn FnMut(&[u8])>;

pub struct TextInputInterior {
    base: InteriorBase,
    text: Vec<u8>,
    /// Caret offset within the visible window.
    caret: usize,
    /// First rendered byte of `text`.
    offset: usize,
    state: TextInputState,
    chrome: TextInputChrome,
    on_submit: Option<SubmitFn>,
}

impl TextInputInterior {
    pub fn new(layout: InteriorLayout) -> Self {
        Self {
            base: InteriorBase::new(layout),
            text: Vec::new(),
            caret: 0,
            offset: 0,
            state: TextInputState::Inactive,
            chrome: TextInputChrome::default(),
            on_submit: None,
        }
    }

    pub fn with_chrome(mut self, chrome: TextInputChrome) -> Self {
        self.chrome = chrome;
        self
    }

    pub fn with_submit(mut self, on_submit: impl FnMut(&[u8]) + 'static) -> Self {
        self.on_submit = Some(Box::new(on_submit));
        self
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn state(&self) -> TextInputState {
        self.state
    }

    pub fn set_error(&mut self, error: bool) {
        self.state = if error {
            TextInputState::Error
        } else {
            TextInputState::Active
        };
    }

    fn field_area(&self) -> Option<Area> {
        self.base
            .layout
            .areas()
            .iter()
            .find(|a| a.is_visible())
            .map(|a| a.area)
    }

    /// Visible window width: the field area minus its two border columns.
    fn window_length(&self) -> usize {
        match self.field_area() {
            Some(area) if area.width() > 2 => area.width() as usize - 2,
            _ => 0,
        }
    }

    /// Caret/offset advance shared by Right and insertion.
    fn advance(&mut self, window: usize) {
        if self.caret < window {
            self.caret += 1;
        } else {
            self.offset += 1;
        }
    }

    /// Caret/offset retreat shared by Left and Backspace.
    fn retreat(&mut self) {
        if self.caret > 0 {
            self.caret -= 1;
        } else if self.offset > 0 {
            self.offset -= 1;
        }
    }
}

impl Interior for TextInputInterior {
    fn base(&self) -> &InteriorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InteriorBase {
        &mut self.base
    }

    fn render(&self, display: &mut Display) {
        let Some(area) = self.field_area() else {
            return;
        };
        let window = self.window_length();
        let state = self.state as usize;
        let style = &self.chrome.styles[state];

        display.fill_area(style, area);
        display.draw_border(style, &self.chrome.borders[state], area);

        let mid_y = area.first.y + area.height() / 2;

        // Overflow indicators on the border columns.
        if self.offset > 0 {
            display.set_char(Position::new(area.first.x, mid_y), '<');
        }
        if self.text.len() - self.offset > window {
            display.set_char(Position::new(area.second.x, mid_y), '>');
        }

        let shown = (self.text.len() - self.offset).min(window);
        let visible = String::from_utf8_lossy(&self.text[self.offset..self.offset + shown]);
        let mut text_area = area;
        text_area.first.x += 1;
        display.draw_string_aligned(
            &visible,
            text_area,
            &self.chrome.styles[TextInputState::Inactive as usize],
            Alignment::LEFT | Alignment::V_CENTER,
        );

        // No caret while inactive.
        if self.state == TextInputState::Inactive {
            return;
        }
        let caret_pos = Position::new(area.first.x + 1 + self.caret as u16, mid_y);
        if area.contains(caret_pos) {
            display.set_style(caret_pos, self.chrome.caret.clone());
        }
    }

    fn recv_focus(&mut self) {
        self.state = TextInputState::Active;
    }

    fn lost_focus(&mut self) {
        self.state = TextInputState::Inactive;
    }

    fn press(&mut self, _pos: Position, button: MouseButton) {
        if button == MouseButton::Mouse1 {
            self.recv_focus();
        }
    }

    fn keystroke(&mut self, event: &KeystrokeEvent) {
        let window = self.window_length();
        let text_length = self.text.len();
        let pos_from_start = self.offset + self.caret;

        match event.code {
            KeyCode::Left => self.retreat(),
            KeyCode::Right => {
                let after_offset = text_length - self.offset;
                if self.caret < after_offset {
                    self.advance(window);
                }
            }
            KeyCode::Backspace => {
                let has_chars_from_left = text_length > 0 && (self.offset > 0 || self.caret > 0);
                if has_chars_from_left {
                    self.text.remove(pos_from_start - 1);
                    self.retreat();
                }
            }
            KeyCode::Delete => {
                let has_chars_from_right = text_length > 0 && pos_from_start < text_length;
                if has_chars_from_right {
                    self.text.remove(pos_from_start);
                }
            }
            KeyCode::Return => {
                trace!("text input submitted {} bytes", self.text.len());
                if let Some(submit) = self.on_submit.as_mut() {
                    submit(&self.text);
                }
            }
            KeyCode::Esc => {}
            _ => {
                let stroke = event.stroke;
                if stroke.is_ascii_graphic() || stroke == b' ' {
                    self.text.insert(pos_from_start, stroke);
                    self.advance(window);
                }
            }
        }
    }
}
