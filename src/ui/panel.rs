// (C) 2025 - Enzo Lombardi

//! A panel: a bordered, titled rectangle owning one interior.

use super::interior::Interior;
use crate::core::geometry::{Area, Position};
use crate::core::style::{BorderSet, Style};
use crate::display::Display;
use crate::input::{KeystrokeEvent, MouseButton};
use crate::layout::{calc_panel_area, PanelLayout};

/// Construction options for a panel.
#[derive(Debug, Clone, Default)]
pub struct PanelOpts {
    pub title: String,
    pub layout: PanelLayout,
    pub style: Style,
    pub border: BorderSet,
}

impl PanelOpts {
    pub fn new(title: impl Into<String>, layout: PanelLayout) -> Self {
        Self {
            title: title.into(),
            layout,
            style: Style::default(),
            border: BorderSet::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn border(mut self, border: BorderSet) -> Self {
        self.border = border;
        self
    }
}

pub struct Panel {
    title: String,
    layout: PanelLayout,
    style: Style,
    border: BorderSet,
    area: Area,
    interior: Box<dyn Interior>,
}

impl Panel {
    pub fn new(opts: PanelOpts, interior: Box<dyn Interior>) -> Self {
        Self {
            title: opts.title,
            layout: opts.layout,
            style: opts.style,
            border: opts.border,
            area: Area::INVALID,
            interior,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The most recently resolved screen rectangle.
    pub fn area(&self) -> Area {
        self.area
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.area.contains(pos)
    }

    pub fn interior(&self) -> &dyn Interior {
        self.interior.as_ref()
    }

    pub fn interior_mut(&mut self) -> &mut dyn Interior {
        self.interior.as_mut()
    }

    /// Claim space out of `bounds` and lay the interior out inside it.
    pub fn recalculate(&mut self, bounds: &mut Area) {
        self.area = calc_panel_area(&self.layout, bounds);
        self.interior.recalculate(&self.area);
    }

    /// Border, centred title on the top row, then the interior.
    pub fn render(&self, display: &mut Display) {
        if !self.area.is_valid() {
            return;
        }
        display.draw_border(&self.style, &self.border, self.area);
        let mut title_area = self.area;
        title_area.second.y = title_area.first.y;
        display.draw_string_centered(&self.title, title_area, &self.style);
        self.interior.render(display);
    }

    pub fn enter(&mut self, pos: Position) {
        self.interior.enter(pos);
    }

    pub fn hover(&mut self, pos: Position) {
        self.interior.hover(pos);
    }

    pub fn leave(&mut self, pos: Position) {
        self.interior.leave(pos);
    }

    pub fn press(&mut self, pos: Position, button: MouseButton) {
        self.interior.press(pos, button);
    }

    pub fn release(&mut self, pos: Position, button: MouseButton) {
        self.interior.release(pos, button);
    }

    pub fn scroll(&mut self, pos: Position, button: MouseButton) {
        self.interior.scroll(pos, button);
    }

    pub fn keystroke(&mut self, event: &KeystrokeEvent) {
        self.interior.keystroke(event);
    }

    pub fn recv_focus(&mut self) {
        self.interior.recv_focus();
    }

    pub fn lost_focus(&mut self) {
        self.interior.lost_focus();
    }
}
