// (C) 2025 - Enzo Lombardi

//! Panel manager - owns every panel, routes events, tracks hover and
//! keyboard focus.
//!
//! Panels live in insertion order, which doubles as the z-order and the
//! hit-test tie-break: the first panel containing a position wins.
//! Dropping the manager drops every panel and, through it, every
//! interior and interior-owned buffer - the collective release the
//! framework guarantees.

use super::panel::Panel;
use crate::core::geometry::{Area, Position};
use crate::display::Display;
use crate::input::{KeystrokeEvent, MouseButton};
use log::trace;

#[derive(Default)]
pub struct PanelManager {
    panels: Vec<Panel>,
    last_hovered: Option<usize>,
    focused: Option<usize>,
}

impl PanelManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a panel; returns its index. Insertion order is z-order.
    pub fn add_panel(&mut self, panel: Panel) -> usize {
        self.panels.push(panel);
        self.panels.len() - 1
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub fn panel_mut(&mut self, index: usize) -> Option<&mut Panel> {
        self.panels.get_mut(index)
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Re-place every panel inside `bounds`, each claim shrinking what is
    /// left for the rest.
    pub fn recalculate(&mut self, bounds: Area) {
        let mut remaining = bounds;
        for panel in &mut self.panels {
            panel.recalculate(&mut remaining);
        }
    }

    pub fn render(&self, display: &mut Display) {
        for panel in &self.panels {
            panel.render(display);
        }
    }

    /// First panel whose area contains `pos`, in insertion order.
    pub fn hit_test(&self, pos: Position) -> Option<usize> {
        self.panels.iter().position(|panel| panel.contains(pos))
    }

    /// Track the panel under the cursor, emitting `leave`/`enter` on a
    /// transition and `hover` otherwise.
    pub fn hover(&mut self, pos: Position) {
        let current = self.hit_test(pos);
        if self.last_hovered != current {
            if let Some(old) = self.last_hovered {
                self.panels[old].leave(pos);
            }
            if let Some(new) = current {
                self.panels[new].enter(pos);
            }
        } else if let Some(index) = current {
            self.panels[index].hover(pos);
        }
        self.last_hovered = current;
    }

    pub fn press(&mut self, pos: Position, button: MouseButton) {
        if let Some(index) = self.hit_test(pos) {
            self.panels[index].press(pos, button);
        }
    }

    pub fn release(&mut self, pos: Position, button: MouseButton) {
        if let Some(index) = self.hit_test(pos) {
            self.panels[index].release(pos, button);
        }
    }

    pub fn scroll(&mut self, pos: Position, button: MouseButton) {
        if let Some(index) = self.hit_test(pos) {
            self.panels[index].scroll(pos, button);
        }
    }

    /// Route a keystroke to the focused panel; swallowed when none is.
    pub fn keystroke(&mut self, event: &KeystrokeEvent) {
        if let Some(index) = self.focused {
            self.panels[index].keystroke(event);
        } else {
            trace!("keystroke with no focused panel, swallowed");
        }
    }

    /// Move keyboard focus to the panel at `index`.
    pub fn set_focused(&mut self, index: usize) {
        assert!(index < self.panels.len(), "focus index out of range");
        if self.focused == Some(index) {
            return;
        }
        if let Some(old) = self.focused {
            self.panels[old].lost_focus();
        }
        self.panels[index].recv_focus();
        self.focused = Some(index);
    }

    pub fn clear_focus(&mut self) {
        if let Some(old) = self.focused.take() {
            self.panels[old].lost_focus();
        }
    }

    /// Focus the next panel in insertion order, wrapping.
    pub fn focus_next_panel(&mut self) {
        if self.panels.is_empty() {
            return;
        }
        let next = match self.focused {
            Some(index) => (index + 1) % self.panels.len(),
            None => 0,
        };
        self.set_focused(next);
    }

    /// Focus the previous panel in insertion order, wrapping.
    pub fn focus_prev_panel(&mut self) {
        if self.panels.is_empty() {
            return;
        }
        let prev = match self.focused {
            Some(0) | None => self.panels.len() - 1,
            Some(index) => index - 1,
        };
        self.set_focused(prev);
    }
}
