// (C) 2025 - Enzo Lombardi

//! The interior abstraction - the content model inside a panel.
//!
//! Every interior owns an [`InteriorBase`] carrying its grid layout and
//! hover bookkeeping. The [`Interior`] trait provides a stub default for
//! every operation, so variants implement only what they route; the two
//! defaults with behaviour are `recalculate` (solve the grid) and `hover`
//! (remember the area under the cursor).
//!
//! Interiors never hold a reference to their panel or parent. Events flow
//! strictly top-down: panel manager to panel to interior to child.

use super::interior_layout::InteriorLayout;
use crate::core::geometry::{Area, Position};
use crate::display::Display;
use crate::input::{KeystrokeEvent, MouseButton};

/// State shared by every interior variant.
pub struct InteriorBase {
    pub layout: InteriorLayout,
    /// Index of the area the cursor was last seen over.
    pub last_hovered: Option<usize>,
}

impl InteriorBase {
    pub fn new(layout: InteriorLayout) -> Self {
        Self {
            layout,
            last_hovered: None,
        }
    }
}

/// Behaviour of a panel interior. All operations default to stubs.
pub trait Interior {
    fn base(&self) -> &InteriorBase;
    fn base_mut(&mut self) -> &mut InteriorBase;

    /// The panel moved or resized: solve the grid for the new rectangle.
    /// Variants overriding this must still recalculate the base layout.
    fn recalculate(&mut self, panel_area: &Area) {
        self.base_mut().layout.recalculate(panel_area);
    }

    /// Draw into the display's active buffer.
    fn render(&self, _display: &mut Display) {}

    /// The cursor entered this interior.
    fn enter(&mut self, _pos: Position) {}

    /// The cursor moved within this interior.
    fn hover(&mut self, pos: Position) {
        if let Some(index) = self.base().layout.peek_area_index(pos) {
            self.base_mut().last_hovered = Some(index);
        }
    }

    /// The cursor left this interior.
    fn leave(&mut self, _pos: Position) {}

    /// The owning panel became the keyboard focus.
    fn recv_focus(&mut self) {}

    /// The owning panel lost the keyboard focus.
    fn lost_focus(&mut self) {}

    /// Scroll wheel activity at `pos`; the button encodes the direction.
    fn scroll(&mut self, _pos: Position, _button: MouseButton) {}

    /// A mouse button went down at `pos`.
    fn press(&mut self, _pos: Position, _button: MouseButton) {}

    /// A mouse button came up at `pos`.
    fn release(&mut self, _pos: Position, _button: MouseButton) {}

    /// A keystroke routed to the focused panel.
    fn keystroke(&mut self, _event: &KeystrokeEvent) {}
}
