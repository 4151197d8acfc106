// (C) 2025 - Enzo Lombardi

//! Composite interior - nests child interiors into grid areas.
//!
//! Children are keyed by area index in a sparse ordered map; an area with
//! no child simply renders nothing. Hover tracking mirrors the panel
//! manager one level down: crossing from one child to another emits
//! `leave` on the old and `enter` on the new.

use super::interior::{Interior, InteriorBase};
use super::interior_layout::InteriorLayout;
use crate::core::geometry::{Area, Position};
use crate::display::Display;
use crate::input::{KeystrokeEvent, MouseButton};
use std::collections::BTreeMap;

pub struct CompositeInterior {
    base: InteriorBase,
    children: BTreeMap<usize, Box<dyn Interior>>,
    last_hovered_child: Option<usize>,
}

impl CompositeInterior {
    pub fn new(layout: InteriorLayout) -> Self {
        Self {
            base: InteriorBase::new(layout),
            children: BTreeMap::new(),
            last_hovered_child: None,
        }
    }

    /// Attach a child to a grid area. Assigning the same area twice is a
    /// programming error.
    pub fn with_child(mut self, area_index: usize, child: Box<dyn Interior>) -> Self {
        self.add_child(area_index, child);
        self
    }

    pub fn add_child(&mut self, area_index: usize, child: Box<dyn Interior>) {
        let replaced = self.children.insert(area_index, child);
        assert!(
            replaced.is_none(),
            "area {area_index} already has a component"
        );
    }

    pub fn child(&self, area_index: usize) -> Option<&dyn Interior> {
        self.children.get(&area_index).map(|child| child.as_ref())
    }

    pub fn child_mut(&mut self, area_index: usize) -> Option<&mut (dyn Interior + '_)> {
        match self.children.get_mut(&area_index) {
            Some(child) => Some(child.as_mut()),
            None => None,
        }
    }

    fn child_at(&mut self, pos: Position) -> Option<(usize, &mut Box<dyn Interior>)> {
        let index = self.base.layout.peek_area_index(pos)?;
        let child = self.children.get_mut(&index)?;
        Some((index, child))
    }
}

impl Interior for CompositeInterior {
    fn base(&self) -> &InteriorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InteriorBase {
        &mut self.base
    }

    fn recalculate(&mut self, panel_area: &Area) {
        self.base.layout.recalculate(panel_area);
        for (index, child) in self.children.iter_mut() {
            if let Some(area) = self.base.layout.area(*index) {
                if area.is_visible() {
                    let rect = area.area;
                    child.recalculate(&rect);
                }
            }
        }
    }

    fn render(&self, display: &mut Display) {
        for (index, child) in self.children.iter() {
            if let Some(area) = self.base.layout.area(*index) {
                if area.is_visible() {
                    child.render(display);
                }
            }
        }
    }

    fn hover(&mut self, pos: Position) {
        let Some(index) = self.base.layout.peek_area_index(pos) else {
            return;
        };
        self.base.last_hovered = Some(index);

        if !self.children.contains_key(&index) {
            return;
        }
        if self.last_hovered_child != Some(index) {
            if let Some(old) = self.last_hovered_child {
                if let Some(child) = self.children.get_mut(&old) {
                    child.leave(pos);
                }
            }
            if let Some(child) = self.children.get_mut(&index) {
                child.enter(pos);
            }
        } else if let Some(child) = self.children.get_mut(&index) {
            child.hover(pos);
        }
        self.last_hovered_child = Some(index);
    }

    fn leave(&mut self, pos: Position) {
        if let Some(old) = self.last_hovered_child {
            if let Some(child) = self.children.get_mut(&old) {
                child.leave(pos);
            }
        }
        self.last_hovered_child = None;
        self.base.last_hovered = None;
    }

    fn scroll(&mut self, pos: Position, button: MouseButton) {
        if let Some((_, child)) = self.child_at(pos) {
            child.scroll(pos, button);
        }
    }

    fn press(&mut self, pos: Position, button: MouseButton) {
        if let Some((_, child)) = self.child_at(pos) {
            child.press(pos, button);
        }
    }

    fn release(&mut self, pos: Position, button: MouseButton) {
        if let Some((_, child)) = self.child_at(pos) {
            child.release(pos, button);
        }
    }

    fn keystroke(&mut self, event: &KeystrokeEvent) {
        // Keyboard goes to the child under the cursor; a composite has no
        // focus model of its own.
        if let Some(index) = self.last_hovered_child {
            if let Some(child) = self.children.get_mut(&index) {
                child.keystroke(event);
            }
        }
    }

    fn recv_focus(&mut self) {
        if let Some(index) = self.last_hovered_child {
            if let Some(child) = self.children.get_mut(&index) {
                child.recv_focus();
            }
        }
    }

    fn lost_focus(&mut self) {
        if let Some(index) = self.last_hovered_child {
            if let Some(child) = self.children.get_mut(&index) {
                child.lost_focus();
            }
        }
    }
}
