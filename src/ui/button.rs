// (C) 2025 - Enzo Lombardi

//! Button interior - a pressable label with an action callback.

use super::interior::{Interior, InteriorBase};
use super::interior_layout::InteriorLayout;
use crate::core::geometry::Position;
use crate::core::style::Style;
use crate::display::Display;
use crate::input::MouseButton;
use log::trace;

/// When a button's action fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionTrigger {
    OnPress,
    #[default]
    OnRelease,
}

/// The action record: trigger moment plus callback. State the callback
/// needs lives in its captures.
pub struct ButtonAction {
    trigger: ActionTrigger,
    callback: Box<dyn FnMut()>,
}

impl ButtonAction {
    pub fn new(trigger: ActionTrigger, callback: impl FnMut() + 'static) -> Self {
        Self {
            trigger,
            callback: Box::new(callback),
        }
    }
}

/// Styles for the three visual states of a button.
#[derive(Debug, Clone, Default)]
pub struct ButtonStyles {
    pub normal: Style,
    pub hovered: Style,
    pub pressed: Style,
}

/// A button filling the first grid area of its layout.
pub struct ButtonInterior {
    base: InteriorBase,
    label: String,
    styles: ButtonStyles,
    pressed: bool,
    action: Option<ButtonAction>,
}

impl ButtonInterior {
    pub fn new(layout: InteriorLayout, label: impl Into<String>) -> Self {
        Self {
            base: InteriorBase::new(layout),
            label: label.into(),
            styles: ButtonStyles::default(),
            pressed: false,
            action: None,
        }
    }

    pub fn with_styles(mut self, styles: ButtonStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_action(mut self, action: ButtonAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn fire(&mut self, at: ActionTrigger) {
        if let Some(action) = self.action.as_mut() {
            if action.trigger == at {
                trace!("button '{}' fired", self.label);
                (action.callback)();
            }
        }
    }
}

impl Interior for ButtonInterior {
    fn base(&self) -> &InteriorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InteriorBase {
        &mut self.base
    }

    fn render(&self, display: &mut Display) {
        let Some(area) = self.base.layout.areas().iter().find(|a| a.is_visible()) else {
            return;
        };
        let style = if self.pressed {
            &self.styles.pressed
        } else if self.base.last_hovered.is_some() {
            &self.styles.hovered
        } else {
            &self.styles.normal
        };
        display.fill_area(style, area.area);
        display.draw_string_centered(&self.label, area.area, style);
    }

    fn enter(&mut self, pos: Position) {
        if let Some(index) = self.base.layout.peek_area_index(pos) {
            self.base.last_hovered = Some(index);
        }
    }

    fn leave(&mut self, _pos: Position) {
        // A press that wanders off must not leave the button stuck down.
        self.pressed = false;
        self.base.last_hovered = None;
    }

    fn press(&mut self, _pos: Position, button: MouseButton) {
        if button != MouseButton::Mouse1 {
            return;
        }
        self.pressed = true;
        self.fire(ActionTrigger::OnPress);
    }

    fn release(&mut self, _pos: Position, button: MouseButton) {
        if button != MouseButton::Mouse1 || !self.pressed {
            return;
        }
        self.pressed = false;
        self.fire(ActionTrigger::OnRelease);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Area;
    use crate::ui::interior_layout::Padding;
    use std::cell::Cell;
    use std::rc::Rc;

    fn button_with(trigger: ActionTrigger) -> (ButtonInterior, Rc<Cell<usize>>) {
        let fired = Rc::new(Cell::new(0));
        let count = Rc::clone(&fired);
        let mut button = ButtonInterior::new(InteriorLayout::whole(Padding::NONE), "Ok")
            .with_action(ButtonAction::new(trigger, move || {
                count.set(count.get() + 1)
            }));
        button.recalculate(&Area::from_coords(0, 0, 9, 2));
        (button, fired)
    }

    #[test]
    fn test_press_trigger_fires_on_press() {
        let (mut button, fired) = button_with(ActionTrigger::OnPress);
        button.press(Position::new(1, 1), MouseButton::Mouse1);
        assert!(button.is_pressed());
        assert_eq!(fired.get(), 1);
        button.release(Position::new(1, 1), MouseButton::Mouse1);
        assert_eq!(fired.get(), 1);
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_release_trigger_fires_on_release() {
        let (mut button, fired) = button_with(ActionTrigger::OnRelease);
        button.press(Position::new(1, 1), MouseButton::Mouse1);
        assert_eq!(fired.get(), 0);
        button.release(Position::new(1, 1), MouseButton::Mouse1);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_leave_clears_pressed_and_swallows_release() {
        let (mut button, fired) = button_with(ActionTrigger::OnRelease);
        button.press(Position::new(1, 1), MouseButton::Mouse1);
        button.leave(Position::new(30, 1));
        assert!(!button.is_pressed());
        button.release(Position::new(30, 1), MouseButton::Mouse1);
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_other_buttons_are_ignored() {
        let (mut button, fired) = button_with(ActionTrigger::OnPress);
        button.press(Position::new(1, 1), MouseButton::Mouse3);
        assert!(!button.is_pressed());
        assert_eq!(fired.get(), 0);
    }
}
