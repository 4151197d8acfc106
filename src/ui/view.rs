// (C) 2025 - Enzo Lombardi

//! View interior - renders a scrollable application data source into the
//! grid areas.

use super::interior::{Interior, InteriorBase};
use super::interior_layout::InteriorLayout;
use crate::core::geometry::{Area, Position};
use crate::display::Display;
use crate::input::MouseButton;

/// Renders one data element into one grid area.
///
/// Arguments: the display, the resolved area, the total element count,
/// the element index (area index plus scroll offset), and whether the
/// cursor is over this area.
pub type RenderFn = Box<dyn Fn(&mut Display, &Area, usize, usize, bool)>;

/// Tells how many elements the source currently holds.
pub type AmountFn = Box<dyn Fn() -> usize>;

/// An application data source: element count plus per-area renderer. The
/// data itself lives in whatever the two closures capture.
pub struct DataSource {
    amount: AmountFn,
    render: RenderFn,
}

impl DataSource {
    pub fn new(
        amount: impl Fn() -> usize + 'static,
        render: impl Fn(&mut Display, &Area, usize, usize, bool) + 'static,
    ) -> Self {
        Self {
            amount: Box::new(amount),
            render: Box::new(render),
        }
    }

    fn amount(&self) -> usize {
        (self.amount)()
    }
}

/// Scrollable list-like interior over a [`DataSource`].
pub struct ViewInterior {
    base: InteriorBase,
    source: DataSource,
    scroll_offset: usize,
}

impl ViewInterior {
    pub fn new(layout: InteriorLayout, source: DataSource) -> Self {
        Self {
            base: InteriorBase::new(layout),
            source,
            scroll_offset: 0,
        }
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Keep `offset <= max(0, amount - valid_areas)`.
    fn adjust_scroll_position(&mut self, limit: usize) {
        let valid_areas = self.base.layout.count_valid_areas();
        let max_scroll_offset = limit.saturating_sub(valid_areas);
        if self.scroll_offset >= max_scroll_offset {
            self.scroll_offset = max_scroll_offset;
        }
    }
}

impl Interior for ViewInterior {
    fn base(&self) -> &InteriorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InteriorBase {
        &mut self.base
    }

    fn recalculate(&mut self, panel_area: &Area) {
        self.base.layout.recalculate(panel_area);
        self.adjust_scroll_position(0);
    }

    fn render(&self, display: &mut Display) {
        let limit = self.source.amount();
        for (index, area) in self.base.layout.areas().iter().enumerate() {
            let hovered = self.base.last_hovered == Some(index);
            if area.is_visible() {
                (self.source.render)(
                    display,
                    &area.area,
                    limit,
                    index + self.scroll_offset,
                    hovered,
                );
            }
        }
    }

    fn scroll(&mut self, _pos: Position, button: MouseButton) {
        if button == MouseButton::SCROLL_UP {
            if self.scroll_offset == 0 {
                return;
            }
            self.scroll_offset -= 1;
            return;
        }

        self.scroll_offset += 1;
        let limit = self.source.amount();
        self.adjust_scroll_position(limit);
    }
}
