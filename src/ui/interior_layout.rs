// (C) 2025 - Enzo Lombardi

//! Interior grid solver.
//!
//! Columns and rows are declared as ordered lists of track definitions,
//! each possibly repeated. The solver expands them into per-track spans
//! inside the panel's padded area: fixed tracks consume their cell count,
//! relative tracks a percentage of the *remaining* length, never less than
//! one cell. A track that would leave less than one cell takes the rest;
//! tracks beyond the exhausted length become invalid spans. Content areas
//! reference inclusive track ranges and resolve to the union of their
//! spans, or to the invalid area when an endpoint track got no space.

use crate::core::geometry::{Area, Position, Span};
use crate::layout::SizeMethod;
use log::debug;

/// Tracks never shrink below one cell.
pub const MIN_TRACK_SIZE: u16 = 1;

/// One axis definition: `count` consecutive tracks of the given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackDef {
    pub size: u16,
    pub method: SizeMethod,
    pub count: u16,
}

impl TrackDef {
    /// `count` tracks of a fixed cell size.
    pub const fn fixed(size: u16, count: u16) -> Self {
        Self {
            size,
            method: SizeMethod::Fixed,
            count,
        }
    }

    /// `count` tracks sized as a percentage of the remaining length.
    pub const fn relative(percent: u16, count: u16) -> Self {
        Self {
            size: percent,
            method: SizeMethod::Relative,
            count,
        }
    }
}

/// A content area spanning inclusive track ranges on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaDef {
    pub columns: (u16, u16),
    pub rows: (u16, u16),
}

impl AreaDef {
    pub const fn new(columns: (u16, u16), rows: (u16, u16)) -> Self {
        Self { columns, rows }
    }

    /// A single-cell area at one track coordinate.
    pub const fn cell(column: u16, row: u16) -> Self {
        Self {
            columns: (column, column),
            rows: (row, row),
        }
    }
}

/// Inner offsets between the panel rectangle and the track grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub left: u16,
    pub right: u16,
    pub top: u16,
    pub bottom: u16,
}

impl Padding {
    /// One cell on every side - room for a panel border.
    pub const BORDER: Padding = Padding::uniform(1);

    pub const NONE: Padding = Padding::uniform(0);

    pub const fn uniform(cells: u16) -> Self {
        Self {
            left: cells,
            right: cells,
            top: cells,
            bottom: cells,
        }
    }
}

/// A configured area plus its most recently resolved rectangle.
#[derive(Debug, Clone, Copy)]
pub struct InteriorArea {
    def: AreaDef,
    pub area: Area,
}

impl InteriorArea {
    pub fn is_visible(&self) -> bool {
        self.area.is_valid()
    }
}

/// The grid: unrolled track definitions, their current spans, and the
/// configured content areas.
pub struct InteriorLayout {
    column_defs: Vec<(u16, SizeMethod)>,
    row_defs: Vec<(u16, SizeMethod)>,
    column_spans: Vec<Span>,
    row_spans: Vec<Span>,
    areas: Vec<InteriorArea>,
    padding: Padding,
}

impl InteriorLayout {
    pub fn new(columns: &[TrackDef], rows: &[TrackDef], padding: Padding) -> Self {
        assert!(!columns.is_empty(), "a grid needs at least one column");
        assert!(!rows.is_empty(), "a grid needs at least one row");
        Self {
            column_defs: unroll(columns),
            row_defs: unroll(rows),
            column_spans: Vec::new(),
            row_spans: Vec::new(),
            areas: Vec::new(),
            padding,
        }
    }

    /// Single full-size area over a 1x1 grid, the degenerate layout used
    /// by interiors that fill their panel.
    pub fn whole(padding: Padding) -> Self {
        let mut layout = Self::new(
            &[TrackDef::relative(100, 1)],
            &[TrackDef::relative(100, 1)],
            padding,
        );
        layout.add_area(AreaDef::cell(0, 0));
        layout
    }

    pub fn columns(&self) -> usize {
        self.column_defs.len()
    }

    pub fn rows(&self) -> usize {
        self.row_defs.len()
    }

    /// Register a content area. Ranges must be ordered and reference
    /// existing tracks.
    pub fn add_area(&mut self, def: AreaDef) {
        assert!(def.columns.0 <= def.columns.1, "column range reversed");
        assert!(def.rows.0 <= def.rows.1, "row range reversed");
        assert!(
            (def.columns.1 as usize) < self.column_defs.len(),
            "column range exceeds grid"
        );
        assert!((def.rows.1 as usize) < self.row_defs.len(), "row range exceeds grid");
        self.areas.push(InteriorArea {
            def,
            area: Area::INVALID,
        });
    }

    pub fn areas(&self) -> &[InteriorArea] {
        &self.areas
    }

    pub fn area(&self, index: usize) -> Option<&InteriorArea> {
        self.areas.get(index)
    }

    /// Resolve spans and areas inside a freshly placed panel rectangle.
    pub fn recalculate(&mut self, panel_area: &Area) {
        if !panel_area.is_valid() {
            self.column_spans = vec![Span::INVALID; self.column_defs.len()];
            self.row_spans = vec![Span::INVALID; self.row_defs.len()];
            for area in &mut self.areas {
                area.area = Area::INVALID;
            }
            return;
        }

        let width = panel_area
            .width()
            .saturating_sub(self.padding.left + self.padding.right);
        let height = panel_area
            .height()
            .saturating_sub(self.padding.top + self.padding.bottom);
        debug!(
            "interior grid over {} -> {}x{} cells",
            panel_area, width, height
        );

        calculate_spans(
            panel_area.first.x + self.padding.left,
            width,
            &self.column_defs,
            &mut self.column_spans,
        );
        calculate_spans(
            panel_area.first.y + self.padding.top,
            height,
            &self.row_defs,
            &mut self.row_spans,
        );

        for area in &mut self.areas {
            area.area = resolve_area(&area.def, &self.column_spans, &self.row_spans);
            debug!("area over columns {:?} rows {:?} = {}", area.def.columns, area.def.rows, area.area);
        }
    }

    /// Index of the first area containing `pos`.
    pub fn peek_area_index(&self, pos: Position) -> Option<usize> {
        self.areas.iter().position(|a| a.area.contains(pos))
    }

    /// How many areas resolved to visible rectangles.
    pub fn count_valid_areas(&self) -> usize {
        self.areas.iter().filter(|a| a.is_visible()).count()
    }
}

fn unroll(defs: &[TrackDef]) -> Vec<(u16, SizeMethod)> {
    let mut tracks = Vec::new();
    for def in defs {
        assert!(def.count > 0, "track definition with zero count");
        for _ in 0..def.count {
            tracks.push((def.size, def.method));
        }
    }
    tracks
}

fn calculate_spans(
    mut start: u16,
    mut length: u16,
    defs: &[(u16, SizeMethod)],
    spans: &mut Vec<Span>,
) {
    spans.clear();
    for &(def_size, method) in defs {
        if length == 0 {
            spans.push(Span::INVALID);
            continue;
        }

        let mut size = match method {
            SizeMethod::Fixed => def_size.max(MIN_TRACK_SIZE),
            SizeMethod::Relative => {
                ((def_size as u32 * length as u32 / 100) as u16).max(MIN_TRACK_SIZE)
            }
        };

        // No room for further tracks: consume the rest.
        if length < size || length - size < MIN_TRACK_SIZE {
            size = length;
        }

        spans.push(Span::new(start, start + size - 1));
        start += size;
        length -= size;
    }
}

fn resolve_area(def: &AreaDef, columns: &[Span], rows: &[Span]) -> Area {
    let first_column = columns[def.columns.0 as usize];
    let last_column = columns[def.columns.1 as usize];
    let first_row = rows[def.rows.0 as usize];
    let last_row = rows[def.rows.1 as usize];

    if first_column.is_invalid()
        || last_column.is_invalid()
        || first_row.is_invalid()
        || last_row.is_invalid()
    {
        return Area::INVALID;
    }

    Area::new(
        Position::new(first_column.start, first_row.start),
        Position::new(last_column.end, last_row.end),
    )
}
