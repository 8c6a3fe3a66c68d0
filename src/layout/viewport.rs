//! Pixel-space → cell-space mapping and virtualization windows.
//!
//! The mapper is a pure function of its inputs: a viewport-pixel point plus
//! the dimension state of the pane(s) under it. Points outside all known
//! extents map to `None`, which every caller treats as "no transition".

use crate::types::Cell;

use super::dimension::DimensionTable;

/// A point in viewport-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// Dimension state of a single pane: one table per axis plus that pane's own
/// scroll offsets (pinned panes simply keep their offsets at zero).
#[derive(Debug, Clone, Copy)]
pub struct PaneData<'a> {
    pub rows: &'a DimensionTable,
    pub cols: &'a DimensionTable,
    pub scroll_x: f32,
    pub scroll_y: f32,
}

/// Region of one axis: pinned band at the start, the scrollable middle, or a
/// pinned band at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    PinStart,
    Scrollable,
    PinEnd,
}

/// Geometry of one axis across its regions.
///
/// `pin_start` and `pin_end` may be empty tables when the grid has no pinned
/// band on that side. `viewport` is the visible pixel extent of the axis;
/// `scroll` applies to the scrollable region only — each pinned region is its
/// own, unscrolled coordinate space.
#[derive(Debug, Clone)]
pub struct AxisGeometry {
    pub pin_start: DimensionTable,
    pub scrollable: DimensionTable,
    pub pin_end: DimensionTable,
    pub scroll: f32,
    pub viewport: f32,
}

impl AxisGeometry {
    /// Scroll-free geometry with only a scrollable region.
    pub fn plain(scrollable: DimensionTable, viewport: f32) -> Self {
        AxisGeometry {
            pin_start: DimensionTable::default(),
            scrollable,
            pin_end: DimensionTable::default(),
            scroll: 0.0,
            viewport,
        }
    }

    /// Resolve a pixel position on this axis to `(pane, index)`.
    ///
    /// Pinned-start occupies `[0, pin_start.total)`, pinned-end is anchored
    /// to the far viewport edge, and the scrollable region fills the middle
    /// with its scroll offset applied. The returned index is local to the
    /// resolved pane.
    pub fn pane_at(&self, px: f32) -> Option<(Pane, usize)> {
        if px < 0.0 {
            return None;
        }
        let start_extent = self.pin_start.total_size();
        if px < start_extent {
            return self.pin_start.index_at(px).map(|i| (Pane::PinStart, i));
        }
        let end_extent = self.pin_end.total_size();
        if end_extent > 0.0 && px >= self.viewport - end_extent {
            return self
                .pin_end
                .index_at(px - (self.viewport - end_extent))
                .map(|i| (Pane::PinEnd, i));
        }
        self.scrollable
            .index_at(px - start_extent + self.scroll)
            .map(|i| (Pane::Scrollable, i))
    }
}

/// A mapped cell plus the panes it belongs to on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellHit {
    pub col_pane: Pane,
    pub row_pane: Pane,
    /// Coordinates local to the `(col_pane, row_pane)` pair.
    pub cell: Cell,
}

/// Map a point to a cell within a single pane.
///
/// Returns `None` when either axis falls outside the pane's extent.
pub fn cell_from_point(point: Point, data: &PaneData<'_>) -> Option<Cell> {
    let x = data.cols.index_at(point.x + data.scroll_x)?;
    let y = data.rows.index_at(point.y + data.scroll_y)?;
    Some(Cell::new(x, y))
}

/// Map a point to a cell across pinned and scrollable regions.
///
/// Each axis resolves independently, so e.g. a point over the pinned-left
/// band still picks up its row from the scrolled main region.
pub fn cell_at(point: Point, rows: &AxisGeometry, cols: &AxisGeometry) -> Option<CellHit> {
    let (col_pane, x) = cols.pane_at(point.x)?;
    let (row_pane, y) = rows.pane_at(point.y)?;
    Some(CellHit {
        col_pane,
        row_pane,
        cell: Cell::new(x, y),
    })
}

/// Inclusive range of visible items for a scrolled region.
///
/// Clamps to the last item so the window always closes on a real index;
/// `None` for an empty table.
pub fn visible_range(table: &DimensionTable, scroll: f32, extent: f32) -> Option<(usize, usize)> {
    let first = table.index_at_clamped(scroll)?;
    let last = table.index_at_clamped(scroll + extent.max(0.0))?;
    Some((first, last))
}
