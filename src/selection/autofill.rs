//! Drag-fill gestures and range application.
//!
//! One service handles both drag flavors: extending the committed selection
//! while the pointer is down, and the fill-handle drag that previews a
//! `temp_range` and replicates the anchor's values across it on release.
//! `on_range_apply` is the shared mutation path also used by paste and
//! clear-cell.

use crate::hooks::{GridHooks, RangeDataDetail};
use crate::layout::{cell_from_point, PaneData, Point};
use crate::source::{DataSource, RowSpace};
use crate::types::{Cell, CellValue, RangeArea};

use super::controller::commit_range;
use super::store::SelectionStore;

/// Which drag flavor a gesture is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillKind {
    /// Plain drag-to-select: extends the committed range.
    Selection,
    /// Fill-handle drag: previews a temp range, applies values on release.
    AutoFill,
}

/// Axis a fill gesture is locked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FillAxis {
    Rows,
    Cols,
}

#[derive(Debug)]
struct FillGesture {
    kind: FillKind,
    anchor: RangeArea,
    start_point: Point,
    /// Locked at the first pointer movement for the gesture's lifetime.
    axis: Option<FillAxis>,
}

/// Drag-fill state machine.
#[derive(Debug, Default)]
pub struct AutoFillService {
    gesture: Option<FillGesture>,
}

impl AutoFillService {
    /// Whether a drag gesture is active.
    pub fn in_progress(&self) -> bool {
        self.gesture.is_some()
    }

    /// Begin a drag gesture anchored at the current focus/range.
    ///
    /// No-op when nothing is focused.
    pub fn selection_start(&mut self, point: Point, store: &SelectionStore, kind: FillKind) {
        let Some(anchor) = store.range_or_focus() else {
            return;
        };
        self.gesture = Some(FillGesture {
            kind,
            anchor,
            start_point: point,
            axis: None,
        });
    }

    /// Recompute the drag preview for the pointer's current position.
    pub fn selection_mouse_move(
        &mut self,
        point: Point,
        data: &PaneData<'_>,
        store: &mut SelectionStore,
        hooks: &mut GridHooks,
    ) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        let Some(cell) = cell_from_point(point, data) else {
            return;
        };
        match gesture.kind {
            FillKind::Selection => {
                let Some(focus) = store.focused() else {
                    return;
                };
                let range = RangeArea::between(focus, cell);
                if store.ranged() != Some(range) {
                    commit_range(store, hooks, range);
                }
            }
            FillKind::AutoFill => {
                if gesture.axis.is_none() {
                    let dx = (point.x - gesture.start_point.x).abs();
                    let dy = (point.y - gesture.start_point.y).abs();
                    if dx <= f32::EPSILON && dy <= f32::EPSILON {
                        return;
                    }
                    // Dominant direction at drag start decides row-wise vs
                    // column-wise for the whole gesture.
                    gesture.axis = Some(if dy > dx { FillAxis::Rows } else { FillAxis::Cols });
                }
                let anchor = gesture.anchor;
                let temp = match gesture.axis {
                    Some(FillAxis::Rows) => RangeArea {
                        x: anchor.x,
                        x1: anchor.x1,
                        y: anchor.y.min(cell.y),
                        y1: anchor.y1.max(cell.y),
                    },
                    Some(FillAxis::Cols) => RangeArea {
                        x: anchor.x.min(cell.x),
                        x1: anchor.x1.max(cell.x),
                        y: anchor.y,
                        y1: anchor.y1,
                    },
                    None => anchor,
                };
                store.set_temp_range(Some(temp));
            }
        }
    }

    /// End the active gesture.
    ///
    /// A fill-handle gesture with a preview promotes it: the anchor's values
    /// are tiled across the extended range through the data source, gated by
    /// the `before_range_data_apply` hook carrying the full rectangle.
    pub fn clear_auto_fill_selection(
        &mut self,
        store: &mut SelectionStore,
        hooks: &mut GridHooks,
        source: &mut dyn DataSource,
        space: RowSpace,
    ) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        if gesture.kind != FillKind::AutoFill {
            return;
        }
        if let Some(temp) = store.temp_range() {
            if temp != gesture.anchor {
                let anchor_matrix = read_matrix(source, space, gesture.anchor);
                self.on_range_apply(anchor_matrix, temp, store, hooks, source, space);
            }
        }
        store.set_temp_range(None);
    }

    /// Apply a value matrix to an explicit range, independent of drag state.
    ///
    /// The matrix is tiled (wrapping) when smaller than the range and
    /// truncated when larger. Returns `false` when the payload was empty or
    /// a hook vetoed the apply.
    pub fn on_range_apply(
        &mut self,
        matrix: Vec<Vec<CellValue>>,
        range: RangeArea,
        store: &mut SelectionStore,
        hooks: &mut GridHooks,
        source: &mut dyn DataSource,
        space: RowSpace,
    ) -> bool {
        let full = tile_matrix(&matrix, range);
        if full.is_empty() {
            return false;
        }
        let ev = hooks
            .before_range_data_apply
            .emit(RangeDataDetail {
                matrix: full,
                range,
            });
        if ev.default_prevented() {
            return false;
        }
        let RangeDataDetail { matrix, range } = ev.detail;
        for (i, y) in (range.y..=range.y1).enumerate() {
            for (j, x) in (range.x..=range.x1).enumerate() {
                if let Some(value) = matrix.get(i).and_then(|row| row.get(j)) {
                    // a failed write (readonly space, lazy store) is a no-op
                    let _ = source.set_cell_value(space, y, x, value.clone());
                }
            }
        }
        hooks.range_data_applied.emit(RangeDataDetail { matrix, range });
        commit_range(store, hooks, range);
        true
    }
}

/// Read the values of `range` from the data source, row-major.
pub(crate) fn read_matrix(
    source: &dyn DataSource,
    space: RowSpace,
    range: RangeArea,
) -> Vec<Vec<CellValue>> {
    (range.y..=range.y1)
        .map(|y| {
            (range.x..=range.x1)
                .map(|x| source.cell_value(space, y, x).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect()
}

/// Expand `matrix` to exactly cover `range`, wrapping both axes.
fn tile_matrix(matrix: &[Vec<CellValue>], range: RangeArea) -> Vec<Vec<CellValue>> {
    let height = matrix.len();
    if height == 0 {
        return Vec::new();
    }
    (0..range.height())
        .map(|r| {
            let row = matrix.get(r % height).map(Vec::as_slice).unwrap_or(&[]);
            let width = row.len();
            (0..range.width())
                .map(|c| {
                    if width == 0 {
                        CellValue::Null
                    } else {
                        row.get(c % width).cloned().unwrap_or(CellValue::Null)
                    }
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;

    fn range(x: usize, y: usize, x1: usize, y1: usize) -> RangeArea {
        RangeArea { x, y, x1, y1 }
    }

    #[test]
    fn test_tile_single_value() {
        let tiled = tile_matrix(&[vec![json!("x")]], range(0, 0, 2, 0));
        assert_eq!(tiled, vec![vec![json!("x"), json!("x"), json!("x")]]);
    }

    #[test]
    fn test_tile_wraps_pattern() {
        let tiled = tile_matrix(&[vec![json!("a"), json!("b")]], range(0, 0, 4, 0));
        assert_eq!(
            tiled,
            vec![vec![json!("a"), json!("b"), json!("a"), json!("b"), json!("a")]]
        );
    }

    #[test]
    fn test_tile_truncates_larger_matrix() {
        let tiled = tile_matrix(
            &[
                vec![json!(1), json!(2), json!(3)],
                vec![json!(4), json!(5), json!(6)],
            ],
            range(0, 0, 0, 0),
        );
        assert_eq!(tiled, vec![vec![json!(1)]]);
    }

    #[test]
    fn test_tile_wraps_rows() {
        let tiled = tile_matrix(&[vec![json!("a")], vec![json!("b")]], range(0, 0, 0, 4));
        let flat: Vec<_> = tiled.iter().map(|r| r[0].clone()).collect();
        assert_eq!(
            flat,
            vec![json!("a"), json!("b"), json!("a"), json!("b"), json!("a")]
        );
    }

    #[test]
    fn test_empty_matrix_yields_nothing() {
        assert!(tile_matrix(&[], range(0, 0, 3, 3)).is_empty());
    }
}
