//! Autofill tests: drag gestures, dominant-axis lock, temp-range preview,
//! wrap tiling and the atomic apply hook.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use std::cell::RefCell;
use std::rc::Rc;

use gridview::layout::{DimensionTable, PaneData, Point};
use gridview::selection::SelectionController;
use gridview::source::{DataSource, MemorySource, RowSpace};
use gridview::types::{Cell, Column, GridConfig, RangeArea, RowRecord};
use serde_json::json;

const ROW_H: f32 = 20.0;
const COL_W: f32 = 64.0;

fn record(pairs: &[(&str, serde_json::Value)]) -> RowRecord {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

struct Fixture {
    ctl: SelectionController,
    source: MemorySource,
    rows: DimensionTable,
    cols: DimensionTable,
}

impl Fixture {
    fn new(row_count: usize) -> Self {
        let columns = vec![Column::new("a"), Column::new("b"), Column::new("c")];
        let data = (0..row_count)
            .map(|i| {
                record(&[
                    ("a", json!(format!("a{i}"))),
                    ("b", json!(format!("b{i}"))),
                    ("c", json!(format!("c{i}"))),
                ])
            })
            .collect();
        Fixture {
            ctl: SelectionController::new(GridConfig::default(), Cell::new(3, row_count)),
            source: MemorySource::new(columns, data),
            rows: DimensionTable::uniform(row_count, ROW_H),
            cols: DimensionTable::uniform(3, COL_W),
        }
    }

    /// Center point of a cell in viewport pixels.
    fn center(cell: Cell) -> Point {
        Point::new(
            (cell.x as f32 + 0.5) * COL_W,
            (cell.y as f32 + 0.5) * ROW_H,
        )
    }
}

#[test]
fn test_single_value_fills_down_a_column() {
    let mut f = Fixture::new(6);
    f.ctl.focus_at(Cell::new(0, 0), false);
    f.ctl.fill_handle_down(Fixture::center(Cell::new(0, 0)));
    // drag straight down over two more rows
    let pane = PaneData {
        rows: &f.rows,
        cols: &f.cols,
        scroll_x: 0.0,
        scroll_y: 0.0,
    };
    f.ctl.pointer_move(Fixture::center(Cell::new(0, 2)), &pane);
    assert_eq!(
        f.ctl.store.temp_range(),
        Some(RangeArea::between(Cell::new(0, 0), Cell::new(0, 2)))
    );
    f.ctl.pointer_up(&mut f.source);
    for y in 0..3 {
        assert_eq!(
            f.source.cell_value(RowSpace::Main, y, 0),
            Some(json!("a0")),
            "row {y} should carry the anchor value"
        );
    }
    // preview cleared, fill promoted into the committed range
    assert!(f.ctl.store.temp_range().is_none());
    assert_eq!(
        f.ctl.store.ranged(),
        Some(RangeArea::between(Cell::new(0, 0), Cell::new(0, 2)))
    );
}

#[test]
fn test_two_cell_pattern_wraps_across_five() {
    let mut f = Fixture::new(6);
    // anchor a vertical 2-cell pattern in column b
    f.source
        .set_cell_value(RowSpace::Main, 0, 1, json!("a"))
        .unwrap();
    f.source
        .set_cell_value(RowSpace::Main, 1, 1, json!("b"))
        .unwrap();
    f.ctl.focus_at(Cell::new(1, 0), false);
    f.ctl.change_range(RangeArea::between(Cell::new(1, 0), Cell::new(1, 1)));

    f.ctl.fill_handle_down(Fixture::center(Cell::new(1, 1)));
    let pane = PaneData {
        rows: &f.rows,
        cols: &f.cols,
        scroll_x: 0.0,
        scroll_y: 0.0,
    };
    f.ctl.pointer_move(Fixture::center(Cell::new(1, 4)), &pane);
    f.ctl.pointer_up(&mut f.source);

    let got: Vec<_> = (0..5)
        .map(|y| f.source.cell_value(RowSpace::Main, y, 1).unwrap())
        .collect();
    assert_eq!(
        got,
        vec![json!("a"), json!("b"), json!("a"), json!("b"), json!("a")]
    );
}

#[test]
fn test_dominant_axis_is_locked_at_gesture_start() {
    let mut f = Fixture::new(8);
    f.ctl.focus_at(Cell::new(0, 0), false);
    f.ctl.fill_handle_down(Fixture::center(Cell::new(0, 0)));
    let pane = PaneData {
        rows: &f.rows,
        cols: &f.cols,
        scroll_x: 0.0,
        scroll_y: 0.0,
    };
    // first movement is clearly vertical: gesture locks to rows
    f.ctl.pointer_move(Fixture::center(Cell::new(0, 3)), &pane);
    // later movement drifts horizontally; the lock must hold
    f.ctl.pointer_move(Fixture::center(Cell::new(2, 4)), &pane);
    let temp = f.ctl.store.temp_range().unwrap();
    assert_eq!(temp.x, 0);
    assert_eq!(temp.x1, 0, "row-wise fill must not grow columns");
    assert_eq!(temp.y1, 4);
    f.ctl.pointer_up(&mut f.source);
}

#[test]
fn test_apply_hook_carries_full_rectangle_and_can_veto() {
    let mut f = Fixture::new(6);
    let seen = Rc::new(RefCell::new(None));
    {
        let seen = Rc::clone(&seen);
        f.ctl.hooks.before_range_data_apply.on(move |ctx| {
            *seen.borrow_mut() = Some((ctx.detail.range, ctx.detail.matrix.clone()));
            ctx.prevent_default();
        });
    }
    f.ctl.focus_at(Cell::new(0, 0), false);
    f.ctl.fill_handle_down(Fixture::center(Cell::new(0, 0)));
    let pane = PaneData {
        rows: &f.rows,
        cols: &f.cols,
        scroll_x: 0.0,
        scroll_y: 0.0,
    };
    f.ctl.pointer_move(Fixture::center(Cell::new(0, 2)), &pane);
    f.ctl.pointer_up(&mut f.source);

    // hook saw the full tiled rectangle
    let (range, matrix) = seen.borrow().clone().unwrap();
    assert_eq!(range, RangeArea::between(Cell::new(0, 0), Cell::new(0, 2)));
    assert_eq!(matrix.len(), 3);
    // veto: the data source is untouched and no range was committed
    assert_eq!(f.source.cell_value(RowSpace::Main, 1, 0), Some(json!("a1")));
    assert_eq!(f.source.cell_value(RowSpace::Main, 2, 0), Some(json!("a2")));
    assert!(f.ctl.store.ranged().is_none());
}

#[test]
fn test_drag_select_extends_committed_range() {
    let mut f = Fixture::new(6);
    let pane = PaneData {
        rows: &f.rows,
        cols: &f.cols,
        scroll_x: 0.0,
        scroll_y: 0.0,
    };
    assert!(f
        .ctl
        .pointer_down(Fixture::center(Cell::new(0, 0)), &pane, false));
    f.ctl.pointer_move(Fixture::center(Cell::new(2, 2)), &pane);
    assert_eq!(
        f.ctl.store.ranged(),
        Some(RangeArea::between(Cell::new(0, 0), Cell::new(2, 2)))
    );
    f.ctl.pointer_up(&mut f.source);
    // plain drag-select applies no data
    assert_eq!(f.source.cell_value(RowSpace::Main, 2, 2), Some(json!("c2")));
}

#[test]
fn test_programmatic_apply_truncates_oversized_matrix() {
    let mut f = Fixture::new(6);
    f.ctl.focus_at(Cell::new(0, 0), false);
    let matrix = vec![
        vec![json!(1), json!(2), json!(3)],
        vec![json!(4), json!(5), json!(6)],
    ];
    let range = RangeArea::single(Cell::new(0, 0));
    assert!(f.ctl.apply_range_data(matrix, range, &mut f.source));
    assert_eq!(f.source.cell_value(RowSpace::Main, 0, 0), Some(json!(1)));
    // the rest of the matrix was truncated away
    assert_eq!(f.source.cell_value(RowSpace::Main, 0, 1), Some(json!("b0")));
    assert_eq!(f.source.cell_value(RowSpace::Main, 1, 0), Some(json!("a1")));
}

#[test]
fn test_fill_handle_ignored_when_readonly() {
    let mut f = Fixture::new(6);
    f.ctl.config.readonly = true;
    f.ctl.focus_at(Cell::new(0, 0), false);
    f.ctl.fill_handle_down(Fixture::center(Cell::new(0, 0)));
    assert!(!f.ctl.gesture_in_progress());
}
