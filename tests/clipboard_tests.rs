//! Clipboard bridge tests: copy/paste round trips, HTML-table paste, cut
//! semantics and the no-op failure policy.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use gridview::selection::SelectionController;
use gridview::source::{DataSource, MemorySource, RowSpace};
use gridview::types::{Cell, Column, GridConfig, RangeArea, RowRecord};
use serde_json::json;

fn record(pairs: &[(&str, serde_json::Value)]) -> RowRecord {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

fn fixture() -> (SelectionController, MemorySource) {
    let columns = vec![Column::new("a"), Column::new("b"), Column::new("c")];
    let rows = vec![
        record(&[("a", json!(1)), ("b", json!(2)), ("c", json!("x"))]),
        record(&[("a", json!(3)), ("b", json!(4)), ("c", json!("y"))]),
        record(&[("a", json!("")), ("b", json!("")), ("c", json!(""))]),
        record(&[("a", json!("")), ("b", json!("")), ("c", json!(""))]),
    ];
    (
        SelectionController::new(GridConfig::default(), Cell::new(3, 4)),
        MemorySource::new(columns, rows),
    )
}

#[test]
fn test_copy_serializes_selection_as_tsv() {
    let (mut ctl, source) = fixture();
    ctl.focus_at(Cell::new(0, 0), false);
    ctl.change_range(RangeArea::between(Cell::new(0, 0), Cell::new(1, 1)));
    assert_eq!(ctl.copy(&source).unwrap(), "1\t2\n3\t4");
}

#[test]
fn test_copy_without_selection_is_noop() {
    let (mut ctl, source) = fixture();
    assert!(ctl.copy(&source).is_none());
}

#[test]
fn test_copy_paste_round_trip() {
    let (mut ctl, mut source) = fixture();
    ctl.focus_at(Cell::new(0, 0), false);
    ctl.change_range(RangeArea::between(Cell::new(0, 0), Cell::new(1, 1)));
    let text = ctl.copy(&source).unwrap();

    // paste at a fresh anchor, never at the original copy location
    ctl.focus_at(Cell::new(0, 2), false);
    assert!(ctl.paste(&text, false, &mut source));
    assert_eq!(source.cell_value(RowSpace::Main, 2, 0), Some(json!("1")));
    assert_eq!(source.cell_value(RowSpace::Main, 2, 1), Some(json!("2")));
    assert_eq!(source.cell_value(RowSpace::Main, 3, 0), Some(json!("3")));
    assert_eq!(source.cell_value(RowSpace::Main, 3, 1), Some(json!("4")));
    // pasted area becomes the committed range
    assert_eq!(
        ctl.store.ranged(),
        Some(RangeArea::between(Cell::new(0, 2), Cell::new(1, 3)))
    );
}

#[test]
fn test_paste_html_table() {
    let (mut ctl, mut source) = fixture();
    ctl.focus_at(Cell::new(0, 2), false);
    let html = "<html><body><table><tr><td>h1</td><td>h2</td></tr>\
                <tr><td>h3</td><td>h4</td></tr></table></body></html>";
    assert!(ctl.paste(html, true, &mut source));
    assert_eq!(source.cell_value(RowSpace::Main, 2, 0), Some(json!("h1")));
    assert_eq!(source.cell_value(RowSpace::Main, 3, 1), Some(json!("h4")));
}

#[test]
fn test_paste_clamps_to_grid_bounds() {
    let (mut ctl, mut source) = fixture();
    ctl.focus_at(Cell::new(2, 3), false);
    assert!(ctl.paste("p\tq\nr\ts", false, &mut source));
    // only the in-bounds corner is written
    assert_eq!(source.cell_value(RowSpace::Main, 3, 2), Some(json!("p")));
}

#[test]
fn test_paste_without_focus_is_noop() {
    let (mut ctl, mut source) = fixture();
    assert!(!ctl.paste("1\t2", false, &mut source));
    assert_eq!(source.cell_value(RowSpace::Main, 0, 0), Some(json!(1)));
}

#[test]
fn test_paste_while_editing_is_noop() {
    let (mut ctl, mut source) = fixture();
    ctl.focus_at(Cell::new(0, 0), false);
    ctl.begin_edit(None, &source);
    assert!(!ctl.paste("z", false, &mut source));
}

#[test]
fn test_paste_veto_applies_nothing() {
    let (mut ctl, mut source) = fixture();
    ctl.focus_at(Cell::new(0, 2), false);
    ctl.hooks.before_paste.on(|ctx| ctx.prevent_default());
    assert!(!ctl.paste("1\t2", false, &mut source));
    assert_eq!(source.cell_value(RowSpace::Main, 2, 0), Some(json!("")));
}

#[test]
fn test_cut_copies_then_clears() {
    let (mut ctl, mut source) = fixture();
    ctl.focus_at(Cell::new(0, 0), false);
    ctl.change_range(RangeArea::between(Cell::new(0, 0), Cell::new(1, 1)));
    let text = ctl.cut(&mut source).unwrap();
    assert_eq!(text, "1\t2\n3\t4");
    assert_eq!(source.cell_value(RowSpace::Main, 0, 0), Some(json!("")));
    assert_eq!(source.cell_value(RowSpace::Main, 1, 1), Some(json!("")));
}

#[test]
fn test_cut_in_readonly_mode_only_copies() {
    let (mut ctl, mut source) = fixture();
    ctl.config.readonly = true;
    ctl.focus_at(Cell::new(0, 0), false);
    ctl.change_range(RangeArea::between(Cell::new(0, 0), Cell::new(1, 1)));
    let text = ctl.cut(&mut source).unwrap();
    assert_eq!(text, "1\t2\n3\t4");
    // region untouched
    assert_eq!(source.cell_value(RowSpace::Main, 0, 0), Some(json!(1)));
    assert_eq!(source.cell_value(RowSpace::Main, 1, 1), Some(json!(4)));
}

#[test]
fn test_cut_veto_is_a_full_noop() {
    let (mut ctl, mut source) = fixture();
    ctl.focus_at(Cell::new(0, 0), false);
    ctl.hooks.before_cut.on(|ctx| ctx.prevent_default());
    assert!(ctl.cut(&mut source).is_none());
    assert_eq!(source.cell_value(RowSpace::Main, 0, 0), Some(json!(1)));
}

#[test]
fn test_copy_apply_hook_can_rewrite_matrix() {
    let (mut ctl, source) = fixture();
    ctl.focus_at(Cell::new(0, 0), false);
    ctl.hooks.before_copy_apply.on(|ctx| {
        for row in &mut ctx.detail.matrix {
            for value in row {
                *value = json!("redacted");
            }
        }
    });
    assert_eq!(ctl.copy(&source).unwrap(), "redacted");
}

#[test]
fn test_malformed_paste_degrades_not_errors() {
    let (mut ctl, mut source) = fixture();
    ctl.focus_at(Cell::new(0, 2), false);
    // broken HTML with no table falls back to text parsing
    assert!(ctl.paste("<div><span>odd", true, &mut source));
    assert_eq!(
        source.cell_value(RowSpace::Main, 2, 0),
        Some(json!("<div><span>odd"))
    );
}
