//! Pointer/keyboard-driven selection state machine.
//!
//! Owns the transitions between idle, focused, ranging and editing. Every
//! transition that changes externally visible state announces itself first
//! through a cancelable hook; a veto stops the transition before any store
//! mutation. Arrow navigation at a viewport edge does not move the focus —
//! it emits `before_next_viewport_focus` and hands control to the sibling
//! pane collaborator.

use crate::clipboard::{parse_payload, serialize_matrix};
use crate::hooks::{
    ApplyFocusDetail, CopyApplyDetail, CopyDetail, EditDetail, FocusCommittedDetail, FocusDetail,
    GridHooks, NextViewportDetail, PasteApplyDetail, PasteDetail, RangeDetail, SaveDetail,
};
use crate::layout::{cell_from_point, PaneData, Point};
use crate::source::{DataSource, RowSpace};
use crate::types::{Cell, CellValue, EditCell, GridConfig, RangeArea};

use super::autofill::{read_matrix, AutoFillService, FillKind};
use super::keyboard::{resolve, Key, KeyAction, KeyCombo};
use super::store::SelectionStore;

/// Commit a range through the `before_range_apply` → `range_committed`
/// chain. Shared by the controller and the autofill service.
pub(crate) fn commit_range(
    store: &mut SelectionStore,
    hooks: &mut GridHooks,
    range: RangeArea,
) -> bool {
    let ev = hooks.before_range_apply.emit(RangeDetail { range });
    if ev.default_prevented() {
        return false;
    }
    let range = ev.detail.range;
    store.set_range(range);
    hooks.range_committed.emit(RangeDetail { range });
    true
}

/// Step an index by a signed delta inside `[0, len)`.
fn step(value: usize, delta: isize, len: usize) -> Option<usize> {
    if delta >= 0 {
        let next = value.checked_add(delta.unsigned_abs())?;
        (next < len).then_some(next)
    } else {
        value.checked_sub(delta.unsigned_abs())
    }
}

/// Selection controller for one pane.
pub struct SelectionController {
    pub store: SelectionStore,
    pub hooks: GridHooks,
    pub config: GridConfig,
    autofill: AutoFillService,
    /// Exclusive bounds of this pane: column count and row count.
    last_cell: Cell,
    /// Row space this pane's rows live in.
    space: RowSpace,
}

impl SelectionController {
    pub fn new(config: GridConfig, last_cell: Cell) -> Self {
        SelectionController {
            store: SelectionStore::new(),
            hooks: GridHooks::default(),
            config,
            autofill: AutoFillService::default(),
            last_cell,
            space: RowSpace::Main,
        }
    }

    /// Pane bounds (column count, row count).
    pub fn last_cell(&self) -> Cell {
        self.last_cell
    }

    /// Update pane bounds after a viewport/source change.
    pub fn set_last_cell(&mut self, last_cell: Cell) {
        self.last_cell = last_cell;
    }

    /// Bind this controller to a pinned row space.
    pub fn set_row_space(&mut self, space: RowSpace) {
        self.space = space;
    }

    pub fn row_space(&self) -> RowSpace {
        self.space
    }

    // ---- pointer ----

    /// Pointer-down over the pane. Resolves the cell under the pointer,
    /// focuses it (or extends the range on shift), and arms the drag-select
    /// gesture. Returns `true` when a cell was hit.
    pub fn pointer_down(&mut self, point: Point, data: &PaneData<'_>, shift: bool) -> bool {
        let Some(cell) = cell_from_point(point, data) else {
            return false;
        };
        self.focus_at(cell, shift && self.config.range);
        if self.config.range {
            self.autofill
                .selection_start(point, &self.store, FillKind::Selection);
        }
        true
    }

    /// Pointer-down on the fill handle: arms the autofill gesture.
    pub fn fill_handle_down(&mut self, point: Point) {
        if self.config.range && !self.config.readonly {
            self.autofill
                .selection_start(point, &self.store, FillKind::AutoFill);
        }
    }

    /// Pointer movement while a gesture is active.
    pub fn pointer_move(&mut self, point: Point, data: &PaneData<'_>) {
        if self.store.focused().is_some() {
            self.autofill
                .selection_mouse_move(point, data, &mut self.store, &mut self.hooks);
        }
    }

    /// Pointer released (or left the document): finish any gesture.
    pub fn pointer_up(&mut self, source: &mut dyn DataSource) {
        self.autofill
            .clear_auto_fill_selection(&mut self.store, &mut self.hooks, source, self.space);
    }

    /// Whether a drag gesture is currently active.
    pub fn gesture_in_progress(&self) -> bool {
        self.autofill.in_progress()
    }

    // ---- focus & range ----

    /// Focus a cell, or extend the range toward it.
    pub fn focus_at(&mut self, cell: Cell, extend: bool) -> bool {
        if extend {
            if let Some(focus) = self.store.focused() {
                return self.change_range(RangeArea::between(focus, cell));
            }
        }
        self.do_focus(cell)
    }

    /// Run the focus hook chain and commit. The `before_focus` and
    /// `apply_focus` hooks may substitute the destination; a veto in either
    /// leaves the prior focus, range and edit untouched.
    fn do_focus(&mut self, cell: Cell) -> bool {
        let ev = self.hooks.before_focus.emit(FocusDetail { cell });
        if ev.default_prevented() {
            return false;
        }
        let apply = self.hooks.apply_focus.emit(ApplyFocusDetail {
            range: RangeArea::single(ev.detail.cell),
        });
        if apply.default_prevented() {
            return false;
        }
        let range = apply.detail.range;
        let focus = range.start();
        let end = range.end();
        self.store.set_focus(focus);
        if end != focus && self.config.range {
            self.store.set_range(range);
        }
        self.hooks
            .focus_committed
            .emit(FocusCommittedDetail { focus, end });
        true
    }

    /// Commit a new range, keeping the focus corner.
    pub fn change_range(&mut self, range: RangeArea) -> bool {
        commit_range(&mut self.store, &mut self.hooks, range)
    }

    /// Select the entire pane.
    pub fn select_all(&mut self) -> bool {
        if self.last_cell.x == 0 || self.last_cell.y == 0 {
            return false;
        }
        let ev = self.hooks.select_all.emit(());
        if ev.default_prevented() {
            return false;
        }
        if self.store.focused().is_none() {
            self.store.set_focus(Cell::new(0, 0));
        }
        self.change_range(RangeArea {
            x: 0,
            y: 0,
            x1: self.last_cell.x - 1,
            y1: self.last_cell.y - 1,
        })
    }

    // ---- keyboard ----

    /// Handle a key while the grid (not an editor input) has key focus.
    ///
    /// Returns `true` when the key was consumed.
    pub fn key_down(&mut self, combo: KeyCombo, source: &mut dyn DataSource) -> bool {
        if self.store.edited().is_some() {
            // the editor input owns every key except Escape
            if combo.key == Key::Escape {
                self.close_edit();
                return true;
            }
            return false;
        }
        match resolve(combo, self.config.range) {
            KeyAction::Move { dx, dy } => self.step_focus(dx, dy),
            KeyAction::Extend { dx, dy } => self.extend_range(dx, dy),
            KeyAction::Edit { seed } => self.begin_edit(seed, source),
            KeyAction::CancelEdit => false,
            KeyAction::ClearCell => self.clear_cell(source),
            KeyAction::SelectAll => self.select_all(),
            KeyAction::None => false,
        }
    }

    /// Move the focus by one step; at a pane edge, emit
    /// `before_next_viewport_focus` instead and stay put.
    pub fn step_focus(&mut self, dx: isize, dy: isize) -> bool {
        let Some(focus) = self.store.focused() else {
            return false;
        };
        let next = step(focus.x, dx, self.last_cell.x)
            .zip(step(focus.y, dy, self.last_cell.y))
            .map(|(x, y)| Cell::new(x, y));
        match next {
            Some(cell) => self.do_focus(cell),
            None => {
                self.hooks
                    .before_next_viewport_focus
                    .emit(NextViewportDetail { focus, dx, dy });
                true
            }
        }
    }

    /// Extend the range end by one step, clamped to the pane. The original
    /// focus stays as one corner.
    fn extend_range(&mut self, dx: isize, dy: isize) -> bool {
        let Some(focus) = self.store.focused() else {
            return false;
        };
        let end = self
            .store
            .ranged()
            .map(|r| {
                // the corner opposite the focus
                Cell::new(
                    if r.x == focus.x { r.x1 } else { r.x },
                    if r.y == focus.y { r.y1 } else { r.y },
                )
            })
            .unwrap_or(focus);
        let next = Cell::new(
            step(end.x, dx, self.last_cell.x).unwrap_or(end.x),
            step(end.y, dy, self.last_cell.y).unwrap_or(end.y),
        );
        self.change_range(RangeArea::between(focus, next))
    }

    // ---- editing ----

    /// Whether the focused cell accepts an edit.
    ///
    /// False when the grid is globally readonly, nothing is focused, or the
    /// focused cell's column is marked readonly.
    pub fn can_edit(&self, source: &dyn DataSource) -> bool {
        if self.config.readonly {
            return false;
        }
        let Some(focus) = self.store.focused() else {
            return false;
        };
        let Some(column) = source.columns().get(focus.x) else {
            return false;
        };
        if column.readonly {
            return false;
        }
        if let Some(cell_readonly) = column.cell_readonly.clone() {
            let marked = source
                .store(self.space)
                .and_then(|s| s.record(focus.y))
                .is_some_and(|record| cell_readonly(record));
            if marked {
                return false;
            }
        }
        true
    }

    /// Begin editing the focused cell. Fails silently (no transition) when
    /// the edit gate rejects it or a hook vetoes.
    ///
    /// `seed` replaces the cell's current value in the editor (typing over a
    /// cell); `None` seeds the editor with the current value.
    pub fn begin_edit(&mut self, seed: Option<String>, source: &dyn DataSource) -> bool {
        if !self.can_edit(source) {
            return false;
        }
        let Some(focus) = self.store.focused() else {
            return false;
        };
        let Some(column) = source.columns().get(focus.x) else {
            return false;
        };
        let value = seed.or_else(|| {
            source
                .cell_value(self.space, focus.y, focus.x)
                .map(|v| crate::types::value_text(&v))
        });
        let edit = EditCell {
            cell: focus,
            prop: column.prop.clone(),
            value,
            editor: column.editor.clone(),
        };
        let ev = self.hooks.before_set_edit.emit(EditDetail { edit });
        if ev.default_prevented() {
            return false;
        }
        self.store.set_edit(Some(ev.detail.edit));
        true
    }

    /// Confirm the active edit: save through `before_cell_save`, close the
    /// editor, then advance the focus (down for Enter, right for Tab) unless
    /// `prevent_focus` or a hook asked otherwise.
    pub fn save_edit(
        &mut self,
        value: CellValue,
        advance: (isize, isize),
        source: &mut dyn DataSource,
    ) -> bool {
        let Some(edit) = self.store.edited().cloned() else {
            return false;
        };
        let ev = self.hooks.before_cell_save.emit(SaveDetail {
            cell: edit.cell,
            prop: edit.prop.clone(),
            value,
            prevent_focus: false,
        });
        let saved = if ev.default_prevented() {
            false
        } else {
            source
                .set_cell_value(self.space, edit.cell.y, edit.cell.x, ev.detail.value.clone())
                .is_ok()
        };
        self.store.set_edit(None);
        if !ev.detail.prevent_focus && (advance.0 != 0 || advance.1 != 0) {
            self.step_focus(advance.0, advance.1);
        }
        saved
    }

    /// Cancel the active edit, discarding its pending value. The prior focus
    /// is untouched.
    pub fn close_edit(&mut self) {
        if self.store.edited().is_none() {
            return;
        }
        self.hooks.cancel_edit.emit(());
        self.store.set_edit(None);
    }

    // ---- range data ----

    /// Clear the selected range, or the focused cell.
    pub fn clear_cell(&mut self, source: &mut dyn DataSource) -> bool {
        if self.config.readonly {
            return false;
        }
        if let Some(range) = self.store.ranged().filter(|r| !r.is_single()) {
            return self.autofill.on_range_apply(
                vec![vec![CellValue::String(String::new())]],
                range,
                &mut self.store,
                &mut self.hooks,
                source,
                self.space,
            );
        }
        if !self.can_edit(source) {
            return false;
        }
        let Some(focus) = self.store.focused() else {
            return false;
        };
        let Some(prop) = source.columns().get(focus.x).map(|c| c.prop.clone()) else {
            return false;
        };
        let ev = self.hooks.before_cell_save.emit(SaveDetail {
            cell: focus,
            prop,
            value: CellValue::String(String::new()),
            prevent_focus: true,
        });
        if ev.default_prevented() {
            return false;
        }
        source
            .set_cell_value(self.space, focus.y, focus.x, ev.detail.value.clone())
            .is_ok()
    }

    /// Apply an explicit matrix to an explicit range (paste and programmatic
    /// writes).
    pub fn apply_range_data(
        &mut self,
        matrix: Vec<Vec<CellValue>>,
        range: RangeArea,
        source: &mut dyn DataSource,
    ) -> bool {
        self.autofill.on_range_apply(
            matrix,
            range,
            &mut self.store,
            &mut self.hooks,
            source,
            self.space,
        )
    }

    // ---- clipboard ----

    /// Serialize the current selection for the clipboard.
    ///
    /// An empty selection is a no-op (`None`), not an error.
    pub fn copy(&mut self, source: &dyn DataSource) -> Option<String> {
        let range = self.store.range_or_focus()?;
        let ev = self.hooks.before_copy.emit(CopyDetail { range });
        if ev.default_prevented() {
            return None;
        }
        let range = ev.detail.range;
        let matrix = read_matrix(source, self.space, range);
        let apply = self
            .hooks
            .before_copy_apply
            .emit(CopyApplyDetail { matrix, range });
        if apply.default_prevented() {
            return None;
        }
        Some(serialize_matrix(&apply.detail.matrix))
    }

    /// Parse a clipboard payload and apply it anchored at the focus.
    ///
    /// Missing focus, an open editor, readonly mode, or an empty payload are
    /// all no-ops.
    pub fn paste(&mut self, raw: &str, is_html: bool, source: &mut dyn DataSource) -> bool {
        if self.config.readonly || self.store.edited().is_some() {
            return false;
        }
        let Some(focus) = self.store.focused() else {
            return false;
        };
        let ev = self.hooks.before_paste.emit(PasteDetail {
            raw: raw.to_string(),
            is_html,
        });
        if ev.default_prevented() {
            return false;
        }
        let parsed = parse_payload(&ev.detail.raw, ev.detail.is_html);
        let apply = self.hooks.before_paste_apply.emit(PasteApplyDetail { parsed });
        if apply.default_prevented() {
            return false;
        }
        let parsed = apply.detail.parsed;
        let height = parsed.len();
        let width = parsed.iter().map(Vec::len).max().unwrap_or(0);
        if height == 0 || width == 0 || self.last_cell.x == 0 || self.last_cell.y == 0 {
            return false;
        }
        let range = RangeArea {
            x: focus.x,
            y: focus.y,
            x1: (focus.x + width - 1).min(self.last_cell.x - 1),
            y1: (focus.y + height - 1).min(self.last_cell.y - 1),
        };
        let matrix = parsed
            .into_iter()
            .map(|row| row.into_iter().map(CellValue::String).collect())
            .collect();
        self.apply_range_data(matrix, range, source)
    }

    /// Cut: copy, then clear the copied region — unless readonly, in which
    /// case only the copy half executes.
    pub fn cut(&mut self, source: &mut dyn DataSource) -> Option<String> {
        let ev = self.hooks.before_cut.emit(());
        if ev.default_prevented() {
            return None;
        }
        let text = self.copy(source)?;
        if !self.config.readonly {
            self.clear_cell(source);
        }
        Some(text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_step_bounds() {
        assert_eq!(step(0, -1, 10), None);
        assert_eq!(step(9, 1, 10), None);
        assert_eq!(step(4, 1, 10), Some(5));
        assert_eq!(step(4, -1, 10), Some(3));
        assert_eq!(step(4, 0, 10), Some(4));
    }
}
