//! Observable selection/range store.
//!
//! Single source of truth for `focus` / `range` / `temp_range` / `edit`.
//! Every mutation commits the whole transition first, then notifies the
//! listeners of each changed key synchronously, in registration order — a
//! listener can never observe a half-applied transition (e.g. a moved focus
//! next to a stale range). Two writers in the same tick resolve
//! last-write-wins per key; there is no merging.

use crate::types::{Cell, EditCell, RangeArea, SelectionState};

type Listener<T> = Box<dyn FnMut(Option<&T>)>;

/// Observable holder of the grid's selection state.
#[derive(Default)]
pub struct SelectionStore {
    state: SelectionState,
    focus_listeners: Vec<Listener<Cell>>,
    range_listeners: Vec<Listener<RangeArea>>,
    temp_range_listeners: Vec<Listener<RangeArea>>,
    edit_listeners: Vec<Listener<EditCell>>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- accessors ----

    /// Current focus cell.
    pub fn focused(&self) -> Option<Cell> {
        self.state.focus
    }

    /// Committed range.
    pub fn ranged(&self) -> Option<RangeArea> {
        self.state.range
    }

    /// In-progress autofill preview range.
    pub fn temp_range(&self) -> Option<RangeArea> {
        self.state.temp_range
    }

    /// Active edit descriptor.
    pub fn edited(&self) -> Option<&EditCell> {
        self.state.edit.as_ref()
    }

    /// Full state snapshot.
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The committed range, or the focus as a single-cell range.
    pub fn range_or_focus(&self) -> Option<RangeArea> {
        self.state
            .range
            .or_else(|| self.state.focus.map(RangeArea::single))
    }

    // ---- listener registration (fire in registration order) ----

    pub fn on_focus_change(&mut self, listener: impl FnMut(Option<&Cell>) + 'static) {
        self.focus_listeners.push(Box::new(listener));
    }

    pub fn on_range_change(&mut self, listener: impl FnMut(Option<&RangeArea>) + 'static) {
        self.range_listeners.push(Box::new(listener));
    }

    pub fn on_temp_range_change(&mut self, listener: impl FnMut(Option<&RangeArea>) + 'static) {
        self.temp_range_listeners.push(Box::new(listener));
    }

    pub fn on_edit_change(&mut self, listener: impl FnMut(Option<&EditCell>) + 'static) {
        self.edit_listeners.push(Box::new(listener));
    }

    // ---- mutations ----

    /// Commit a new focus; clears range and edit in the same transition.
    pub fn set_focus(&mut self, cell: Cell) {
        let range_changed = self.state.range.take().is_some();
        let edit_changed = self.state.edit.take().is_some();
        self.state.focus = Some(cell);
        self.notify_focus();
        if range_changed {
            self.notify_range();
        }
        if edit_changed {
            self.notify_edit();
        }
    }

    /// Commit a new range; an active edit is dropped (editing suspends range
    /// selection, never coexists with it).
    pub fn set_range(&mut self, range: RangeArea) {
        let edit_changed = self.state.edit.take().is_some();
        self.state.range = Some(range);
        self.notify_range();
        if edit_changed {
            self.notify_edit();
        }
    }

    /// Commit or clear the autofill preview range.
    pub fn set_temp_range(&mut self, range: Option<RangeArea>) {
        if self.state.temp_range == range {
            return;
        }
        self.state.temp_range = range;
        self.notify_temp_range();
    }

    /// Commit or clear the edit descriptor; setting one drops the range.
    pub fn set_edit(&mut self, edit: Option<EditCell>) {
        let range_changed = edit.is_some() && self.state.range.take().is_some();
        let changed = self.state.edit != edit;
        self.state.edit = edit;
        if changed {
            self.notify_edit();
        }
        if range_changed {
            self.notify_range();
        }
    }

    /// Clear the whole selection state.
    pub fn clear(&mut self) {
        let focus_changed = self.state.focus.take().is_some();
        let range_changed = self.state.range.take().is_some();
        let temp_changed = self.state.temp_range.take().is_some();
        let edit_changed = self.state.edit.take().is_some();
        if focus_changed {
            self.notify_focus();
        }
        if range_changed {
            self.notify_range();
        }
        if temp_changed {
            self.notify_temp_range();
        }
        if edit_changed {
            self.notify_edit();
        }
    }

    // ---- notification dispatch ----

    fn notify_focus(&mut self) {
        let value = self.state.focus;
        for listener in &mut self.focus_listeners {
            listener(value.as_ref());
        }
    }

    fn notify_range(&mut self) {
        let value = self.state.range;
        for listener in &mut self.range_listeners {
            listener(value.as_ref());
        }
    }

    fn notify_temp_range(&mut self) {
        let value = self.state.temp_range;
        for listener in &mut self.temp_range_listeners {
            listener(value.as_ref());
        }
    }

    fn notify_edit(&mut self) {
        let value = self.state.edit.clone();
        for listener in &mut self.edit_listeners {
            listener(value.as_ref());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_set_focus_clears_range_and_edit() {
        let mut store = SelectionStore::new();
        store.set_range(RangeArea::between(Cell::new(0, 0), Cell::new(2, 2)));
        store.set_focus(Cell::new(1, 1));
        assert_eq!(store.focused(), Some(Cell::new(1, 1)));
        assert!(store.ranged().is_none());
        assert!(store.edited().is_none());
    }

    #[test]
    fn test_edit_never_coexists_with_range() {
        let mut store = SelectionStore::new();
        store.set_focus(Cell::new(0, 0));
        store.set_range(RangeArea::between(Cell::new(0, 0), Cell::new(3, 3)));
        store.set_edit(Some(EditCell {
            cell: Cell::new(0, 0),
            prop: "a".to_string(),
            value: None,
            editor: None,
        }));
        assert!(store.edited().is_some());
        assert!(store.ranged().is_none());
    }

    #[test]
    fn test_listeners_fire_in_registration_order_after_commit() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = SelectionStore::new();
        for i in 0..2 {
            let seen = Rc::clone(&seen);
            store.on_focus_change(move |focus| {
                seen.borrow_mut().push((i, focus.copied()));
            });
        }
        store.set_focus(Cell::new(4, 2));
        let seen = seen.borrow();
        assert_eq!(
            *seen,
            vec![(0, Some(Cell::new(4, 2))), (1, Some(Cell::new(4, 2)))]
        );
    }

    #[test]
    fn test_no_torn_state_visible_to_listeners() {
        // set_focus commits the whole transition (focus set, range cleared)
        // before any listener runs: the focus listener already reports the
        // new cell and the range listener already reports the clear, in that
        // order, within one mutation.
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut store = SelectionStore::new();
        store.set_range(RangeArea::single(Cell::new(9, 9)));
        {
            let log = Rc::clone(&log);
            store.on_focus_change(move |focus| {
                log.borrow_mut().push(format!("focus:{:?}", focus.copied()));
            });
        }
        {
            let log = Rc::clone(&log);
            store.on_range_change(move |range| {
                log.borrow_mut().push(format!("range:{}", range.is_some()));
            });
        }
        store.set_focus(Cell::new(1, 2));
        assert_eq!(
            *log.borrow(),
            vec![
                format!("focus:{:?}", Some(Cell::new(1, 2))),
                "range:false".to_string()
            ]
        );
    }

    #[test]
    fn test_last_write_wins_per_key() {
        let mut store = SelectionStore::new();
        store.set_focus(Cell::new(0, 0));
        store.set_focus(Cell::new(5, 5));
        assert_eq!(store.focused(), Some(Cell::new(5, 5)));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut store = SelectionStore::new();
        store.set_focus(Cell::new(1, 1));
        store.set_temp_range(Some(RangeArea::single(Cell::new(1, 1))));
        store.clear();
        assert_eq!(store.state(), &SelectionState::default());
    }
}
