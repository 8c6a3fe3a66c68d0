//! Selection state value types.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, RangeArea};

/// Descriptor of the cell currently being edited.
///
/// Created when an edit starts (double-click, Enter, programmatic request),
/// destroyed on close or when focus moves elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCell {
    /// Cell being edited.
    pub cell: Cell,
    /// Column property key of the edited cell.
    pub prop: String,
    /// Initial value seeded into the editor; `None` uses the cell's current
    /// value.
    pub value: Option<String>,
    /// Editor implementation key, from the column definition.
    pub editor: Option<String>,
}

/// Snapshot of the whole selection state.
///
/// Invariant: `edit.is_some()` implies `range.is_none()` — editing suspends
/// range selection. The store enforces this on every mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    /// The single active cell.
    pub focus: Option<Cell>,
    /// Committed multi-cell selection; always has the focus as one corner.
    pub range: Option<RangeArea>,
    /// In-progress autofill preview, distinct from the committed range.
    pub temp_range: Option<RangeArea>,
    /// Active edit, if any.
    pub edit: Option<EditCell>,
}
