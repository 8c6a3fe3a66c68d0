//! Named notification surface of the grid.
//!
//! Hosts register callbacks on [`GridHooks`] to observe, rewrite, or veto
//! grid transitions. Cancelable hooks gate the commit that follows them;
//! `*_committed` / `*_applied` hooks fire after the commit and are not
//! cancelable (a veto there is ignored by the core). A veto short-circuits
//! only its own operation's downstream effects, never independent
//! notifications.

use crate::event::HookList;
use crate::source::RowSpace;
use crate::types::{Cell, CellValue, EditCell, Order, RangeArea};

/// Detail for `before_focus`: the focus destination, substitutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusDetail {
    pub cell: Cell,
}

/// Detail for `apply_focus`: the focus/end pair as a range, substitutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyFocusDetail {
    pub range: RangeArea,
}

/// Detail for `focus_committed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusCommittedDetail {
    pub focus: Cell,
    pub end: Cell,
}

/// Detail for `before_next_viewport_focus`: navigation hit a pane edge.
///
/// `focus` is the current focus; `(dx, dy)` the attempted step. The sibling
/// pane collaborator decides where the selection continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextViewportDetail {
    pub focus: Cell,
    pub dx: isize,
    pub dy: isize,
}

/// Detail for `before_range_apply` / `range_committed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeDetail {
    pub range: RangeArea,
}

/// Detail for `before_range_data_apply` / `range_data_applied`.
///
/// `matrix` is the full value rectangle, row-major, one entry per cell of
/// `range` — a host can veto or rewrite the whole payload atomically.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeDataDetail {
    pub matrix: Vec<Vec<CellValue>>,
    pub range: RangeArea,
}

/// Detail for `before_sorting` / `before_sorting_apply`.
///
/// `prop` is `None` when the trigger was a source update rather than a
/// header click. `order` is substitutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortingDetail {
    pub prop: Option<String>,
    pub order: Option<Order>,
    pub additive: bool,
}

/// Detail for `after_sorting_apply`: the row spaces whose permutation was
/// rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortingAppliedDetail {
    pub spaces: Vec<RowSpace>,
}

/// Detail for `before_copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyDetail {
    pub range: RangeArea,
}

/// Detail for `before_copy_apply`: the matrix about to be serialized,
/// substitutable.
#[derive(Debug, Clone, PartialEq)]
pub struct CopyApplyDetail {
    pub matrix: Vec<Vec<CellValue>>,
    pub range: RangeArea,
}

/// Detail for `before_paste`: the raw clipboard payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteDetail {
    pub raw: String,
    pub is_html: bool,
}

/// Detail for `before_paste_apply`: the parsed matrix, substitutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteApplyDetail {
    pub parsed: Vec<Vec<String>>,
}

/// Detail for `before_set_edit`: the edit descriptor, substitutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDetail {
    pub edit: EditCell,
}

/// Detail for `before_cell_save`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveDetail {
    pub cell: Cell,
    pub prop: String,
    pub value: CellValue,
    /// When set, the editor stays where it is instead of advancing focus.
    pub prevent_focus: bool,
}

/// All grid notifications, one hook list per name.
#[derive(Default)]
pub struct GridHooks {
    pub before_focus: HookList<FocusDetail>,
    pub apply_focus: HookList<ApplyFocusDetail>,
    /// Not cancelable; fires after the focus commit.
    pub focus_committed: HookList<FocusCommittedDetail>,
    pub before_next_viewport_focus: HookList<NextViewportDetail>,
    pub before_range_apply: HookList<RangeDetail>,
    /// Not cancelable; fires after the range commit.
    pub range_committed: HookList<RangeDetail>,
    pub before_range_data_apply: HookList<RangeDataDetail>,
    /// Not cancelable; fires after values were written to the data source.
    pub range_data_applied: HookList<RangeDataDetail>,
    pub before_sorting: HookList<SortingDetail>,
    pub before_sorting_apply: HookList<SortingDetail>,
    /// Not cancelable; fires once per executed sort pass.
    pub after_sorting_apply: HookList<SortingAppliedDetail>,
    pub before_copy: HookList<CopyDetail>,
    pub before_copy_apply: HookList<CopyApplyDetail>,
    pub before_paste: HookList<PasteDetail>,
    pub before_paste_apply: HookList<PasteApplyDetail>,
    pub before_cut: HookList<()>,
    pub before_set_edit: HookList<EditDetail>,
    pub before_cell_save: HookList<SaveDetail>,
    /// Not cancelable; fires when an edit closes without saving.
    pub cancel_edit: HookList<()>,
    pub select_all: HookList<()>,
}
