//! Column definitions and row records.
//!
//! Row records are opaque maps from column property key to value; the grid
//! never interprets values beyond display/compare, so `serde_json` types are
//! used directly.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// A single cell value.
pub type CellValue = serde_json::Value;

/// One row of data: property key → value.
pub type RowRecord = serde_json::Map<String, CellValue>;

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    Desc,
}

/// Plain-text rendering of a cell value, shared by the clipboard serializer
/// and the default sort comparator.
pub fn value_text(value: &CellValue) -> String {
    match value {
        CellValue::Null => String::new(),
        CellValue::String(s) => s.clone(),
        CellValue::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        CellValue::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Per-column cell comparator: `(prop, row_a, row_b)`.
///
/// Comparators always express ascending order; descending is produced by
/// reversing the result.
pub type CellCompare = Rc<dyn Fn(&str, &RowRecord, &RowRecord) -> Ordering>;

/// A grid column.
#[derive(Clone)]
pub struct Column {
    /// Property key into each row record.
    pub prop: String,
    /// Header label.
    pub name: String,
    /// Whether header clicks may sort this column.
    pub sortable: bool,
    /// Whether cells in this column reject edits.
    pub readonly: bool,
    /// Per-row readonly override, consulted with the row's record; lets a
    /// host mark individual cells readonly inside an editable column.
    pub cell_readonly: Option<Rc<dyn Fn(&RowRecord) -> bool>>,
    /// Current sort indicator, kept up to date by the sorting plugin.
    pub order: Option<Order>,
    /// Custom ascending comparator; `None` falls back to the default
    /// case-insensitive string comparison.
    pub cell_compare: Option<CellCompare>,
    /// Editor kind requested for this column (host-defined key).
    pub editor: Option<String>,
}

impl Column {
    /// A sortable, editable column with default comparator and editor.
    pub fn new(prop: impl Into<String>) -> Self {
        let prop = prop.into();
        Column {
            name: prop.clone(),
            prop,
            sortable: true,
            readonly: false,
            cell_readonly: None,
            order: None,
            cell_compare: None,
            editor: None,
        }
    }

    /// Builder-style readonly marker.
    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    /// Builder-style sortable marker.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("prop", &self.prop)
            .field("name", &self.name)
            .field("sortable", &self.sortable)
            .field("readonly", &self.readonly)
            .field("has_cell_readonly", &self.cell_readonly.is_some())
            .field("order", &self.order)
            .field("has_cell_compare", &self.cell_compare.is_some())
            .field("editor", &self.editor)
            .finish()
    }
}

/// Find a column by property key.
pub fn get_column_by_prop<'a>(columns: &'a [Column], prop: &str) -> Option<&'a Column> {
    columns.iter().find(|c| c.prop == prop)
}
