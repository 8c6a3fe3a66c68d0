//! Data source collaborator: row stores and the access trait.
//!
//! Sorting never reorders row data. Each row space owns a `proxy_items`
//! permutation mapping virtual row position → source-array index, and that
//! permutation is the only artifact sorting mutates. The three row spaces
//! (main, pinned-top, pinned-bottom) are independent coordinate spaces and
//! update independently of each other.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::types::{CellValue, Column, Order, RowRecord};

/// Which band of rows a store backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowSpace {
    /// The scrollable main rows.
    Main,
    /// Rows pinned above the scrollable band.
    PinTop,
    /// Rows pinned below the scrollable band.
    PinBottom,
}

impl RowSpace {
    /// All row spaces, in the order sorting visits them.
    pub const ALL: [RowSpace; 3] = [RowSpace::Main, RowSpace::PinTop, RowSpace::PinBottom];
}

impl std::fmt::Display for RowSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RowSpace::Main => "main",
            RowSpace::PinTop => "pin-top",
            RowSpace::PinBottom => "pin-bottom",
        };
        f.write_str(name)
    }
}

/// Row data plus its index permutation for one row space.
///
/// Invariant: `proxy_items` is always a permutation of `[0, source.len())`.
/// Both fields change together — use [`RowStore::replace`] or the dedicated
/// mutators, never field-by-field writes.
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    source: Vec<RowRecord>,
    proxy_items: Vec<usize>,
}

impl RowStore {
    /// New store over `source` with the identity permutation.
    pub fn new(source: Vec<RowRecord>) -> Self {
        let proxy_items = (0..source.len()).collect();
        RowStore {
            source,
            proxy_items,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// True when the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// The raw records, in source order.
    pub fn source(&self) -> &[RowRecord] {
        &self.source
    }

    /// The virtual-position → source-index permutation.
    pub fn proxy_items(&self) -> &[usize] {
        &self.proxy_items
    }

    /// Replace the `(proxy_items, source)` pair as one atomic write.
    ///
    /// A permutation whose length disagrees with the new source is rejected,
    /// keeping the invariant intact.
    pub fn replace(&mut self, proxy_items: Vec<usize>, source: Vec<RowRecord>) -> Result<()> {
        if proxy_items.len() != source.len() {
            return Err(GridError::Other(format!(
                "proxy length {} != source length {}",
                proxy_items.len(),
                source.len()
            )));
        }
        self.source = source;
        self.proxy_items = proxy_items;
        Ok(())
    }

    /// Swap in a new source; the permutation resizes to identity in the same
    /// transaction.
    pub fn set_source(&mut self, source: Vec<RowRecord>) {
        self.proxy_items = (0..source.len()).collect();
        self.source = source;
    }

    /// Reset the permutation to identity, leaving the source untouched.
    pub fn reset_proxy(&mut self) {
        self.proxy_items = (0..self.source.len()).collect();
    }

    /// Stable-sort the permutation with `compare` over the underlying
    /// records. The source itself is never reordered.
    pub fn sort_proxy(
        &mut self,
        mut compare: impl FnMut(&RowRecord, &RowRecord) -> std::cmp::Ordering,
    ) {
        let source = &self.source;
        self.proxy_items.sort_by(|&a, &b| {
            match (source.get(a), source.get(b)) {
                (Some(ra), Some(rb)) => compare(ra, rb),
                _ => std::cmp::Ordering::Equal,
            }
        });
    }

    /// Record at a virtual row position, through the permutation.
    pub fn record(&self, virtual_row: usize) -> Option<&RowRecord> {
        let idx = self.proxy_items.get(virtual_row)?;
        self.source.get(*idx)
    }

    /// Mutable record at a virtual row position.
    pub fn record_mut(&mut self, virtual_row: usize) -> Option<&mut RowRecord> {
        let idx = *self.proxy_items.get(virtual_row)?;
        self.source.get_mut(idx)
    }
}

/// The grid's view of its data: columns plus per-space row stores.
///
/// A `None` store models a row space that is not (yet) initialized — e.g. a
/// lazily created pinned band; callers skip such spaces for that operation.
pub trait DataSource {
    /// Column definitions, in display order.
    fn columns(&self) -> &[Column];

    /// Mutable column definitions (sort indicators).
    fn columns_mut(&mut self) -> &mut [Column];

    /// Row store for a space, if initialized.
    fn store(&self, space: RowSpace) -> Option<&RowStore>;

    /// Mutable row store for a space, if initialized.
    fn store_mut(&mut self, space: RowSpace) -> Option<&mut RowStore>;

    /// Value of the cell at virtual `(row, col)` in `space`.
    fn cell_value(&self, space: RowSpace, row: usize, col: usize) -> Option<CellValue> {
        let prop = self.columns().get(col)?.prop.clone();
        let record = self.store(space)?.record(row)?;
        Some(record.get(&prop).cloned().unwrap_or(CellValue::Null))
    }

    /// Write `value` into the cell at virtual `(row, col)` in `space`.
    fn set_cell_value(
        &mut self,
        space: RowSpace,
        row: usize,
        col: usize,
        value: CellValue,
    ) -> Result<()> {
        let prop = self
            .columns()
            .get(col)
            .map(|c| c.prop.clone())
            .ok_or_else(|| GridError::Column(format!("index {col}")))?;
        let store = self
            .store_mut(space)
            .ok_or_else(|| GridError::Store(space.to_string()))?;
        let record = store
            .record_mut(row)
            .ok_or_else(|| GridError::Other(format!("row {row} out of bounds")))?;
        record.insert(prop, value);
        Ok(())
    }

    /// Update the sort indicator on one column; non-additive updates clear
    /// every other column's indicator.
    fn set_column_order(&mut self, prop: &str, order: Option<Order>, additive: bool) {
        for column in self.columns_mut() {
            if column.prop == prop {
                column.order = order;
            } else if !additive {
                column.order = None;
            }
        }
    }
}

/// In-memory reference implementation of [`DataSource`].
///
/// The main store always exists; pinned stores start absent until rows are
/// pinned, which doubles as the "lazily initialized store" case.
#[derive(Debug, Default)]
pub struct MemorySource {
    columns: Vec<Column>,
    main: RowStore,
    pin_top: Option<RowStore>,
    pin_bottom: Option<RowStore>,
}

impl MemorySource {
    /// Source over `rows` with the given columns.
    pub fn new(columns: Vec<Column>, rows: Vec<RowRecord>) -> Self {
        MemorySource {
            columns,
            main: RowStore::new(rows),
            pin_top: None,
            pin_bottom: None,
        }
    }

    /// Parse rows from a JSON array of objects.
    pub fn from_json(columns: Vec<Column>, json: &str) -> Result<Self> {
        let rows: Vec<RowRecord> = serde_json::from_str(json)?;
        Ok(Self::new(columns, rows))
    }

    /// Initialize a pinned row store.
    pub fn set_pinned(&mut self, space: RowSpace, rows: Vec<RowRecord>) {
        match space {
            RowSpace::Main => self.main.set_source(rows),
            RowSpace::PinTop => self.pin_top = Some(RowStore::new(rows)),
            RowSpace::PinBottom => self.pin_bottom = Some(RowStore::new(rows)),
        }
    }
}

impl DataSource for MemorySource {
    fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    fn store(&self, space: RowSpace) -> Option<&RowStore> {
        match space {
            RowSpace::Main => Some(&self.main),
            RowSpace::PinTop => self.pin_top.as_ref(),
            RowSpace::PinBottom => self.pin_bottom.as_ref(),
        }
    }

    fn store_mut(&mut self, space: RowSpace) -> Option<&mut RowStore> {
        match space {
            RowSpace::Main => Some(&mut self.main),
            RowSpace::PinTop => self.pin_top.as_mut(),
            RowSpace::PinBottom => self.pin_bottom.as_mut(),
        }
    }
}
