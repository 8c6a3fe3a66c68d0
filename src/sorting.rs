//! Multi-column sorting over row index permutations.
//!
//! Sorting never touches row data: it rebuilds each row space's
//! `proxy_items` permutation. The sort state is a single insertion-ordered
//! vector of entries, so a column's order and its comparator can never drift
//! apart. Execution is debounced — additive header clicks and programmatic
//! column updates arrive in bursts, and only the latest arguments run.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::debounce::Debouncer;
use crate::hooks::{GridHooks, SortingAppliedDetail, SortingDetail};
use crate::source::{DataSource, RowSpace};
use crate::types::{get_column_by_prop, value_text, CellCompare, Column, Order, RowRecord};

/// Debounce window for sort execution.
pub const SORT_DEBOUNCE_MS: u64 = 50;

/// Rotate a column's sort order: none → asc → desc → none.
pub fn get_next_order(current: Option<Order>) -> Option<Order> {
    match current {
        None => Some(Order::Asc),
        Some(Order::Asc) => Some(Order::Desc),
        Some(Order::Desc) => None,
    }
}

/// Default comparator: case-insensitive string comparison of the prop's
/// value.
pub fn default_cell_compare(prop: &str, a: &RowRecord, b: &RowRecord) -> Ordering {
    let av = a.get(prop).map(value_text).unwrap_or_default().to_lowercase();
    let bv = b.get(prop).map(value_text).unwrap_or_default().to_lowercase();
    av.cmp(&bv)
}

/// Direction-adjusted comparator for a column, or `None` when unsorted.
///
/// Descending is the ascending comparator reversed, never a separate
/// algorithm.
fn comparer_for(column: Option<&Column>, order: Option<Order>) -> Option<CellCompare> {
    let base: CellCompare = column
        .and_then(|c| c.cell_compare.clone())
        .unwrap_or_else(|| Rc::new(default_cell_compare));
    match order {
        Some(Order::Asc) => Some(base),
        Some(Order::Desc) => Some(Rc::new(move |prop, a, b| base(prop, a, b).reverse())),
        None => None,
    }
}

/// One column's place in the sort precedence.
#[derive(Clone)]
pub struct SortEntry {
    pub prop: String,
    /// `None` marks a transiently retained, unsorted entry.
    pub order: Option<Order>,
    compare: Option<CellCompare>,
}

impl std::fmt::Debug for SortEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortEntry")
            .field("prop", &self.prop)
            .field("order", &self.order)
            .finish()
    }
}

/// Composite comparison: first non-tie in precedence order wins.
fn composite(entries: &[SortEntry], a: &RowRecord, b: &RowRecord) -> Ordering {
    for entry in entries {
        if let Some(compare) = &entry.compare {
            let ord = compare(&entry.prop, a, b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
    }
    Ordering::Equal
}

/// Debounced, permutation-based sorting.
pub struct SortingPlugin {
    entries: Vec<SortEntry>,
    pending: Option<Vec<SortEntry>>,
    debouncer: Debouncer,
}

impl Default for SortingPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl SortingPlugin {
    pub fn new() -> Self {
        SortingPlugin {
            entries: Vec::new(),
            pending: None,
            debouncer: Debouncer::new(SORT_DEBOUNCE_MS),
        }
    }

    /// Committed sort entries, in precedence order.
    pub fn sorting(&self) -> &[SortEntry] {
        &self.entries
    }

    /// Committed order for one column.
    pub fn order_for(&self, prop: &str) -> Option<Order> {
        self.entries
            .iter()
            .find(|e| e.prop == prop)
            .and_then(|e| e.order)
    }

    /// Whether a sort pass is waiting for its debounce window.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Header click on a column: rotate its order and merge into the sort
    /// state.
    ///
    /// `additive` (shift-click) merges with the existing multi-column sort;
    /// otherwise the click replaces the whole sort state. Rotating to
    /// "unsorted" removes the column's entry entirely when other sorted
    /// columns remain, and retains it transiently when it is the only one.
    /// Returns `false` for unsortable columns and hook vetoes.
    pub fn header_click(
        &mut self,
        prop: &str,
        additive: bool,
        source: &mut dyn DataSource,
        hooks: &mut GridHooks,
    ) -> bool {
        let Some(column) = get_column_by_prop(source.columns(), prop) else {
            return false;
        };
        if !column.sortable {
            return false;
        }
        let mut order = get_next_order(column.order);

        let ev = hooks.before_sorting.emit(SortingDetail {
            prop: Some(prop.to_string()),
            order,
            additive,
        });
        if ev.default_prevented() {
            return false;
        }
        order = ev.detail.order;

        source.set_column_order(prop, order, additive);

        let apply = hooks.before_sorting_apply.emit(SortingDetail {
            prop: Some(prop.to_string()),
            order,
            additive,
        });
        if apply.default_prevented() {
            return false;
        }
        order = apply.detail.order;

        // Build the entry first, then merge it into the state.
        let entry = SortEntry {
            prop: prop.to_string(),
            order,
            compare: comparer_for(get_column_by_prop(source.columns(), prop), order),
        };

        let mut entries = self.entries.clone();
        if additive && !entries.is_empty() {
            let existing = entries.iter().position(|e| e.prop == prop);
            match existing {
                Some(i) if order.is_none() && entries.len() > 1 => {
                    // drops out of the precedence order entirely
                    entries.remove(i);
                }
                Some(i) => {
                    if let Some(slot) = entries.get_mut(i) {
                        *slot = entry;
                    }
                }
                None => entries.push(entry),
            }
        } else if order.is_some() {
            entries = vec![entry];
        } else {
            entries.retain(|e| e.prop != prop);
        }

        self.schedule(entries);
        true
    }

    /// Replace the sort state programmatically (column-set updates). The
    /// slice order defines precedence.
    pub fn apply_column_sorting(
        &mut self,
        order: &[(String, Option<Order>)],
        source: &mut dyn DataSource,
    ) {
        let mut entries = Vec::with_capacity(order.len());
        for (prop, ord) in order {
            source.set_column_order(prop, *ord, true);
            entries.push(SortEntry {
                prop: prop.clone(),
                order: *ord,
                compare: comparer_for(get_column_by_prop(source.columns(), prop), *ord),
            });
        }
        self.schedule(entries);
    }

    /// A row source was swapped underneath an active sort: re-schedule it.
    pub fn on_source_updated(&mut self, hooks: &mut GridHooks) -> bool {
        if self.entries.iter().all(|e| e.order.is_none()) {
            return false;
        }
        let ev = hooks.before_sorting.emit(SortingDetail {
            prop: None,
            order: None,
            additive: false,
        });
        if ev.default_prevented() {
            return false;
        }
        self.schedule(self.entries.clone());
        true
    }

    /// Queue a sort with these entries; restarts the debounce window and
    /// overwrites any pending arguments (latest wins).
    pub fn schedule(&mut self, entries: Vec<SortEntry>) {
        self.pending = Some(entries);
        self.debouncer.trigger();
    }

    /// Run the pending sort if its debounce window has elapsed.
    pub fn poll(&mut self, source: &mut dyn DataSource, hooks: &mut GridHooks) -> bool {
        if self.debouncer.should_execute() {
            self.run_pending(source, hooks);
            return true;
        }
        false
    }

    /// Run the pending sort immediately, if any.
    pub fn flush(&mut self, source: &mut dyn DataSource, hooks: &mut GridHooks) -> bool {
        if self.pending.is_none() {
            return false;
        }
        self.debouncer.reset();
        self.run_pending(source, hooks);
        true
    }

    fn run_pending(&mut self, source: &mut dyn DataSource, hooks: &mut GridHooks) {
        let Some(entries) = self.pending.take() else {
            return;
        };
        self.run_sort(entries, source, hooks);
    }

    /// Execute one sort pass over every initialized row space.
    ///
    /// With no effective entries every space resets to the identity
    /// permutation; otherwise each space's permutation is stably sorted with
    /// the composite comparator (stability keeps multi-column precedence
    /// predictable). Spaces are updated independently; each store pair is
    /// swapped atomically by the store itself.
    fn run_sort(
        &mut self,
        entries: Vec<SortEntry>,
        source: &mut dyn DataSource,
        hooks: &mut GridHooks,
    ) {
        let effective = entries.iter().any(|e| e.compare.is_some());
        let mut touched = Vec::new();
        for space in RowSpace::ALL {
            let Some(store) = source.store_mut(space) else {
                // lazily-initialized store not present: skip this space
                continue;
            };
            if effective {
                store.sort_proxy(|a, b| composite(&entries, a, b));
            } else {
                store.reset_proxy();
            }
            touched.push(space);
        }
        self.entries = entries;
        hooks
            .after_sorting_apply
            .emit(SortingAppliedDetail { spaces: touched });
    }
}
