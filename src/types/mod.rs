//! Core data types shared across the grid.

pub mod cell;
pub mod column;
pub mod config;
pub mod selection;

pub use cell::{Cell, RangeArea};
pub use column::{get_column_by_prop, value_text, CellCompare, CellValue, Column, Order, RowRecord};
pub use config::GridConfig;
pub use selection::{EditCell, SelectionState};
