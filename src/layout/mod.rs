//! Dimension tables and pixel → cell coordinate mapping.

pub mod dimension;
pub mod viewport;

pub use dimension::{DimensionTable, DEFAULT_COL_WIDTH, DEFAULT_ROW_HEIGHT};
pub use viewport::{cell_at, cell_from_point, visible_range, AxisGeometry, CellHit, Pane, PaneData, Point};
