//! gridview - virtualized data grid core for the web
//!
//! Selection, range editing, clipboard and multi-column sorting over an
//! arbitrary row/column data source:
//! - Pixel → cell coordinate mapping across pinned and scrollable panes
//! - Observable selection store (focus / range / temp range / edit)
//! - Cancelable "before" hooks on every externally visible transition
//! - Drag-fill with wrap tiling, TSV + HTML-table clipboard bridge
//! - Debounced, stable multi-column sorting over row index permutations
//!
//! The core is target-independent; the browser glue (`GridView`) is compiled
//! for wasm32 only.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'gridview';
//! await init();
//! const grid = new GridView();
//! grid.set_columns(columns);
//! grid.set_rows(rows);
//! grid.set_render_callback(() => overlay.repaint(grid.selection()));
//! ```

// Core modules (target-independent)
pub mod clipboard;
pub mod debounce;
pub mod editor;
pub mod error;
pub mod event;
pub mod hooks;
pub mod layout;
pub mod selection;
pub mod sorting;
pub mod source;
pub mod types;

// Browser glue (wasm32 only)
#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::GridView;

pub use error::{GridError, Result};
pub use hooks::GridHooks;
pub use selection::SelectionController;
pub use sorting::SortingPlugin;
pub use source::{DataSource, MemorySource, RowSpace, RowStore};
pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
