//! Browser-facing `GridView` glue (wasm32 only).
//!
//! Thin plumbing between DOM events and the grid core: maps pointer
//! coordinates through the dimension tables, forwards keys, mirrors the edit
//! state into an input overlay, writes copies to the native clipboard, and
//! drives the debounced sort with a single `setTimeout`. No grid logic lives
//! here — everything observable is implemented (and tested) in the
//! target-independent core.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Function;
use serde::Deserialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use crate::editor::input::InputOverlay;
use crate::layout::{DimensionTable, PaneData, Point, DEFAULT_COL_WIDTH, DEFAULT_ROW_HEIGHT};
use crate::selection::{key_from_dom, KeyCombo, SelectionController};
use crate::sorting::{SortingPlugin, SORT_DEBOUNCE_MS};
use crate::source::{DataSource, MemorySource, RowSpace};
use crate::types::{Cell, CellValue, Column, GridConfig, RowRecord};

/// Column definition as supplied from JavaScript.
#[derive(Debug, Clone, Deserialize)]
struct ColumnInit {
    prop: String,
    name: Option<String>,
    #[serde(default = "default_true")]
    sortable: bool,
    #[serde(default)]
    readonly: bool,
    #[serde(default)]
    editor: Option<String>,
}

fn default_true() -> bool {
    true
}

impl From<ColumnInit> for Column {
    fn from(init: ColumnInit) -> Self {
        let mut column = Column::new(init.prop);
        if let Some(name) = init.name {
            column.name = name;
        }
        column.sortable = init.sortable;
        column.readonly = init.readonly;
        column.editor = init.editor;
        column
    }
}

/// Shared state accessed by event handlers and timer closures.
pub(crate) struct SharedState {
    pub(crate) controller: SelectionController,
    pub(crate) source: MemorySource,
    pub(crate) sorting: SortingPlugin,
    pub(crate) rows: DimensionTable,
    pub(crate) cols: DimensionTable,
    pub(crate) scroll_x: f32,
    pub(crate) scroll_y: f32,
    pub(crate) render_callback: Option<Function>,
    pub(crate) sort_timer: Option<i32>,
    pub(crate) sort_closure: Option<Closure<dyn FnMut()>>,
    pub(crate) input_overlay: InputOverlay,
}

impl SharedState {
    /// Rebuild dimension tables and pane bounds from the current source.
    fn refresh_dimensions(&mut self) {
        let row_count = self
            .source
            .store(RowSpace::Main)
            .map(|s| s.len())
            .unwrap_or(0);
        let col_count = self.source.columns().len();
        self.rows = DimensionTable::uniform(row_count, DEFAULT_ROW_HEIGHT);
        self.cols = DimensionTable::uniform(col_count, DEFAULT_COL_WIDTH);
        self.controller.set_last_cell(Cell::new(col_count, row_count));
    }

    /// Mirror the core's edit state into the DOM input overlay.
    fn sync_editor(&mut self) {
        match self.controller.store.edited().cloned() {
            Some(edit) => {
                let x = self.cols.origin(edit.cell.x) - self.scroll_x;
                let y = self.rows.origin(edit.cell.y) - self.scroll_y;
                let w = self.cols.size(edit.cell.x);
                let h = self.rows.size(edit.cell.y);
                let value = edit.value.unwrap_or_default();
                self.input_overlay.show((x, y, w, h), &value, None);
            }
            None => self.input_overlay.hide(),
        }
    }
}

fn invoke_render_callback(callback: Option<Function>) {
    if let Some(callback) = callback {
        let _ = callback.call0(&JsValue::NULL);
    }
}

/// The main grid struct exported to JavaScript.
#[wasm_bindgen]
pub struct GridView {
    state: Rc<RefCell<SharedState>>,
}

#[wasm_bindgen]
impl GridView {
    /// Create an empty grid.
    #[wasm_bindgen(constructor)]
    pub fn new() -> GridView {
        console_error_panic_hook::set_once();
        let controller = SelectionController::new(GridConfig::default(), Cell::new(0, 0));
        GridView {
            state: Rc::new(RefCell::new(SharedState {
                controller,
                source: MemorySource::default(),
                sorting: SortingPlugin::new(),
                rows: DimensionTable::default(),
                cols: DimensionTable::default(),
                scroll_x: 0.0,
                scroll_y: 0.0,
                render_callback: None,
                sort_timer: None,
                sort_closure: None,
                input_overlay: InputOverlay::new(),
            })),
        }
    }

    /// Load column definitions from a JS array of `{prop, name?, ...}`.
    pub fn set_columns(&mut self, columns: JsValue) -> Result<(), JsValue> {
        let inits: Vec<ColumnInit> =
            serde_wasm_bindgen::from_value(columns).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut s = self.state.borrow_mut();
        let columns = inits.into_iter().map(Column::from).collect();
        let rows = s
            .source
            .store(RowSpace::Main)
            .map(|store| store.source().to_vec())
            .unwrap_or_default();
        s.source = MemorySource::new(columns, rows);
        s.refresh_dimensions();
        Ok(())
    }

    /// Load row records from a JS array of objects.
    pub fn set_rows(&mut self, rows: JsValue) -> Result<(), JsValue> {
        let rows: Vec<RowRecord> =
            serde_wasm_bindgen::from_value(rows).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut s = self.state.borrow_mut();
        if let Some(store) = s.source.store_mut(RowSpace::Main) {
            store.set_source(rows);
        }
        s.refresh_dimensions();
        let resort = {
            let s = &mut *s;
            s.sorting.on_source_updated(&mut s.controller.hooks)
        };
        drop(s);
        if resort {
            Self::schedule_sort_timeout(&self.state);
        }
        Ok(())
    }

    /// Global readonly switch.
    pub fn set_readonly(&mut self, readonly: bool) {
        self.state.borrow_mut().controller.config.readonly = readonly;
    }

    /// Scroll position of the viewport, in pixels.
    pub fn set_scroll(&mut self, x: f32, y: f32) {
        let mut s = self.state.borrow_mut();
        s.scroll_x = x.max(0.0);
        s.scroll_y = y.max(0.0);
    }

    /// Register a callback invoked whenever the overlay must repaint.
    pub fn set_render_callback(&mut self, callback: Option<Function>) {
        self.state.borrow_mut().render_callback = callback;
    }

    // ---- pointer ----

    /// Pointer-down at viewport pixel `(x, y)`. Returns `true` when a cell
    /// was hit (callers should `preventDefault` then).
    pub fn mouse_down(&mut self, x: f32, y: f32, shift: bool) -> bool {
        let callback = {
            let mut guard = self.state.borrow_mut();
            let s = &mut *guard;
            let hit = {
                let pane = PaneData {
                    rows: &s.rows,
                    cols: &s.cols,
                    scroll_x: s.scroll_x,
                    scroll_y: s.scroll_y,
                };
                s.controller.pointer_down(Point::new(x, y), &pane, shift)
            };
            if !hit {
                return false;
            }
            s.sync_editor();
            s.render_callback.clone()
        };
        invoke_render_callback(callback);
        true
    }

    /// Pointer-down on the autofill handle.
    pub fn fill_handle_down(&mut self, x: f32, y: f32) {
        self.state
            .borrow_mut()
            .controller
            .fill_handle_down(Point::new(x, y));
    }

    /// Pointer movement (document-level while a gesture is active).
    pub fn mouse_move(&mut self, x: f32, y: f32) {
        let callback = {
            let mut guard = self.state.borrow_mut();
            let s = &mut *guard;
            if !s.controller.gesture_in_progress() {
                return;
            }
            {
                let pane = PaneData {
                    rows: &s.rows,
                    cols: &s.cols,
                    scroll_x: s.scroll_x,
                    scroll_y: s.scroll_y,
                };
                s.controller.pointer_move(Point::new(x, y), &pane);
            }
            s.render_callback.clone()
        };
        invoke_render_callback(callback);
    }

    /// Pointer released or left the document.
    pub fn mouse_up(&mut self) {
        let callback = {
            let mut s = self.state.borrow_mut();
            let s = &mut *s;
            let controller = &mut s.controller;
            controller.pointer_up(&mut s.source);
            s.render_callback.clone()
        };
        invoke_render_callback(callback);
    }

    /// Double-click opens the editor on the focused cell.
    pub fn dbl_click(&mut self) {
        let callback = {
            let mut s = self.state.borrow_mut();
            let s = &mut *s;
            s.controller.begin_edit(None, &s.source);
            s.sync_editor();
            s.render_callback.clone()
        };
        invoke_render_callback(callback);
    }

    // ---- keyboard ----

    /// Key-down with a DOM `KeyboardEvent.key` value. Returns `true` when
    /// the grid consumed the key.
    pub fn key_down(&mut self, key: &str, ctrl: bool, shift: bool) -> bool {
        let combo = KeyCombo {
            key: key_from_dom(key),
            ctrl,
            shift,
        };
        let (handled, callback) = {
            let mut s = self.state.borrow_mut();
            let s = &mut *s;
            let handled = s.controller.key_down(combo, &mut s.source);
            s.sync_editor();
            (handled, s.render_callback.clone())
        };
        if handled {
            invoke_render_callback(callback);
        }
        handled
    }

    /// Confirm the open editor with the overlay's current value; Enter
    /// advances down, Tab advances right.
    pub fn commit_edit(&mut self, advance_right: bool) {
        let callback = {
            let mut s = self.state.borrow_mut();
            let Some(value) = s.input_overlay.value() else {
                return;
            };
            let advance = if advance_right { (1, 0) } else { (0, 1) };
            let s = &mut *s;
            s.controller
                .save_edit(CellValue::String(value), advance, &mut s.source);
            s.sync_editor();
            s.render_callback.clone()
        };
        invoke_render_callback(callback);
    }

    /// Cancel the open editor, discarding its value.
    pub fn cancel_edit(&mut self) {
        let callback = {
            let mut s = self.state.borrow_mut();
            s.controller.close_edit();
            s.sync_editor();
            s.render_callback.clone()
        };
        invoke_render_callback(callback);
    }

    // ---- clipboard ----

    /// Copy the current selection; also writes it to the native clipboard.
    pub fn copy(&mut self) -> Option<String> {
        let text = {
            let mut s = self.state.borrow_mut();
            let s = &mut *s;
            s.controller.copy(&s.source)
        }?;
        copy_to_clipboard_internal(&text);
        Some(text)
    }

    /// Cut: copy plus clear (clear suppressed when readonly).
    pub fn cut(&mut self) -> Option<String> {
        let (text, callback) = {
            let mut s = self.state.borrow_mut();
            let s = &mut *s;
            let controller = &mut s.controller;
            let text = controller.cut(&mut s.source);
            (text, s.render_callback.clone())
        };
        let text = text?;
        copy_to_clipboard_internal(&text);
        invoke_render_callback(callback);
        Some(text)
    }

    /// Paste a clipboard payload anchored at the focus.
    pub fn paste(&mut self, raw: &str, is_html: bool) -> bool {
        let (applied, callback) = {
            let mut s = self.state.borrow_mut();
            let s = &mut *s;
            let controller = &mut s.controller;
            let applied = controller.paste(raw, is_html, &mut s.source);
            (applied, s.render_callback.clone())
        };
        if applied {
            invoke_render_callback(callback);
        }
        applied
    }

    // ---- sorting ----

    /// Header click on column `index`; `additive` = shift held.
    pub fn header_click(&mut self, index: usize, additive: bool) -> bool {
        let scheduled = {
            let mut s = self.state.borrow_mut();
            let s = &mut *s;
            let Some(prop) = s.source.columns().get(index).map(|c| c.prop.clone()) else {
                return false;
            };
            s.sorting
                .header_click(&prop, additive, &mut s.source, &mut s.controller.hooks)
        };
        if scheduled {
            Self::schedule_sort_timeout(&self.state);
        }
        scheduled
    }

    // ---- state snapshots ----

    /// Selection state snapshot as a JS object.
    pub fn selection(&self) -> Result<JsValue, JsValue> {
        let s = self.state.borrow();
        serde_wasm_bindgen::to_value(s.controller.store.state())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current row permutation of the main space.
    pub fn proxy_items(&self) -> Vec<usize> {
        let s = self.state.borrow();
        s.source
            .store(RowSpace::Main)
            .map(|store| store.proxy_items().to_vec())
            .unwrap_or_default()
    }
}

impl GridView {
    /// Arm (or re-arm) the single debounce timer that flushes the pending
    /// sort once the window elapses.
    pub(crate) fn schedule_sort_timeout(state: &Rc<RefCell<SharedState>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        if let Some(timer_id) = s.sort_timer.take() {
            window.clear_timeout_with_handle(timer_id);
        }
        if s.sort_closure.is_none() {
            let weak_state: Weak<RefCell<SharedState>> = Rc::downgrade(state);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    GridView::flush_sort(&state);
                }
            }) as Box<dyn FnMut()>);
            s.sort_closure = Some(closure);
        }
        let Some(callback) = s.sort_closure.as_ref() else {
            return;
        };
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            i32::try_from(SORT_DEBOUNCE_MS).unwrap_or(50),
        ) {
            Ok(id) => s.sort_timer = Some(id),
            Err(_) => s.sort_timer = None,
        }
    }

    pub(crate) fn flush_sort(state: &Rc<RefCell<SharedState>>) {
        let callback = {
            let mut s = state.borrow_mut();
            s.sort_timer = None;
            let s = &mut *s;
            let ran = s
                .sorting
                .flush(&mut s.source, &mut s.controller.hooks);
            if !ran {
                return;
            }
            s.render_callback.clone()
        };
        invoke_render_callback(callback);
    }
}

impl Default for GridView {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn copy_to_clipboard_internal(text: &str) {
    if let Some(window) = web_sys::window() {
        let clipboard = window.navigator().clipboard();
        let _ = clipboard.write_text(text);
    }
}
