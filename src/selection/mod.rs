//! Selection subsystem: store, controller, keyboard, autofill.

pub mod autofill;
pub mod controller;
pub mod keyboard;
pub mod store;

pub use autofill::{AutoFillService, FillKind};
pub use controller::SelectionController;
pub use keyboard::{key_from_dom, resolve, Key, KeyAction, KeyCombo};
pub use store::SelectionStore;
