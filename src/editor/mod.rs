//! Editor collaborator boundary.
//!
//! The grid core never renders an input; it hands an [`EditCell`] descriptor
//! to an editor implementation and takes the value back on save. `TextEditor`
//! is the default, a headless text buffer the wasm input overlay (and tests)
//! sync into.

#[cfg(target_arch = "wasm32")]
pub(crate) mod input;

use crate::types::EditCell;

/// Contract every editor implementation exposes back to the core.
pub trait EditorBase {
    /// Current value held by the editor.
    fn value(&self) -> String;

    /// Flush-on-blur hook, called right before the editor is torn down.
    fn before_disconnect(&mut self) {}
}

/// Default plain-text editor: a buffer seeded from the edit descriptor.
#[derive(Debug, Clone, Default)]
pub struct TextEditor {
    buffer: String,
}

impl TextEditor {
    /// Editor seeded from an edit descriptor's initial value.
    pub fn from_edit(edit: &EditCell) -> Self {
        TextEditor {
            buffer: edit.value.clone().unwrap_or_default(),
        }
    }

    /// Replace the buffer (keystroke sync from the host input).
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.buffer = value.into();
    }
}

impl EditorBase for TextEditor {
    fn value(&self) -> String {
        self.buffer.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::Cell;

    #[test]
    fn test_seeded_from_edit_descriptor() {
        let edit = EditCell {
            cell: Cell::new(0, 0),
            prop: "name".to_string(),
            value: Some("abc".to_string()),
            editor: None,
        };
        let mut editor = TextEditor::from_edit(&edit);
        assert_eq!(editor.value(), "abc");
        editor.set_value("abcd");
        assert_eq!(editor.value(), "abcd");
    }
}
