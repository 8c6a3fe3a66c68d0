//! DOM input overlay for cell editing.
//!
//! Creates an `<input>` element positioned over the editing cell. The
//! initial focus is deferred by one scheduling tick so the surrounding
//! render pass completes before the input can safely receive focus.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement};

/// Input overlay for cell editing.
pub(crate) struct InputOverlay {
    input: Option<HtmlInputElement>,
    focus_closure: Option<Closure<dyn FnMut()>>,
}

impl InputOverlay {
    pub(crate) fn new() -> Self {
        InputOverlay {
            input: None,
            focus_closure: None,
        }
    }

    /// Show the input overlay at the given rectangle.
    ///
    /// `rect` is `(x, y, w, h)` in logical (CSS) pixels relative to the
    /// container. Focus happens on the next tick, not synchronously.
    pub(crate) fn show(
        &mut self,
        rect: (f32, f32, f32, f32),
        current_value: &str,
        container: Option<&HtmlElement>,
    ) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let (x, y, w, h) = rect;

        let Some(input) = self.get_or_create_input(&document, container) else {
            return;
        };
        let style = input.style();
        let _ = style.set_property("display", "block");
        let _ = style.set_property("left", &format!("{x}px"));
        let _ = style.set_property("top", &format!("{y}px"));
        let _ = style.set_property("width", &format!("{w}px"));
        let _ = style.set_property("height", &format!("{h}px"));

        input.set_value(current_value);
        self.defer_focus();
    }

    /// Hide the input overlay.
    pub(crate) fn hide(&mut self) {
        if let Some(ref input) = self.input {
            let _ = input.style().set_property("display", "none");
            let _ = input.blur();
        }
    }

    /// Current input value.
    pub(crate) fn value(&self) -> Option<String> {
        self.input.as_ref().map(|i| i.value())
    }

    /// Focus the input one tick later: the render pass around the editor
    /// must settle first or the focus triggers a re-layout race.
    fn defer_focus(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if self.focus_closure.is_none() {
            let input = self.input.clone();
            let closure = Closure::wrap(Box::new(move || {
                if let Some(ref input) = input {
                    let _ = input.focus();
                    input.select();
                }
            }) as Box<dyn FnMut()>);
            self.focus_closure = Some(closure);
        }
        if let Some(closure) = self.focus_closure.as_ref() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                0,
            );
        }
    }

    /// Get or create the `<input>` element.
    fn get_or_create_input(
        &mut self,
        document: &Document,
        container: Option<&HtmlElement>,
    ) -> Option<&HtmlInputElement> {
        if self.input.is_none() {
            let input = document
                .create_element("input")
                .ok()?
                .dyn_into::<HtmlInputElement>()
                .ok()?;
            input.set_type("text");
            let style = input.style();
            let _ = style.set_property("position", "absolute");
            let _ = style.set_property("z-index", "1000");
            let _ = style.set_property("box-sizing", "border-box");
            let _ = style.set_property("border", "2px solid #4285f4");
            let _ = style.set_property("outline", "none");
            let _ = style.set_property("padding", "0 4px");
            let _ = style.set_property("font-family", "inherit");
            let _ = style.set_property("font-size", "13px");
            let _ = style.set_property("background", "#fff");
            let _ = style.set_property("display", "none");

            if let Some(c) = container {
                let _ = c.append_child(&input);
            } else if let Some(body) = document.body() {
                let _ = body.append_child(&input);
            }
            // closure captures the input element; rebuild it next defer
            self.focus_closure = None;
            self.input = Some(input);
        }
        self.input.as_ref()
    }
}

impl Drop for InputOverlay {
    fn drop(&mut self) {
        if let Some(ref input) = self.input {
            if let Some(parent) = input.parent_node() {
                let _ = parent.remove_child(input);
            }
        }
    }
}
