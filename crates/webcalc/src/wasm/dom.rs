//! DOM-backed display collaborator

use std::time::Duration;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, HtmlInputElement, Window};

use crate::display::DisplaySink;

/// ID of the `<input>` showing the expression
pub const DISPLAY_ID: &str = "display";
/// ID of the element showing transient errors
pub const ERROR_ID: &str = "error";
/// ID of the `<ul>`/`<ol>` listing past calculations
pub const HISTORY_ID: &str = "history";

/// Renders calculator output into page elements
#[derive(Debug)]
pub struct DomSink {
    window: Window,
    document: Document,
    display: HtmlInputElement,
    error: Element,
    history: Element,
}

impl DomSink {
    /// Binds to the standard element IDs of the current document
    pub fn from_document() -> Result<Self, JsValue> {
        Self::with_ids(DISPLAY_ID, ERROR_ID, HISTORY_ID)
    }

    /// Binds to elements with the given IDs
    pub fn with_ids(display_id: &str, error_id: &str, history_id: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;

        let display = find(&document, display_id)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| JsValue::from_str(&format!("#{display_id} is not an <input>")))?;
        let error = find(&document, error_id)?;
        let history = find(&document, history_id)?;

        Ok(Self {
            window,
            document,
            display,
            error,
            history,
        })
    }
}

fn find(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))
}

impl DisplaySink for DomSink {
    fn update_display(&mut self, text: &str) {
        self.display.set_value(text);
    }

    fn show_error(&mut self, message: &str, clear_after: Duration) {
        self.error.set_text_content(Some(message));

        // One-shot and never cancelled; a newer error gets its own timer
        let target = self.error.clone();
        let callback = Closure::once_into_js(move || target.set_text_content(None));
        let millis = i32::try_from(clear_after.as_millis()).unwrap_or(i32::MAX);

        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        {
            console::warn_2(&JsValue::from_str("failed to schedule error clear:"), &err);
        }
    }

    fn render_history(&mut self, lines: &[String]) {
        self.history.set_text_content(None);

        for line in lines {
            let item = match self.document.create_element("li") {
                Ok(item) => item,
                Err(err) => {
                    console::warn_2(&JsValue::from_str("failed to create history item:"), &err);
                    return;
                }
            };
            item.set_text_content(Some(line));
            if let Err(err) = self.history.append_child(&item) {
                console::warn_2(&JsValue::from_str("failed to append history item:"), &err);
                return;
            }
        }
    }
}
