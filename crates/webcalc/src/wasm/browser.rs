//! wasm-bindgen entry point

use wasm_bindgen::prelude::*;

use crate::action::Keypad;
use crate::calculator::{Calculator, Cycle};
use crate::config::CalculatorConfig;
use crate::wasm::dom::DomSink;

/// Browser calculator bound to the page's display, error and history elements
#[wasm_bindgen]
#[derive(Debug)]
pub struct BrowserCalculator {
    inner: Calculator<DomSink>,
    keypad: Keypad,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Binds to `#display`, `#error` and `#history` with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<BrowserCalculator, JsValue> {
        Self::build(CalculatorConfig::default())
    }

    /// Binds with a JSON configuration (missing fields take defaults)
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<BrowserCalculator, JsValue> {
        let config =
            CalculatorConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::build(config)
    }

    fn build(config: CalculatorConfig) -> Result<BrowserCalculator, JsValue> {
        console_error_panic_hook::set_once();
        let sink = DomSink::from_document()?;
        Ok(Self {
            inner: Calculator::with_config(sink, config),
            keypad: Keypad::new(),
        })
    }

    /// Handles a click on a button with optional `data-action` and its text.
    /// Returns true if the click mapped to an action.
    pub fn press(&mut self, data_action: Option<String>, label: &str) -> bool {
        !matches!(
            self.inner.press_button(data_action.as_deref(), label),
            Cycle::Ignored
        )
    }

    /// Handles a click on a keypad button by element ID
    pub fn click(&mut self, element_id: &str) -> bool {
        match self.keypad.handle_click(element_id) {
            Some(action) => {
                self.inner.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Handles a `keydown` key value. Returns true if handled, in which
    /// case the page should call `preventDefault()`.
    pub fn key(&mut self, key: &str) -> bool {
        !matches!(self.inner.press_key(key), Cycle::Ignored)
    }

    /// The current expression text
    #[wasm_bindgen(getter)]
    pub fn expression(&self) -> String {
        self.inner.expression().to_string()
    }

    /// History entries, newest first, as a JSON array
    #[wasm_bindgen(js_name = historyJson)]
    pub fn history_json(&self) -> Result<String, JsValue> {
        self.inner
            .history()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
