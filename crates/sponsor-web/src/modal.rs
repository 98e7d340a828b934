//! Bootstrap modal bindings
//!
//! The site ships Bootstrap's jQuery plugin; modals are driven through
//! `$(selector).modal(action)`.

use wasm_bindgen::prelude::*;

use crate::dom;

#[wasm_bindgen]
extern "C" {
    type JQuery;

    #[wasm_bindgen(js_name = "$", catch)]
    fn jquery(selector: &str) -> Result<JQuery, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn modal(this: &JQuery, action: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn on(this: &JQuery, event: &str, handler: &Closure<dyn FnMut()>) -> Result<JsValue, JsValue>;
}

#[derive(Clone, Copy, Debug)]
pub enum ModalAction {
    Show,
    Toggle,
}

impl ModalAction {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Toggle => "toggle",
        }
    }
}

pub fn modal(selector: &str, action: ModalAction) {
    let result = jquery(selector).and_then(|el| el.modal(action.as_str()));
    if let Err(err) = result {
        tracing::warn!(selector, error = %dom::js_error(&err), "modal call failed");
    }
}

/// Run `handler` once Bootstrap has finished hiding the modal
///
/// Bootstrap raises `hidden.bs.modal` through jQuery, so native listeners
/// never see it.
pub fn on_hidden(selector: &str, handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    let result = jquery(selector).and_then(|el| el.on("hidden.bs.modal", &closure));
    match result {
        Ok(_) => closure.forget(),
        Err(err) => tracing::warn!(selector, error = %dom::js_error(&err), "modal listener failed"),
    }
}

/// Reopen a modal whose form came back with validation errors
pub fn show_if_form_errors(selector: &str) {
    if dom::query(&format!("{selector} .invalid-feedback")).is_some() {
        tracing::debug!(selector, "reopening modal with form errors");
        modal(selector, ModalAction::Show);
    }
}
