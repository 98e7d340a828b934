//! DOM helpers
//!
//! Thin wrappers over `web_sys` so page modules read as behaviour, not
//! binding plumbing. Lookups return `Option`; a missing element means the
//! current page does not carry that region.

use sponsor_core::{ClientError, QueryStore, Result};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Storage, Window};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// First element matching `selector`
pub fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok()?
}

/// Every element matching `selector`, in document order
pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(nodes) = document().and_then(|doc| doc.query_selector_all(selector).ok()) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_within(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok()?
}

pub fn text(el: &Element) -> String {
    el.text_content().unwrap_or_default()
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_text_by_id(id: &str, text: &str) {
    if let Some(el) = by_id(id) {
        set_text(&el, text);
    }
}

pub fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

/// Add `class` when `on`, remove it otherwise
pub fn set_class(el: &Element, class: &str, on: bool) {
    if let Err(err) = el.class_list().toggle_with_force(class, on) {
        tracing::warn!(class, error = %js_error(&err), "class toggle failed");
    }
}

/// Id of the closest ancestor (or self) matching `selector`
pub fn closest_id(el: &Element, selector: &str) -> Option<String> {
    el.closest(selector).ok()?.map(|found| found.id())
}

/// Attach a listener for the page's lifetime
pub fn on(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        tracing::warn!(event, error = %js_error(&err), "failed to attach listener");
    }
    closure.forget();
}

/// Attach `handler` to the click of every element matching `selector`.
/// The default action is suppressed; the handler receives the element.
pub fn on_click_all(selector: &str, handler: impl Fn(Element) + Clone + 'static) {
    for el in query_all(selector) {
        let handler = handler.clone();
        let target = el.clone();
        on(&el, "click", move |ev| {
            ev.prevent_default();
            handler(target.clone());
        });
    }
}

/// Element that dispatched `ev`
pub fn event_element(ev: &Event) -> Option<Element> {
    ev.target()?.dyn_into::<Element>().ok()
}

pub fn pathname() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

pub fn origin() -> String {
    window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

pub fn navigate(url: &str) {
    tracing::info!(url, "navigating");
    if let Some(window) = window() {
        if let Err(err) = window.location().set_href(url) {
            tracing::error!(url, error = %js_error(&err), "navigation failed");
        }
    }
}

pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn blocking_alert(message: &str) {
    if let Some(window) = window() {
        if let Err(err) = window.alert_with_message(message) {
            tracing::error!(message, error = %js_error(&err), "blocking alert failed");
        }
    }
}

/// Open `url` in a new browsing context
pub fn open(url: &str) {
    tracing::info!(url, "opening window");
    if let Some(window) = window() {
        if let Err(err) = window.open_with_url(url) {
            tracing::error!(url, error = %js_error(&err), "window open failed");
        }
    }
}

/// Full address of the current page
pub fn href() -> String {
    window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default()
}

/// Fire-and-forget POST; the browser delivers it even while unloading
pub fn send_beacon(url: &str) -> bool {
    window()
        .and_then(|w| w.navigator().send_beacon(url).ok())
        .unwrap_or(false)
}

/// Show or hide an element with the site's `hidden` utility class
pub fn set_hidden(el: &Element, hidden: bool) {
    set_class(el, "hidden", hidden);
}

pub fn set_disabled(el: &Element, disabled: bool) {
    if let Some(button) = el.dyn_ref::<web_sys::HtmlButtonElement>() {
        button.set_disabled(disabled);
    } else if let Some(input) = el.dyn_ref::<web_sys::HtmlInputElement>() {
        input.set_disabled(disabled);
    }
}

pub fn as_html(el: &Element) -> Option<HtmlElement> {
    el.dyn_ref::<HtmlElement>().cloned()
}

pub fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// `sessionStorage`-backed query store
#[derive(Clone)]
pub struct SessionStore {
    storage: Storage,
}

impl SessionStore {
    pub fn open() -> Result<Self> {
        window()
            .and_then(|w| w.session_storage().ok().flatten())
            .map(|storage| Self { storage })
            .ok_or_else(|| ClientError::Storage("sessionStorage unavailable".into()))
    }
}

fn storage_error(err: JsValue) -> ClientError {
    ClientError::Storage(js_error(&err))
}

impl QueryStore for SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(storage_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(storage_error)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(storage_error)
    }
}
