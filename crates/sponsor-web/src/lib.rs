//! sponsormatch Web Front End
//!
//! WASM module loaded by every server-rendered page. At start-up it reads the
//! embedded configuration, mounts the status banner and attaches each page
//! behaviour whose markers are present in the document.

mod app;
mod components;
mod dom;
mod modal;
mod pages;
mod stripe;

pub use app::Site;
pub use components::AlertBanner;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    app::start();
}
