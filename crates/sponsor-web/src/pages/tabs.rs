//! Tab rows that swap server-rendered fragments into a panel

use std::cell::RefCell;
use std::rc::Rc;

use sponsor_client::FragmentApi;
use sponsor_core::{AlertMode, Tab, TabSet};
use wasm_bindgen_futures::spawn_local;

use crate::app::Site;
use crate::dom;

/// Where a tab row renders
#[derive(Clone, Copy)]
pub struct TabRegion {
    /// Panel receiving the fragment
    pub panel: &'static str,
    /// Element inside each tab that carries the `active` marker
    pub link: &'static str,
}

pub fn attach_tabs<T: Tab + 'static>(site: &Site, tabs: TabSet<T>, owner_id: &str, region: TabRegion) {
    let all = tabs.tabs().to_vec();
    let state = Rc::new(RefCell::new(tabs));

    for tab in all {
        let Some(el) = dom::by_id(tab.dom_id()) else {
            continue;
        };
        let site = site.clone();
        let state = Rc::clone(&state);
        let owner_id = owner_id.to_string();

        dom::on(&el, "click", move |ev| {
            ev.prevent_default();
            let request = state.borrow_mut().request(tab);
            let endpoint = tab.endpoint(&owner_id);
            let site = site.clone();
            let state = Rc::clone(&state);

            spawn_local(async move {
                match site.backend.fragment(&endpoint).await {
                    Ok(html) => {
                        if !state.borrow_mut().complete(request) {
                            return;
                        }
                        if let Some(panel) = dom::query(region.panel) {
                            panel.set_inner_html(&html);
                        }
                        render_active(&state.borrow(), region);
                    }
                    Err(err) if state.borrow().is_current(&request) => {
                        site.banner.error(&err, AlertMode::Banner);
                    }
                    Err(err) => tracing::debug!(error = %err, "superseded tab request failed"),
                }
            });
        });
    }
}

/// Tab whose link is already marked active in the markup
pub fn initially_active<T: Tab>(tabs: &[T], link: &str) -> Option<T> {
    tabs.iter().copied().find(|tab| {
        dom::query(&format!("#{} {link}", tab.dom_id())).is_some_and(|el| dom::has_class(&el, "active"))
    })
}

fn render_active<T: Tab>(tabs: &TabSet<T>, region: TabRegion) {
    for &tab in tabs.tabs() {
        if let Some(link) = dom::query(&format!("#{} {}", tab.dom_id(), region.link)) {
            dom::set_class(&link, "active", tabs.is_active(tab));
        }
    }
}
