//! Page Behaviours
//!
//! Each module attaches to the regions it recognises and does nothing on
//! pages that lack them.

mod dashboard;
mod event;
mod profile;
mod purchase;
mod search;
mod site;
mod tabs;

use crate::app::Site;

pub fn attach(site: &Site) {
    site::attach(site);
    search::attach(site);
    event::attach(site);
    purchase::attach(site);
    profile::attach(site);
    dashboard::attach(site);
}

/// Id of the element carrying the page's owner id (event, user, ...)
fn owner_id(selector: &str) -> Option<String> {
    crate::dom::query(selector)
        .map(|el| el.id())
        .filter(|id| !id.is_empty())
}
