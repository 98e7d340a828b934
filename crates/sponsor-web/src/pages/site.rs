//! Behaviour shared by every page: the create/delete event nav link.

use sponsor_client::EventsApi;
use sponsor_core::AlertMode;
use sponsor_core::navigation::{event_id_from_path, hides_create_event_link};
use wasm_bindgen_futures::spawn_local;

use crate::app::Site;
use crate::dom;

const CREATE_EVENT: &str = "createEvent";
const DELETE_PROMPT: &str = "Are you sure you want to delete this event?  This cannot be undone.";

pub fn attach(site: &Site) {
    let path = dom::pathname();

    if hides_create_event_link(&path) {
        if let Some(link) = dom::by_id(CREATE_EVENT) {
            link.remove();
        }
        return;
    }

    if let Some(event_id) = event_id_from_path(&path) {
        attach_delete_event(site, event_id.to_string());
    }
}

/// On event sub-pages the nav link deletes the event instead
fn attach_delete_event(site: &Site, event_id: String) {
    let Some(link) = dom::query(&format!("#{CREATE_EVENT} a")) else {
        return;
    };
    dom::set_text(&link, "Delete Event");

    let site = site.clone();
    dom::on(&link, "click", move |ev| {
        ev.prevent_default();
        if !dom::confirm(DELETE_PROMPT) {
            return;
        }
        let site = site.clone();
        let event_id = event_id.clone();
        spawn_local(async move {
            match site.backend.delete_event(&event_id).await {
                Ok(_) => {
                    tracing::info!(%event_id, "event deleted");
                    dom::navigate(&site.config.site_root());
                }
                Err(err) => site.banner.error(&err, AlertMode::Banner),
            }
        });
    });
}
