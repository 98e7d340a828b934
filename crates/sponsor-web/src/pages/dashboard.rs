//! Dashboards: status filters, event and package management, saved events
//! and the sponsorship details modal.

use sponsor_client::EventsApi;
use sponsor_core::api::PackageDetails;
use sponsor_core::navigation::{Dashboard, event_packages_path, is_package_edit_view};
use sponsor_core::{Alert, AlertMode};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlAnchorElement};

use crate::app::Site;
use crate::dom;
use crate::modal::{self, ModalAction};

const PACKAGE_MODAL: &str = "#packageModal";
const ADD_PACKAGE_MODAL: &str = "#addPackageModal";

/// Detail slots in the package modal, in `PackageDetails::rows` order
const DETAIL_SLOTS: [&str; 4] = [".price", ".audience-reached", ".description", ".type"];

pub fn attach(site: &Site) {
    attach_status_filters();
    attach_delete_event(site);
    attach_remove_saved_event(site);
    attach_package_details(site);
    attach_delete_package(site);
    attach_package_edit_view(site);
    modal::show_if_form_errors(ADD_PACKAGE_MODAL);
}

fn attach_status_filters() {
    let dashboard = if dom::pathname().starts_with("/dashboard/sponsorships") {
        Dashboard::Sponsorships
    } else {
        Dashboard::Events
    };
    for (id, dashboard) in [("filter", dashboard), ("options", Dashboard::AdminPanel)] {
        let Some(select) = dom::by_id(id) else {
            continue;
        };
        let target = select.clone();
        dom::on(&select, "change", move |_| {
            if let Some(option) = dom::query_within(&target, "option:checked") {
                dom::navigate(&dashboard.filter_path(&dom::text(&option)));
            }
        });
    }
}

/// Id of the list item a control sits in
fn list_item_id(control: &Element) -> Option<String> {
    dom::closest_id(control, "li").filter(|id| !id.is_empty())
}

fn remove_list_item(id: &str) {
    if let Some(item) = dom::by_id(id) {
        item.remove();
    }
}

fn attach_delete_event(site: &Site) {
    let site = site.clone();
    dom::on_click_all(".delete-event", move |control| {
        let Some(event_id) = list_item_id(&control) else {
            return;
        };
        let site = site.clone();
        spawn_local(async move {
            match site.backend.delete_event(&event_id).await {
                Ok(response) => {
                    remove_list_item(&event_id);
                    if let Some(response) = response {
                        site.banner.show(Alert::success(response.message));
                    }
                }
                Err(err) => site.banner.error(&err, AlertMode::Banner),
            }
        });
    });
}

fn attach_remove_saved_event(site: &Site) {
    let site = site.clone();
    dom::on_click_all(".remove-event", move |control| {
        let Some(event_id) = list_item_id(&control) else {
            return;
        };
        let site = site.clone();
        spawn_local(async move {
            match site.backend.delete_saved_event(&event_id).await {
                Ok(()) => {
                    site.banner.show(Alert::success("Event deleted!"));
                    remove_list_item(&event_id);
                }
                Err(err) => site.banner.error(&err, AlertMode::Banner),
            }
        });
    });
}

fn attach_package_details(site: &Site) {
    // following an event link must not open the modal underneath it
    for title in dom::query_all(".event-title") {
        let target = title.clone();
        dom::on(&title, "click", move |ev| {
            ev.stop_propagation();
            ev.prevent_default();
            let href = dom::query_within(&target, "a")
                .and_then(|a| a.dyn_into::<HtmlAnchorElement>().ok())
                .map(|a| a.href());
            if let Some(href) = href {
                dom::navigate(&href);
            }
        });
    }

    let site = site.clone();
    dom::on_click_all(".sponsorship", move |card| {
        let package_id = card.id();
        let site = site.clone();
        spawn_local(async move {
            match site.backend.package_details(&package_id).await {
                Ok(details) => {
                    render_package_details(&site, &details);
                    modal::modal(PACKAGE_MODAL, ModalAction::Show);
                }
                Err(err) => {
                    modal::modal(PACKAGE_MODAL, ModalAction::Toggle);
                    site.banner.error(&err, AlertMode::Banner);
                }
            }
        });
    });
}

fn render_package_details(site: &Site, details: &PackageDetails) {
    for (slot, (label, value)) in DETAIL_SLOTS.iter().zip(details.rows()) {
        let Some(el) = dom::query(&format!("{PACKAGE_MODAL} {slot}")) else {
            continue;
        };
        if let Err(err) = render_detail(&el, label, &value) {
            tracing::warn!(slot, error = %dom::js_error(&err), "failed to render package detail");
        }
    }
    if let Some(link) = dom::by_id("viewEvent") {
        let href = site.url(&format!("/events/{}", details.event_id()));
        if let Err(err) = link.set_attribute("href", &href) {
            tracing::warn!(error = %dom::js_error(&err), "failed to set event link");
        }
    }
}

/// `<span class="custom-font-semibold">{label}</span>: {value}`, value as text
fn render_detail(el: &Element, label: &str, value: &str) -> Result<(), wasm_bindgen::JsValue> {
    let Some(doc) = dom::document() else {
        return Ok(());
    };
    let heading = doc.create_element("span")?;
    heading.set_class_name("custom-font-semibold");
    dom::set_text(&heading, label);

    el.set_inner_html("");
    el.append_with_node_1(&heading)?;
    el.append_with_str_1(&format!(": {value}"))
}

fn attach_delete_package(site: &Site) {
    let Some(event_id) = super::owner_id(".edit-event-content") else {
        return;
    };
    let site = site.clone();
    dom::on_click_all(".delete-package", move |control| {
        let Some(package_id) = list_item_id(&control) else {
            return;
        };
        let site = site.clone();
        let event_id = event_id.clone();
        spawn_local(async move {
            match site.backend.delete_package(&event_id, &package_id).await {
                Ok(redirect) => dom::navigate(&redirect.url),
                Err(err) => site.banner.error(&err, AlertMode::Banner),
            }
        });
    });
}

/// On `.../edit` the package form opens pre-filled, posts back to this page,
/// and closing it returns to the event's package list
fn attach_package_edit_view(site: &Site) {
    if !is_package_edit_view(&dom::pathname()) {
        return;
    }
    if let Some(form) = dom::by_id("addPackageForm") {
        if let Err(err) = form.set_attribute("action", &dom::href()) {
            tracing::warn!(error = %dom::js_error(&err), "failed to point package form at edit view");
        }
    }
    if let Some(event_id) = super::owner_id(".edit-event-content") {
        let packages = site.url(&event_packages_path(&event_id));
        modal::on_hidden(ADD_PACKAGE_MODAL, move || dom::navigate(&packages));
    }
    modal::modal(ADD_PACKAGE_MODAL, ModalAction::Show);
}
