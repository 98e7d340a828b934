//! Event page: save, info/sponsors tabs, package picker and checkout

use std::cell::RefCell;
use std::rc::Rc;

use sponsor_client::{EventsApi, SponsorshipApi};
use sponsor_core::checkout::{CheckoutOutcome, sponsorship_request};
use sponsor_core::tabs::TabSet;
use sponsor_core::{Alert, AlertMode, Amount, EventTab, Package, PackageId, PackageSelection};
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use super::tabs::{TabRegion, attach_tabs, initially_active};
use crate::app::Site;
use crate::dom;
use crate::modal::{self, ModalAction};

const EVENT_PAGE: &str = ".event-page";
const PACKAGE_MODAL: &str = "#packageModal";
const CONTACT_MODAL: &str = "#contactModal";

pub fn attach(site: &Site) {
    let Some(event_id) = super::owner_id(EVENT_PAGE) else {
        return;
    };
    tracing::debug!(%event_id, "attaching event page");

    attach_save(site, &event_id);
    attach_accordion();
    attach_tabs(
        site,
        TabSet::new(EventTab::ALL, initially_active(&EventTab::ALL, "a")),
        &event_id,
        TabRegion {
            panel: ".event-page-content",
            link: "a",
        },
    );
    PackagePicker::attach(site, event_id);
    modal::show_if_form_errors(CONTACT_MODAL);
}

fn attach_save(site: &Site, event_id: &str) {
    let site = site.clone();
    let event_id = event_id.to_string();
    dom::on_click_all(".save-btn", move |_| {
        let site = site.clone();
        let event_id = event_id.clone();
        spawn_local(async move {
            match site.backend.save_event(&event_id).await {
                Ok(saved) => site.banner.show(Alert::success(saved.message)),
                Err(err) => site.banner.error(&err, AlertMode::Banner),
            }
        });
    });
}

/// Swap the plus/minus icon of a package header when it expands or collapses
fn attach_accordion() {
    for header in dom::query_all(".packages-accordion .card-header a") {
        let target = header.clone();
        dom::on(&header, "click", move |_| {
            let plus = dom::query_within(&target, ".plus-icon");
            let minus = dom::query_within(&target, ".minus-icon");
            if let (Some(plus), Some(minus)) = (plus, minus) {
                let expanding = !dom::has_class(&plus, "d-none");
                dom::set_class(&plus, "d-none", expanding);
                dom::set_class(&minus, "d-none", !expanding);
            }
        });
    }
}

/// One package row: its toggle button and the collapsible panel holding it
struct PackageControl {
    id: PackageId,
    button: Element,
    panel: Element,
}

impl PackageControl {
    fn read(button: Element) -> Option<(Self, Package)> {
        let panel = button.closest(".collapse").ok()??;
        let id = panel
            .get_attribute("data-package-id")
            .map(PackageId::new)
            .or_else(|| PackageId::from_element_id(&panel.id()))?;

        let price = match panel.get_attribute("data-price") {
            Some(raw) => Amount::parse_display(&raw),
            None => button
                .parent_element()
                .and_then(|parent| dom::query_within(&parent, ".price"))
                .map_or(Amount::Invalid, |el| Amount::parse_fixed_point(&dom::text(&el))),
        };
        if !price.is_valid() {
            tracing::warn!(package = %id, "package has no readable price");
        }

        let package = Package::new(id.as_str(), price);
        Some((Self { id, button, panel }, package))
    }
}

struct PackagePicker {
    selection: RefCell<PackageSelection>,
    controls: Vec<PackageControl>,
}

impl PackagePicker {
    fn attach(site: &Site, event_id: String) {
        let (controls, packages): (Vec<_>, Vec<_>) = dom::query_all(".select-package")
            .into_iter()
            .filter_map(PackageControl::read)
            .unzip();
        if controls.is_empty() {
            return;
        }

        let picker = Rc::new(Self {
            selection: RefCell::new(PackageSelection::new(packages)),
            controls,
        });
        picker.render();

        for (index, control) in picker.controls.iter().enumerate() {
            let picker = Rc::clone(&picker);
            dom::on(&control.button, "click", move |ev| {
                ev.prevent_default();
                picker.toggle(index);
            });
        }

        if let Some(checkout) = dom::by_id("checkout") {
            let site = site.clone();
            dom::on(&checkout, "click", move |ev| {
                ev.prevent_default();
                picker.checkout(&site, &event_id);
            });
        }
    }

    fn toggle(&self, index: usize) {
        let Some(control) = self.controls.get(index) else {
            return;
        };
        let toggled = self.selection.borrow_mut().toggle(&control.id);
        match toggled {
            Ok(_) => self.render(),
            Err(err) => tracing::warn!(error = %err, "package toggle rejected"),
        }
    }

    fn render(&self) {
        let selection = self.selection.borrow();
        for control in &self.controls {
            dom::set_text(&control.button, selection.button_label(&control.id));
            dom::set_class(&control.panel, "selected", selection.is_selected(&control.id));
        }
        dom::set_text_by_id("packageQuantity", &selection.quantity_label());
        dom::set_text_by_id("total", &selection.total_label());
        if let Some(checkout) = dom::by_id("checkout") {
            dom::set_class(&checkout, "disabled", !selection.checkout_enabled());
        }
    }

    fn checkout(&self, site: &Site, event_id: &str) {
        let Some(request) = sponsorship_request(&self.selection.borrow()) else {
            return;
        };
        tracing::info!(%event_id, packages = request.ids.len(), "creating sponsorships");

        let site = site.clone();
        let event_id = event_id.to_string();
        spawn_local(async move {
            let result = site.backend.create_sponsorships(&event_id, &request).await;
            match CheckoutOutcome::from_result(result) {
                CheckoutOutcome::Navigate(url) => dom::navigate(&url),
                CheckoutOutcome::Reopen { alert } => {
                    modal::modal(PACKAGE_MODAL, ModalAction::Toggle);
                    site.banner.show(alert);
                }
            }
        });
    }
}
