//! Search forms and result pagination

use sponsor_core::search::FormField;
use sponsor_core::{AlertMode, PageControl, SearchCache, SearchKind, SearchQuery};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement};

use crate::app::Site;
use crate::dom::{self, SessionStore};

const SIMPLE_FORM: &str = ".has-search";
const ADVANCED_FORM: &str = ".advanced-search-form";
const PAGINATION: &str = "main.search";

pub fn attach(site: &Site) {
    let store = match SessionStore::open() {
        Ok(store) => store,
        Err(err) => {
            tracing::warn!(error = %err, "search caching disabled");
            return;
        }
    };

    // the simple search box lives in the navbar; the form is its parent
    let simple = dom::query(SIMPLE_FORM)
        .and_then(|el| el.parent_element())
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok());
    if let Some(form) = simple {
        cache_on_submit(site, &form, SearchCache::new(store.clone(), SearchKind::Simple));
    }

    let advanced = dom::query(ADVANCED_FORM).and_then(|el| el.dyn_into::<HtmlFormElement>().ok());
    let pagination_kind = if advanced.is_some() {
        SearchKind::Advanced
    } else {
        SearchKind::Simple
    };
    if let Some(form) = advanced {
        cache_on_submit(site, &form, SearchCache::new(store.clone(), SearchKind::Advanced));
    }

    if let Some(nav) = dom::by_id(PAGINATION) {
        attach_pagination(site, &nav, SearchCache::new(store, pagination_kind));
    }
}

fn cache_on_submit(site: &Site, form: &HtmlFormElement, cache: SearchCache<SessionStore>) {
    let site = site.clone();
    let target = form.clone();
    dom::on(form, "submit", move |_| {
        let query = SearchQuery::capture(cache.kind(), &form_fields(&target));
        if let Err(err) = cache.remember(&query) {
            site.banner.error(&err, AlertMode::Banner);
        }
    });
}

fn attach_pagination(site: &Site, nav: &Element, cache: SearchCache<SessionStore>) {
    let site = site.clone();
    let container = nav.clone();
    dom::on(nav, "click", move |ev| {
        ev.prevent_default();
        let Some(target) = dom::event_element(&ev) else {
            return;
        };
        let Some(container_id) = container.first_element_child().map(|el| el.id()) else {
            return;
        };

        let control = PageControl::from_element(
            &target.id(),
            dom::has_class(&target, "disabled"),
            &dom::text(&target),
        );
        let Some(page) = control.resolve(&container_id) else {
            tracing::debug!(?control, "pagination click ignored");
            return;
        };

        match cache.page_url(&site.config.origin, page) {
            Ok(url) => dom::navigate(&url),
            Err(err) => site.banner.error(&err, AlertMode::Banner),
        }
    });
}

fn form_fields(form: &HtmlFormElement) -> Vec<FormField> {
    let elements = form.elements();
    (0..elements.length())
        .filter_map(|i| elements.item(i))
        .filter_map(|el| field(&el))
        .collect()
}

fn field(el: &Element) -> Option<FormField> {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return Some(FormField::new(input.name(), input.type_(), input.value()));
    }
    if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        return Some(FormField::new(select.name(), "select", select.value()));
    }
    // buttons and fieldsets carry no query value
    None
}
