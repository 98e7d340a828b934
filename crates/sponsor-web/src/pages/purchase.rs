//! Purchase page: order summary, card payment and the abandon beacon

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use sponsor_client::HttpBackend;
use sponsor_core::checkout::PurchaseSession;
use sponsor_core::navigation::company_events_path;
use sponsor_payments::{PaymentEvent, PaymentFlow, PaymentSession, PaymentView, UiEffect};
use wasm_bindgen_futures::spawn_local;

use crate::app::Site;
use crate::components::Banner;
use crate::dom;
use crate::stripe::{CardChange, StripeCard};

const PURCHASE_PAGE: &str = ".purchase-page";
const SUBMIT: &str = ".stripe-button";

type Session = PaymentSession<HttpBackend, StripeCard, DomPaymentView>;

/// Routes events back into the session once it exists
#[derive(Clone, Default)]
struct Dispatcher {
    session: Rc<RefCell<Weak<Session>>>,
}

impl Dispatcher {
    fn bind(&self, session: &Rc<Session>) {
        *self.session.borrow_mut() = Rc::downgrade(session);
    }

    fn send(&self, event: PaymentEvent) {
        let Some(session) = self.session.borrow().upgrade() else {
            tracing::debug!(?event, "payment session gone");
            return;
        };
        spawn_local(async move { session.dispatch(event).await });
    }
}

pub fn attach(site: &Site) {
    let Some(event_id) = super::owner_id(PURCHASE_PAGE) else {
        return;
    };
    tracing::debug!(%event_id, "attaching purchase page");

    let order_total_cents = render_order_summary(site);

    let purchase = Rc::new(RefCell::new(PurchaseSession::new(event_id.clone())));
    attach_abandon_beacon(site, Rc::clone(&purchase));
    attach_company_links(site);

    let dispatcher = Dispatcher::default();
    let card = {
        let dispatcher = dispatcher.clone();
        StripeCard::new(
            site.config.stripe_publishable_key.clone(),
            move |CardChange { empty, error }| dispatcher.send(PaymentEvent::WidgetChanged { empty, error }),
        )
    };
    let view = DomPaymentView {
        banner: site.banner,
        purchase,
        dispatcher: dispatcher.clone(),
    };
    let session = Rc::new(PaymentSession::new(
        PaymentFlow::new(event_id, &site.config),
        HttpBackend::clone(&site.backend),
        card,
        view,
    ));
    dispatcher.bind(&session);

    if let Some(form) = dom::by_id("payment-form") {
        let dispatcher = dispatcher.clone();
        dom::on(&form, "submit", move |ev| {
            ev.prevent_default();
            dispatcher.send(PaymentEvent::Submit);
        });
    }

    spawn_local(async move {
        session.dispatch(PaymentEvent::Start { order_total_cents }).await;
    });
}

/// Write tax and total from the rendered line items; returns the total in cents
fn render_order_summary(site: &Site) -> Option<i64> {
    let line_items: Vec<String> = dom::query_all(".subtotal").iter().map(dom::text).collect();
    let summary = site.config.price_calculator().summarize(&line_items);

    dom::set_text_by_id("salesTax", &summary.tax_display());
    dom::set_text_by_id("orderTotal", &summary.total_display());
    summary.total_cents()
}

/// Upcoming/past event links open the organiser's profile in a new tab
fn attach_company_links(site: &Site) {
    let Some(company) = super::owner_id(".view-profile") else {
        return;
    };
    for (id, past) in [("upcomingEvents", false), ("pastEvents", true)] {
        let Some(link) = dom::by_id(id) else {
            continue;
        };
        let url = site.url(&company_events_path(&company, past));
        dom::on(&link, "click", move |_| dom::open(&url));
    }
}

/// Cancel the pending sponsorships if the buyer leaves before paying
fn attach_abandon_beacon(site: &Site, purchase: Rc<RefCell<PurchaseSession>>) {
    let Some(window) = dom::window() else {
        return;
    };
    let origin = site.config.origin.clone();
    dom::on(&window, "pagehide", move |_| {
        if let Some(url) = purchase.borrow().cancel_url(&origin) {
            let queued = dom::send_beacon(&url);
            tracing::info!(url, queued, "cancel-purchase beacon");
        }
    });
}

/// Renders the payment flow onto the purchase page markup
struct DomPaymentView {
    banner: Banner,
    purchase: Rc<RefCell<PurchaseSession>>,
    dispatcher: Dispatcher,
}

impl PaymentView for DomPaymentView {
    fn apply(&self, effect: UiEffect) {
        match effect {
            UiEffect::SetSubmitEnabled(enabled) => {
                if let Some(button) = dom::query(SUBMIT) {
                    dom::set_disabled(&button, !enabled);
                }
            }
            UiEffect::SetBusy(busy) => {
                if let Some(spinner) = dom::by_id("spinner") {
                    dom::set_hidden(&spinner, !busy);
                }
                if let Some(label) = dom::by_id("button-text") {
                    dom::set_hidden(&label, busy);
                }
            }
            UiEffect::ShowCardError(message) => dom::set_text_by_id("card-error", &message),
            UiEffect::ExpireCardError { generation, after } => {
                let dispatcher = self.dispatcher.clone();
                Timeout::new(millis(after), move || {
                    dispatcher.send(PaymentEvent::CardErrorExpired { generation });
                })
                .forget();
            }
            UiEffect::ShowAlert(alert) => self.banner.show(alert),
            UiEffect::RevealResult => {
                if let Some(result) = dom::query(".result-message") {
                    dom::set_hidden(&result, false);
                }
            }
            UiEffect::RedirectAfter { url, after } => {
                Timeout::new(millis(after), move || dom::navigate(&url)).forget();
            }
            UiEffect::PurchaseCompleted => self.purchase.borrow_mut().complete(),
        }
    }
}

fn millis(duration: std::time::Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}
