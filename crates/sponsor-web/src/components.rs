//! UI Components

use leptos::prelude::*;
use sponsor_core::{Alert, AlertMode, AlertState, ClientError};

use crate::dom;

/// Host element the banner is mounted into
const BANNER_HOST: &str = "hiddenMessage";

/// Status banner
#[component]
pub fn AlertBanner(state: RwSignal<AlertState>) -> impl IntoView {
    let class = move || {
        state.with(|s| match s.visible_alert() {
            Some(alert) => format!("alert {} alert-dismissible", alert.level.css_class()),
            None => "alert hidden".to_string(),
        })
    };
    let message = move || {
        state.with(|s| {
            s.visible_alert()
                .map(|alert| alert.message.clone())
                .unwrap_or_default()
        })
    };

    view! {
        <div class=class role="alert">
            <span id="message">{message}</span>
            <button
                type="button"
                class="close"
                aria-label="Close"
                on:click=move |_| state.update(AlertState::dismiss)
            >
                <span aria-hidden="true">"×"</span>
            </button>
        </div>
    }
}

/// Handle to the page's banner
#[derive(Clone, Copy)]
pub struct Banner {
    state: RwSignal<AlertState>,
}

impl Banner {
    /// Mount the banner into its host, if the page has one
    pub fn mount() -> Self {
        let state = RwSignal::new(AlertState::new());
        match dom::by_id(BANNER_HOST).as_ref().and_then(dom::as_html) {
            Some(host) => {
                host.set_inner_html("");
                host.set_class_name("");
                leptos::mount::mount_to(host, move || view! { <AlertBanner state=state /> }).forget();
            }
            None => tracing::debug!("page has no alert banner"),
        }
        Self { state }
    }

    pub fn show(self, alert: Alert) {
        tracing::debug!(level = alert.level.as_str(), message = %alert.message, "alert");
        self.state.update(|s| s.show(alert));
    }

    /// Report a failed request in the given mode
    pub fn error(self, err: &ClientError, mode: AlertMode) {
        let alert = Alert::from_error(err);
        match mode {
            AlertMode::Banner => self.show(alert),
            AlertMode::Blocking => dom::blocking_alert(&alert.message),
        }
    }
}
