//! Payment Confirmation State Machine
//!
//! One instance covers one checkout attempt on the purchase page. It never
//! performs I/O; every transition returns the effects the caller must carry
//! out.

use std::time::Duration;

use sponsor_core::api::{
    CheckoutSuccessRequest, CheckoutSuccessResponse, PaymentIntent, PaymentIntentRequest,
};
use sponsor_core::{Alert, ClientConfig, ClientError};

use crate::error::PaymentError;

/// Where the attempt currently stands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentState {
    Idle,
    RequestingIntent,
    WidgetReady,
    Confirming,
    Succeeded,
    /// No intent or widget; the buyer has to reload the page
    Unavailable,
}

/// Inputs to the state machine
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaymentEvent {
    /// Page loaded; `None` when the rendered total could not be read
    Start { order_total_cents: Option<i64> },
    IntentCreated(PaymentIntent),
    IntentFailed(ClientError),
    WidgetFailed(String),
    /// Widget input changed
    WidgetChanged { empty: bool, error: Option<String> },
    Submit,
    ConfirmationFailed { message: String },
    ConfirmationSucceeded { payment_intent_id: String },
    SuccessReported(CheckoutSuccessResponse),
    SuccessReportFailed(ClientError),
    /// A card-error timer fired
    CardErrorExpired { generation: u64 },
}

/// Presentation changes for the purchase page
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEffect {
    SetSubmitEnabled(bool),
    SetBusy(bool),
    /// Replace the card error text; empty clears it
    ShowCardError(String),
    /// Feed `CardErrorExpired { generation }` back after `after`
    ExpireCardError { generation: u64, after: Duration },
    ShowAlert(Alert),
    /// Reveal the static "payment complete" message
    RevealResult,
    RedirectAfter { url: String, after: Duration },
    /// Pending sponsorships are paid for; stop cancelling them on unload
    PurchaseCompleted,
}

/// Work requested by a transition
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    RequestIntent(PaymentIntentRequest),
    MountWidget,
    Confirm { client_secret: String },
    ReportSuccess(CheckoutSuccessRequest),
    Ui(UiEffect),
}

/// Payment confirmation state machine
#[derive(Clone, Debug)]
pub struct PaymentFlow {
    state: PaymentState,
    event_id: String,
    client_secret: Option<String>,
    input_ready: bool,
    error_generation: u64,
    reported: bool,
    card_error_clear: Duration,
    redirect_delay: Duration,
    site_root: String,
}

impl PaymentFlow {
    pub fn new(event_id: impl Into<String>, config: &ClientConfig) -> Self {
        Self {
            state: PaymentState::Idle,
            event_id: event_id.into(),
            client_secret: None,
            input_ready: false,
            error_generation: 0,
            reported: false,
            card_error_clear: config.card_error_clear_delay(),
            redirect_delay: config.redirect_delay(),
            site_root: config.site_root(),
        }
    }

    pub const fn state(&self) -> PaymentState {
        self.state
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// Apply one event
    pub fn handle(&mut self, event: PaymentEvent) -> Vec<Effect> {
        use PaymentState as S;

        match (self.state, event) {
            (S::Idle, PaymentEvent::Start { order_total_cents: Some(cents) }) => {
                self.state = S::RequestingIntent;
                vec![
                    ui(UiEffect::SetSubmitEnabled(false)),
                    Effect::RequestIntent(PaymentIntentRequest { order_total: cents }),
                ]
            }
            (S::Idle, PaymentEvent::Start { order_total_cents: None }) => {
                self.unavailable(&PaymentError::InvalidTotal)
            }
            (S::RequestingIntent, PaymentEvent::IntentCreated(intent)) => {
                self.state = S::WidgetReady;
                self.client_secret = Some(intent.client_secret);
                vec![Effect::MountWidget]
            }
            (S::RequestingIntent, PaymentEvent::IntentFailed(err)) => {
                self.unavailable(&PaymentError::Backend(err))
            }
            (S::WidgetReady | S::Confirming, PaymentEvent::WidgetFailed(msg)) => {
                self.unavailable(&PaymentError::Widget(msg))
            }
            (S::WidgetReady | S::Confirming, PaymentEvent::WidgetChanged { empty, error }) => {
                self.input_ready = !empty && error.is_none();
                let mut effects = vec![ui(UiEffect::ShowCardError(error.unwrap_or_default()))];
                if self.state == S::WidgetReady {
                    effects.push(ui(UiEffect::SetSubmitEnabled(self.input_ready)));
                }
                effects
            }
            (S::WidgetReady, PaymentEvent::Submit) if self.input_ready => {
                let Some(client_secret) = self.client_secret.clone() else {
                    return self.unavailable(&PaymentError::Widget("missing client secret".into()));
                };
                self.state = S::Confirming;
                vec![
                    ui(UiEffect::SetSubmitEnabled(false)),
                    ui(UiEffect::SetBusy(true)),
                    Effect::Confirm { client_secret },
                ]
            }
            (S::Confirming, PaymentEvent::ConfirmationFailed { message }) => {
                self.state = S::WidgetReady;
                self.error_generation += 1;
                tracing::info!(event_id = %self.event_id, "card payment failed");
                vec![
                    ui(UiEffect::SetBusy(false)),
                    ui(UiEffect::SetSubmitEnabled(self.input_ready)),
                    ui(UiEffect::ShowCardError(message)),
                    ui(UiEffect::ExpireCardError {
                        generation: self.error_generation,
                        after: self.card_error_clear,
                    }),
                ]
            }
            (S::Confirming, PaymentEvent::ConfirmationSucceeded { payment_intent_id }) => {
                self.state = S::Succeeded;
                tracing::info!(event_id = %self.event_id, %payment_intent_id, "card payment confirmed");
                vec![
                    ui(UiEffect::SetBusy(false)),
                    ui(UiEffect::SetSubmitEnabled(false)),
                    ui(UiEffect::PurchaseCompleted),
                    Effect::ReportSuccess(CheckoutSuccessRequest {
                        event_id: self.event_id.clone(),
                    }),
                ]
            }
            (S::Succeeded, PaymentEvent::SuccessReported(outcome)) if !self.reported => {
                self.reported = true;
                let mut effects = Vec::with_capacity(3);
                if outcome.is_success() {
                    effects.push(ui(UiEffect::ShowAlert(Alert::success(outcome.message))));
                    effects.push(ui(UiEffect::RevealResult));
                } else {
                    tracing::warn!(code = outcome.code, "checkout success rejected");
                    effects.push(ui(UiEffect::ShowAlert(Alert::danger(outcome.message))));
                }
                effects.push(self.redirect());
                effects
            }
            (S::Succeeded, PaymentEvent::SuccessReportFailed(err)) if !self.reported => {
                self.reported = true;
                vec![ui(UiEffect::ShowAlert(Alert::from_error(&err))), self.redirect()]
            }
            (_, PaymentEvent::CardErrorExpired { generation }) => {
                if generation == self.error_generation {
                    vec![ui(UiEffect::ShowCardError(String::new()))]
                } else {
                    Vec::new()
                }
            }
            (state, event) => {
                tracing::debug!(?state, ?event, "payment event ignored");
                Vec::new()
            }
        }
    }

    fn unavailable(&mut self, err: &PaymentError) -> Vec<Effect> {
        tracing::warn!(event_id = %self.event_id, error = %err, "payment form unavailable");
        self.state = PaymentState::Unavailable;
        vec![
            ui(UiEffect::SetSubmitEnabled(false)),
            ui(UiEffect::ShowAlert(Alert::danger(err.user_message()))),
        ]
    }

    fn redirect(&self) -> Effect {
        ui(UiEffect::RedirectAfter {
            url: self.site_root.clone(),
            after: self.redirect_delay,
        })
    }
}

const fn ui(effect: UiEffect) -> Effect {
    Effect::Ui(effect)
}
