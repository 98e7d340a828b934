//! Drives a [`PaymentFlow`] against the backend and the card widget.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use sponsor_client::PaymentsApi;

use crate::error::{PaymentError, Result};
use crate::flow::{Effect, PaymentEvent, PaymentFlow, PaymentState, UiEffect};

/// Result of a confirmed card payment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmedPayment {
    pub payment_intent_id: String,
}

/// Embedded card form
#[async_trait(?Send)]
pub trait PaymentWidget {
    /// Mount the form into the page
    async fn mount(&self) -> Result<()>;

    /// Confirm the intent with the entered card. A declined card is
    /// [`PaymentError::Card`] carrying the processor's message.
    async fn confirm(&self, client_secret: &str) -> Result<ConfirmedPayment>;
}

/// Renders UI effects
pub trait PaymentView {
    fn apply(&self, effect: UiEffect);
}

/// Runs one payment attempt
pub struct PaymentSession<B, W, V> {
    flow: RefCell<PaymentFlow>,
    backend: B,
    widget: W,
    view: V,
}

impl<B, W, V> PaymentSession<B, W, V>
where
    B: PaymentsApi,
    W: PaymentWidget,
    V: PaymentView,
{
    pub const fn new(flow: PaymentFlow, backend: B, widget: W, view: V) -> Self {
        Self {
            flow: RefCell::new(flow),
            backend,
            widget,
            view,
        }
    }

    pub fn state(&self) -> PaymentState {
        self.flow.borrow().state()
    }

    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Feed an event and run every effect it leads to.
    ///
    /// The flow is only borrowed while a transition runs, so widget callbacks
    /// may dispatch while a confirmation is in flight.
    pub async fn dispatch(&self, event: PaymentEvent) {
        let mut pending = VecDeque::from([event]);

        while let Some(event) = pending.pop_front() {
            let effects = self.flow.borrow_mut().handle(event);
            for effect in effects {
                if let Some(next) = self.run(effect).await {
                    pending.push_back(next);
                }
            }
        }
    }

    async fn run(&self, effect: Effect) -> Option<PaymentEvent> {
        match effect {
            Effect::RequestIntent(request) => {
                Some(match self.backend.create_payment_intent(&request).await {
                    Ok(intent) => PaymentEvent::IntentCreated(intent),
                    Err(err) => PaymentEvent::IntentFailed(err),
                })
            }
            Effect::MountWidget => self
                .widget
                .mount()
                .await
                .err()
                .map(|err| PaymentEvent::WidgetFailed(err.to_string())),
            Effect::Confirm { client_secret } => {
                Some(match self.widget.confirm(&client_secret).await {
                    Ok(confirmed) => PaymentEvent::ConfirmationSucceeded {
                        payment_intent_id: confirmed.payment_intent_id,
                    },
                    Err(PaymentError::Card(message)) => PaymentEvent::ConfirmationFailed { message },
                    Err(err) => {
                        tracing::warn!(error = %err, "card confirmation failed");
                        PaymentEvent::ConfirmationFailed {
                            message: err.user_message(),
                        }
                    }
                })
            }
            Effect::ReportSuccess(request) => {
                Some(match self.backend.checkout_success(&request).await {
                    Ok(outcome) => PaymentEvent::SuccessReported(outcome),
                    Err(err) => PaymentEvent::SuccessReportFailed(err),
                })
            }
            Effect::Ui(ui) => {
                self.view.apply(ui);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sponsor_core::api::{
        CheckoutSuccessRequest, CheckoutSuccessResponse, PaymentIntent, PaymentIntentRequest,
    };
    use sponsor_core::{Alert, AlertLevel, ClientConfig, ClientError};
    use std::time::Duration;

    #[derive(Default)]
    struct FakeBackend {
        intent_fails: bool,
        intents: RefCell<Vec<i64>>,
        reports: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl PaymentsApi for FakeBackend {
        async fn create_payment_intent(
            &self,
            request: &PaymentIntentRequest,
        ) -> sponsor_core::Result<PaymentIntent> {
            self.intents.borrow_mut().push(request.order_total);
            if self.intent_fails {
                return Err(ClientError::Server);
            }
            Ok(PaymentIntent {
                client_secret: "pi_1_secret".into(),
            })
        }

        async fn checkout_success(
            &self,
            request: &CheckoutSuccessRequest,
        ) -> sponsor_core::Result<CheckoutSuccessResponse> {
            self.reports.borrow_mut().push(request.event_id.clone());
            Ok(CheckoutSuccessResponse {
                code: 200,
                message: "Payment received".into(),
            })
        }
    }

    #[derive(Default)]
    struct FakeCard {
        declines: RefCell<VecDeque<String>>,
        mounted: RefCell<bool>,
    }

    #[async_trait(?Send)]
    impl PaymentWidget for FakeCard {
        async fn mount(&self) -> Result<()> {
            *self.mounted.borrow_mut() = true;
            Ok(())
        }

        async fn confirm(&self, client_secret: &str) -> Result<ConfirmedPayment> {
            assert_eq!(client_secret, "pi_1_secret");
            match self.declines.borrow_mut().pop_front() {
                Some(message) => Err(PaymentError::Card(message)),
                None => Ok(ConfirmedPayment {
                    payment_intent_id: "pi_1".into(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct RecordingView {
        applied: RefCell<Vec<UiEffect>>,
    }

    impl PaymentView for RecordingView {
        fn apply(&self, effect: UiEffect) {
            self.applied.borrow_mut().push(effect);
        }
    }

    impl RecordingView {
        fn take(&self) -> Vec<UiEffect> {
            self.applied.borrow_mut().drain(..).collect()
        }
    }

    fn session(
        backend: FakeBackend,
        card: FakeCard,
    ) -> PaymentSession<FakeBackend, FakeCard, RecordingView> {
        let config = ClientConfig::default().with_default_origin("https://sponsormatch.test");
        PaymentSession::new(
            PaymentFlow::new("42", &config),
            backend,
            card,
            RecordingView::default(),
        )
    }

    async fn fill_card<B: PaymentsApi, W: PaymentWidget, V: PaymentView>(
        session: &PaymentSession<B, W, V>,
    ) {
        session
            .dispatch(PaymentEvent::WidgetChanged {
                empty: false,
                error: None,
            })
            .await;
    }

    #[tokio::test]
    async fn test_start_creates_intent_and_mounts_card() {
        let session = session(FakeBackend::default(), FakeCard::default());
        session
            .dispatch(PaymentEvent::Start {
                order_total_cents: Some(3780),
            })
            .await;

        assert_eq!(session.state(), PaymentState::WidgetReady);
        assert_eq!(*session.backend.intents.borrow(), vec![3780]);
        assert!(*session.widget.mounted.borrow());
    }

    #[tokio::test]
    async fn test_full_purchase() {
        let session = session(FakeBackend::default(), FakeCard::default());
        session
            .dispatch(PaymentEvent::Start {
                order_total_cents: Some(3780),
            })
            .await;
        fill_card(&session).await;
        session.view().take();

        session.dispatch(PaymentEvent::Submit).await;

        assert_eq!(session.state(), PaymentState::Succeeded);
        assert_eq!(*session.backend.reports.borrow(), vec!["42".to_string()]);
        let applied = session.view().take();
        assert!(applied.contains(&UiEffect::PurchaseCompleted));
        assert!(applied.contains(&UiEffect::ShowAlert(Alert::success("Payment received"))));
        assert_eq!(
            applied.last(),
            Some(&UiEffect::RedirectAfter {
                url: "https://sponsormatch.test/".into(),
                after: Duration::from_millis(3000),
            })
        );
    }

    #[tokio::test]
    async fn test_decline_then_retry() {
        let card = FakeCard::default();
        card.declines
            .borrow_mut()
            .push_back("Your card was declined.".into());
        let session = session(FakeBackend::default(), card);
        session
            .dispatch(PaymentEvent::Start {
                order_total_cents: Some(1674),
            })
            .await;
        fill_card(&session).await;

        session.dispatch(PaymentEvent::Submit).await;
        assert_eq!(session.state(), PaymentState::WidgetReady);
        assert!(
            session
                .view()
                .take()
                .contains(&UiEffect::ShowCardError("Your card was declined.".into()))
        );
        assert!(session.backend.reports.borrow().is_empty());

        session.dispatch(PaymentEvent::Submit).await;
        assert_eq!(session.state(), PaymentState::Succeeded);
    }

    #[tokio::test]
    async fn test_intent_failure_shows_alert() {
        let backend = FakeBackend {
            intent_fails: true,
            ..FakeBackend::default()
        };
        let session = session(backend, FakeCard::default());
        session
            .dispatch(PaymentEvent::Start {
                order_total_cents: Some(100),
            })
            .await;

        assert_eq!(session.state(), PaymentState::Unavailable);
        assert!(!*session.widget.mounted.borrow());
        let applied = session.view().take();
        assert!(applied.iter().any(|effect| matches!(
            effect,
            UiEffect::ShowAlert(alert) if alert.level == AlertLevel::Danger
        )));
    }
}
