//! # sponsor-payments
//!
//! Payment confirmation for sponsorship purchases.
//!
//! ## Stripe Elements (Embedded)
//!
//! The card form is embedded in the purchase page; the buyer never leaves the
//! site.
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │           Purchase Page                 │
//! │  ┌────────────────────────────────┐    │
//! │  │   Stripe Elements (iframe)     │    │
//! │  │   Card Number: ████ ████ ████  │    │
//! │  └────────────────────────────────┘    │
//! │  [ Pay ]          #card-error           │
//! └────────────────────────────────────────┘
//! ```
//!
//! ## Flow
//!
//! ```text
//! Idle ──Start──▶ RequestingIntent ──IntentCreated──▶ WidgetReady
//!                        │                              │   ▲
//!                  IntentFailed                     Submit  ConfirmationFailed
//!                        ▼                              ▼   │
//!                   Unavailable                      Confirming
//!                                                       │
//!                                           ConfirmationSucceeded
//!                                                       ▼
//!                                                   Succeeded
//! ```
//!
//! [`PaymentFlow`] is a pure state machine that turns events into
//! [`Effect`]s. [`PaymentSession`] runs it: it performs the network and widget
//! effects itself and hands UI effects to a [`PaymentView`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sponsor_payments::{PaymentEvent, PaymentFlow, PaymentSession};
//!
//! let flow = PaymentFlow::new("42", &config);
//! let session = PaymentSession::new(flow, backend, card, view);
//! session.dispatch(PaymentEvent::Start { order_total_cents: Some(3780) }).await;
//! ```

mod error;
mod flow;
mod session;

pub use error::{PaymentError, Result};
pub use flow::{Effect, PaymentEvent, PaymentFlow, PaymentState, UiEffect};
pub use session::{ConfirmedPayment, PaymentSession, PaymentView, PaymentWidget};
