//! # sponsor-client
//!
//! Backend access for the sponsormatch front end.
//!
//! Calls are grouped into small traits so each page component depends only
//! on the routes it uses, and tests can substitute in-memory fakes.
//! [`HttpBackend`] implements all of them over `reqwest`, which uses `fetch`
//! when compiled to `wasm32`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sponsor_client::{HttpBackend, SponsorshipApi};
//! use sponsor_core::api::SponsorshipRequest;
//!
//! let backend = HttpBackend::new("https://sponsormatch.example");
//! let redirect = backend
//!     .create_sponsorships("42", &SponsorshipRequest { ids: vec!["7".into()] })
//!     .await?;
//! // navigate to redirect.url
//! ```

mod http;

pub use http::HttpBackend;

use async_trait::async_trait;
use sponsor_core::api::{
    CheckoutSuccessRequest, CheckoutSuccessResponse, MessageResponse, PackageDetails,
    PaymentIntent, PaymentIntentRequest, RedirectResponse, SponsorshipRequest,
};
use sponsor_core::{Endpoint, Result};

/// Event and package management routes
#[async_trait(?Send)]
pub trait EventsApi {
    /// Bookmark an event for the current user
    async fn save_event(&self, event_id: &str) -> Result<MessageResponse>;

    /// Delete an event; the backend may answer with an empty body
    async fn delete_event(&self, event_id: &str) -> Result<Option<MessageResponse>>;

    /// Remove an event from the user's saved list
    async fn delete_saved_event(&self, event_id: &str) -> Result<()>;

    async fn package_details(&self, package_id: &str) -> Result<PackageDetails>;

    async fn delete_package(&self, event_id: &str, package_id: &str) -> Result<RedirectResponse>;
}

/// HTML fragments for tab panels
#[async_trait(?Send)]
pub trait FragmentApi {
    async fn fragment(&self, endpoint: &Endpoint) -> Result<String>;
}

/// Pending-sponsorship creation
#[async_trait(?Send)]
pub trait SponsorshipApi {
    async fn create_sponsorships(
        &self,
        event_id: &str,
        request: &SponsorshipRequest,
    ) -> Result<RedirectResponse>;
}

/// Payment routes used by the confirmation flow
#[async_trait(?Send)]
pub trait PaymentsApi {
    async fn create_payment_intent(&self, request: &PaymentIntentRequest) -> Result<PaymentIntent>;

    /// Record a confirmed payment.
    ///
    /// A non-2xx answer that still carries `{code, message}` is returned as
    /// `Ok`; the caller decides how to present it.
    async fn checkout_success(
        &self,
        request: &CheckoutSuccessRequest,
    ) -> Result<CheckoutSuccessResponse>;
}
