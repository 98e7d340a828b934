//! Checkout Session
//!
//! Turning a package selection into pending sponsorships, and cleaning them
//! up if the buyer walks away from the payment page.

use crate::alert::Alert;
use crate::api::{RedirectResponse, SponsorshipRequest};
use crate::error::ClientError;
use crate::routes::Endpoint;
use crate::selection::PackageSelection;

/// Body for the sponsorship-creation call, or `None` when nothing is selected
pub fn sponsorship_request(selection: &PackageSelection) -> Option<SponsorshipRequest> {
    if !selection.checkout_enabled() {
        return None;
    }
    let ids = selection
        .selected_ids()
        .into_iter()
        .map(|id| id.as_str().to_string())
        .collect();
    Some(SponsorshipRequest { ids })
}

/// What the page should do once the sponsorship call settles
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Go to the payment page
    Navigate(String),
    /// Reopen the package modal and show the error
    Reopen { alert: Alert },
}

impl CheckoutOutcome {
    pub fn from_result(result: Result<RedirectResponse, ClientError>) -> Self {
        match result {
            Ok(RedirectResponse { url }) => Self::Navigate(url),
            Err(err) => Self::Reopen {
                alert: Alert::from_error(&err),
            },
        }
    }
}

/// Pending sponsorships tied to the payment page of one event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseSession {
    event_id: String,
    completed: bool,
}

impl PurchaseSession {
    pub fn new(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            completed: false,
        }
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// Payment confirmed; pending records must no longer be cancelled
    pub fn complete(&mut self) {
        self.completed = true;
    }

    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Beacon target fired on unload, or `None` once the purchase completed
    pub fn cancel_url(&self, origin: &str) -> Option<String> {
        (!self.completed).then(|| {
            Endpoint::CancelPurchase {
                event_id: self.event_id.clone(),
            }
            .url(origin)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{Package, PackageId};
    use rust_decimal_macros::dec;

    #[test]
    fn test_request_contains_selected_ids() {
        let mut sel = PackageSelection::new(vec![
            Package::new("11", dec!(20)),
            Package::new("12", dec!(15)),
            Package::new("13", dec!(40)),
        ]);
        assert!(sponsorship_request(&sel).is_none());

        sel.toggle(&PackageId::new("11")).unwrap();
        sel.toggle(&PackageId::new("12")).unwrap();

        let req = sponsorship_request(&sel).unwrap();
        assert_eq!(req.ids, vec!["11".to_string(), "12".to_string()]);
    }

    #[test]
    fn test_outcome_navigates_to_returned_url() {
        let outcome = CheckoutOutcome::from_result(Ok(RedirectResponse {
            url: "/payments/42".into(),
        }));
        assert_eq!(outcome, CheckoutOutcome::Navigate("/payments/42".into()));
    }

    #[test]
    fn test_selected_packages_lead_to_payment_page() {
        let mut sel = PackageSelection::new(vec![
            Package::new("7", dec!(20.00)),
            Package::new("8", dec!(15.00)),
        ]);
        sel.toggle(&PackageId::new("7")).unwrap();
        sel.toggle(&PackageId::new("8")).unwrap();
        assert_eq!(sel.total_label(), "USD $35.00");

        let req = sponsorship_request(&sel).unwrap();
        assert_eq!(req.ids, vec!["7".to_string(), "8".to_string()]);

        let server = |req: &SponsorshipRequest| {
            assert_eq!(req.ids.len(), 2);
            Ok(RedirectResponse {
                url: "/payments/42".into(),
            })
        };
        assert_eq!(
            CheckoutOutcome::from_result(server(&req)),
            CheckoutOutcome::Navigate("/payments/42".into())
        );
    }

    #[test]
    fn test_outcome_failure_reopens_modal() {
        let outcome = CheckoutOutcome::from_result(Err(ClientError::Server));
        let CheckoutOutcome::Reopen { alert } = outcome else {
            panic!("expected reopen");
        };
        assert_eq!(alert.message, "Internal Server Error [500].");
    }

    #[test]
    fn test_cancel_url_suppressed_after_completion() {
        let mut session = PurchaseSession::new("42");
        assert_eq!(
            session.cancel_url("https://sponsormatch.test").as_deref(),
            Some("https://sponsormatch.test/events/42/sponsorships/cancel-purchase")
        );

        session.complete();
        assert!(session.cancel_url("https://sponsormatch.test").is_none());
    }
}
