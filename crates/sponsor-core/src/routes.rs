//! Backend Endpoints
//!
//! Every backend route the front end calls, with its method and path.

use std::fmt;

/// HTTP method used by an endpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// A backend route
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    SaveEvent { event_id: String },
    DeleteEvent { event_id: String },
    EventInfo { event_id: String },
    EventSponsors { event_id: String },
    CreateSponsorships { event_id: String },
    CancelPurchase { event_id: String },
    PackageDetails { package_id: String },
    DeletePackage { event_id: String, package_id: String },
    CreatePaymentIntent,
    CheckoutSuccess,
    ProfileEvents { user_id: String, status: String },
    ProfileSponsorships { user_id: String, status: String },
    DeleteSavedEvent { event_id: String },
}

impl Endpoint {
    pub const fn method(&self) -> Method {
        match self {
            Self::EventInfo { .. }
            | Self::EventSponsors { .. }
            | Self::PackageDetails { .. }
            | Self::ProfileEvents { .. }
            | Self::ProfileSponsorships { .. } => Method::Get,
            _ => Method::Post,
        }
    }

    /// Path relative to the site origin
    pub fn path(&self) -> String {
        match self {
            Self::SaveEvent { event_id } => format!("/events/{event_id}/save"),
            Self::DeleteEvent { event_id } => format!("/events/{event_id}/delete"),
            Self::EventInfo { event_id } => format!("/events/{event_id}/info"),
            Self::EventSponsors { event_id } => format!("/events/{event_id}/sponsors"),
            Self::CreateSponsorships { event_id } => format!("/events/{event_id}/sponsorships"),
            Self::CancelPurchase { event_id } => {
                format!("/events/{event_id}/sponsorships/cancel-purchase")
            }
            Self::PackageDetails { package_id } => format!("/events/packages/{package_id}"),
            Self::DeletePackage { event_id, package_id } => {
                format!("/events/{event_id}/packages/{package_id}/delete")
            }
            Self::CreatePaymentIntent => "/payments/create-payment-intent".into(),
            Self::CheckoutSuccess => "/payments/checkout-success".into(),
            Self::ProfileEvents { user_id, status } => format!("/users/{user_id}/events/{status}"),
            Self::ProfileSponsorships { user_id, status } => {
                format!("/users/{user_id}/sponsorships/{status}")
            }
            Self::DeleteSavedEvent { event_id } => format!("/events/saved-events/{event_id}/delete"),
        }
    }

    /// Absolute URL under `origin`
    pub fn url(&self, origin: &str) -> String {
        format!("{}{}", origin.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_and_methods() {
        let cancel = Endpoint::CancelPurchase { event_id: "5".into() };
        assert_eq!(cancel.path(), "/events/5/sponsorships/cancel-purchase");
        assert_eq!(cancel.method(), Method::Post);

        let tab = Endpoint::ProfileSponsorships { user_id: "3".into(), status: "past".into() };
        assert_eq!(tab.to_string(), "GET /users/3/sponsorships/past");

        let delete = Endpoint::DeletePackage { event_id: "5".into(), package_id: "9".into() };
        assert_eq!(delete.path(), "/events/5/packages/9/delete");
    }

    #[test]
    fn test_url_joins_origin() {
        let url = Endpoint::CheckoutSuccess.url("https://sponsormatch.test/");
        assert_eq!(url, "https://sponsormatch.test/payments/checkout-success");
    }
}
