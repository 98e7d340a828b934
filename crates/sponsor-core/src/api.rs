//! Wire Types
//!
//! Request and response bodies exchanged with the backend.

use serde::{Deserialize, Serialize};

/// `{message}` acknowledgement
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `{url}` telling the client where to go next
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectResponse {
    pub url: String,
}

/// Body for creating pending sponsorships
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SponsorshipRequest {
    pub ids: Vec<String>,
}

/// Package details shown in the dashboard modal
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackageDetails {
    pub price: serde_json::Value,
    pub audience: serde_json::Value,
    pub description: String,
    pub package_type: String,
    pub event_id: serde_json::Value,
}

impl PackageDetails {
    /// Rows rendered in the modal, as (label, value)
    pub fn rows(&self) -> [(&'static str, String); 4] {
        [
            ("Price", format!("${}", json_text(&self.price))),
            ("Audience Reached", json_text(&self.audience)),
            ("Description", self.description.clone()),
            ("Package Type", self.package_type.clone()),
        ]
    }

    pub fn event_id(&self) -> String {
        json_text(&self.event_id)
    }
}

/// Body for requesting a payment intent
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    /// Amount in cents
    pub order_total: i64,
}

/// Server-issued payment intent
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub client_secret: String,
}

/// Body reporting a confirmed payment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSuccessRequest {
    pub event_id: String,
}

/// Result of recording a confirmed payment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSuccessResponse {
    pub code: u16,
    pub message: String,
}

impl CheckoutSuccessResponse {
    pub const fn is_success(&self) -> bool {
        self.code >= 200 && self.code < 300
    }
}

/// Strings render bare; everything else as JSON
fn json_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_bodies_use_camel_case() {
        let body = serde_json::to_value(PaymentIntentRequest { order_total: 1674 }).unwrap();
        assert_eq!(body, serde_json::json!({ "orderTotal": 1674 }));

        let body = serde_json::to_value(CheckoutSuccessRequest { event_id: "7".into() }).unwrap();
        assert_eq!(body, serde_json::json!({ "eventId": "7" }));

        let intent: PaymentIntent = serde_json::from_str(r#"{"clientSecret":"pi_1_secret"}"#).unwrap();
        assert_eq!(intent.client_secret, "pi_1_secret");
    }

    #[test]
    fn test_checkout_success_codes() {
        let created = CheckoutSuccessResponse { code: 201, message: "ok".into() };
        let bad = CheckoutSuccessResponse { code: 400, message: "Out of stock".into() };
        assert!(created.is_success());
        assert!(!bad.is_success());
    }

    #[test]
    fn test_package_detail_rows() {
        let details: PackageDetails = serde_json::from_value(serde_json::json!({
            "price": 250.0,
            "audience": "500",
            "description": "Banner at the entrance",
            "package_type": "Gold",
            "event_id": 12
        }))
        .unwrap();

        let rows = details.rows();
        assert_eq!(rows[0], ("Price", "$250.0".to_string()));
        assert_eq!(rows[1].1, "500");
        assert_eq!(details.event_id(), "12");
    }
}
