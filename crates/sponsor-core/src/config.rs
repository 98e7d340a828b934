//! Front-end configuration
//!
//! Loaded from a JSON payload the server embeds in the page. Every field has a
//! default so an empty object is a valid configuration.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ClientError, Result};
use crate::pricing::{DEFAULT_TAX_RATE, PriceCalculator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Site origin; empty means "use the page's own origin"
    pub origin: String,
    pub tax_rate: Decimal,
    /// How long a card error stays visible
    pub card_error_clear_ms: u64,
    /// Delay before leaving the payment page after success
    pub redirect_delay_ms: u64,
    pub stripe_publishable_key: String,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: String::new(),
            tax_rate: DEFAULT_TAX_RATE,
            card_error_clear_ms: 5000,
            redirect_delay_ms: 3000,
            stripe_publishable_key: String::new(),
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Parse an embedded JSON payload; it must be an object
    pub fn from_json(payload: &str) -> Result<Self> {
        let invalid = |e: serde_json::Error| ClientError::Config(format!("invalid config payload: {e}"));
        let value: serde_json::Value = serde_json::from_str(payload).map_err(invalid)?;
        if !value.is_object() {
            return Err(ClientError::Config(
                "invalid config payload: expected a JSON object".to_string(),
            ));
        }
        let config: Self = serde_json::from_value(value).map_err(invalid)?;
        config.validate()?;
        Ok(config)
    }

    /// Fill in the origin if the payload left it empty
    #[must_use]
    pub fn with_default_origin(mut self, origin: impl Into<String>) -> Self {
        if self.origin.is_empty() {
            self.origin = origin.into();
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.tax_rate < Decimal::ZERO || self.tax_rate >= Decimal::ONE {
            return Err(ClientError::Config(format!(
                "tax_rate must be in [0, 1), got {}",
                self.tax_rate
            )));
        }
        if !self.origin.is_empty() {
            Url::parse(&self.origin)
                .map_err(|e| ClientError::Config(format!("origin {}: {e}", self.origin)))?;
        }
        Ok(())
    }

    pub const fn card_error_clear_delay(&self) -> Duration {
        Duration::from_millis(self.card_error_clear_ms)
    }

    pub const fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    pub const fn price_calculator(&self) -> PriceCalculator {
        PriceCalculator::new(self.tax_rate)
    }

    /// Site root, where the payment page sends the buyer when done
    pub fn site_root(&self) -> String {
        format!("{}/", self.origin.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_payload_uses_defaults() {
        let config = ClientConfig::from_json("{}").unwrap();
        assert_eq!(config.tax_rate, dec!(0.08));
        assert_eq!(config.card_error_clear_delay(), Duration::from_millis(5000));
        assert_eq!(config.redirect_delay(), Duration::from_millis(3000));
    }

    #[test]
    fn test_payload_overrides() {
        let config = ClientConfig::from_json(
            r#"{"origin":"https://sponsormatch.test","tax_rate":"0.0625","stripe_publishable_key":"pk_test_1"}"#,
        )
        .unwrap();
        assert_eq!(config.tax_rate, dec!(0.0625));
        assert_eq!(config.site_root(), "https://sponsormatch.test/");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(ClientConfig::from_json(r#"{"tax_rate":"1.5"}"#).is_err());
        assert!(ClientConfig::from_json(r#"{"origin":"not a url"}"#).is_err());
        assert!(matches!(ClientConfig::from_json("[]"), Err(ClientError::Config(_))));
    }

    #[test]
    fn test_positional_payload_rejected() {
        let result = ClientConfig::from_json(r#"["https://sponsormatch.test", "0.5"]"#);
        assert!(matches!(result, Err(ClientError::Config(msg)) if msg.contains("expected a JSON object")));
        assert!(matches!(ClientConfig::from_json("null"), Err(ClientError::Config(_))));
        assert!(matches!(ClientConfig::from_json("{"), Err(ClientError::Config(_))));
    }

    #[test]
    fn test_default_origin_only_fills_blank() {
        let config = ClientConfig::default().with_default_origin("https://a.test");
        assert_eq!(config.origin, "https://a.test");
        let config = config.with_default_origin("https://b.test");
        assert_eq!(config.origin, "https://a.test");
    }
}
