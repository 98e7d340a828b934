//! Price Calculator
//!
//! Derives subtotal, sales tax and order total from the line items rendered
//! on the purchase page.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::money::Amount;

/// Default sales tax rate
pub const DEFAULT_TAX_RATE: Decimal = dec!(0.08);

/// Computed order figures
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderSummary {
    pub subtotal: Amount,
    pub tax: Amount,
    pub total: Amount,
}

impl OrderSummary {
    /// Text for the sales tax cell, e.g. `$1.24`
    pub fn tax_display(&self) -> String {
        self.tax.to_usd()
    }

    /// Text for the order total cell, e.g. `$16.74`
    pub fn total_display(&self) -> String {
        self.total.to_usd()
    }

    /// Order total in cents, as sent when requesting a payment intent
    ///
    /// Derived from the same rounded total that [`Self::total_display`] renders.
    pub fn total_cents(&self) -> Option<i64> {
        self.total.to_minor_units()
    }
}

/// Sales tax calculator
#[derive(Clone, Copy, Debug)]
pub struct PriceCalculator {
    tax_rate: Decimal,
}

impl Default for PriceCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_TAX_RATE)
    }
}

impl PriceCalculator {
    pub const fn new(tax_rate: Decimal) -> Self {
        Self { tax_rate }
    }

    pub const fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Sum of the rendered line-item prices
    pub fn subtotal<I, S>(&self, line_items: I) -> Amount
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        line_items
            .into_iter()
            .map(|text| Amount::parse_display(text.as_ref()))
            .sum()
    }

    /// Subtotal, tax and total; tax and total are each rounded to cents
    pub fn summarize<I, S>(&self, line_items: I) -> OrderSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let subtotal = self.subtotal(line_items);
        let tax = (subtotal * self.tax_rate).round2();
        let total = (subtotal + tax).round2();

        tracing::debug!(%subtotal, %tax, %total, "order summary computed");

        OrderSummary { subtotal, tax, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_line_items() {
        let calc = PriceCalculator::default();
        let summary = calc.summarize(["$10.00", "$5.50"]);

        assert_eq!(summary.subtotal, Amount::Valid(dec!(15.50)));
        assert_eq!(summary.tax_display(), "$1.24");
        assert_eq!(summary.total_display(), "$16.74");
        assert_eq!(summary.total_cents(), Some(1674));
    }

    #[test]
    fn test_whole_number_formats_two_places() {
        let summary = PriceCalculator::new(Decimal::ZERO).summarize(["10"]);
        assert_eq!(summary.total.to_string(), "10.00");
    }

    #[test]
    fn test_tax_rounds_half_away_from_zero() {
        // 0.08 * 0.5625 = 0.045 -> 0.05
        let summary = PriceCalculator::default().summarize(["$0.5625"]);
        assert_eq!(summary.tax, Amount::Valid(dec!(0.05)));
    }

    #[test]
    fn test_empty_item_renders_nan() {
        let summary = PriceCalculator::default().summarize(["$10.00", ""]);
        assert_eq!(summary.tax_display(), "$NaN");
        assert_eq!(summary.total_display(), "$NaN");
        assert_eq!(summary.total_cents(), None);
    }

    #[test]
    fn test_no_items_is_zero() {
        let summary = PriceCalculator::default().summarize(Vec::<String>::new());
        assert_eq!(summary.total_display(), "$0.00");
    }

    #[test]
    fn test_overflowing_items_render_nan() {
        let summary = PriceCalculator::default().summarize(["$79228162514264337593543950335", "$1.00"]);
        assert_eq!(summary.subtotal, Amount::Invalid);
        assert_eq!(summary.total_display(), "$NaN");
        assert_eq!(summary.total_cents(), None);
    }
}
