//! Package Selection State
//!
//! Tracks which sponsorship packages on an event page are toggled on. The
//! running quantity and total are always derived from the selected set, so
//! they cannot drift from it.

use std::collections::HashSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::money::Amount;

/// Package identifier as carried by the page
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse an element id of the form `package_<id>`; only the segment
    /// after the first `_` counts, so `package_4_2` is package `4`
    pub fn from_element_id(element_id: &str) -> Option<Self> {
        element_id
            .split('_')
            .nth(1)
            .filter(|id| !id.is_empty())
            .map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A selectable package; an unreadable price stays selectable and poisons the total
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Package {
    pub id: PackageId,
    pub price: Amount,
}

impl Package {
    pub fn new(id: impl Into<String>, price: impl Into<Amount>) -> Self {
        Self {
            id: PackageId::new(id),
            price: price.into(),
        }
    }
}

/// What a toggle did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Toggled {
    /// Whether the package is now selected
    pub selected: bool,
    /// Whether the checkout control changed from disabled to enabled or back
    pub checkout_changed: bool,
}

/// Selection over the packages of one event page
#[derive(Clone, Debug, Default)]
pub struct PackageSelection {
    packages: Vec<Package>,
    selected: HashSet<PackageId>,
}

impl PackageSelection {
    pub fn new(packages: Vec<Package>) -> Self {
        Self {
            packages,
            selected: HashSet::new(),
        }
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Flip one package on or off
    pub fn toggle(&mut self, id: &PackageId) -> Result<Toggled> {
        if !self.packages.iter().any(|p| &p.id == id) {
            return Err(ClientError::Markup(format!("unknown package {id}")));
        }

        let was_enabled = self.checkout_enabled();
        let selected = if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.clone());
            true
        };

        tracing::debug!(package = %id, selected, total = %self.total(), "package toggled");

        Ok(Toggled {
            selected,
            checkout_changed: was_enabled != self.checkout_enabled(),
        })
    }

    pub fn is_selected(&self, id: &PackageId) -> bool {
        self.selected.contains(id)
    }

    pub fn quantity(&self) -> usize {
        self.selected.len()
    }

    /// Sum of the prices of the selected packages, `NaN` if any is unreadable
    pub fn total(&self) -> Amount {
        self.packages
            .iter()
            .filter(|p| self.selected.contains(&p.id))
            .map(|p| p.price)
            .sum()
    }

    pub fn checkout_enabled(&self) -> bool {
        self.total().value().is_some_and(|total| total > Decimal::ZERO)
    }

    /// Selected ids, in page order
    pub fn selected_ids(&self) -> Vec<PackageId> {
        self.packages
            .iter()
            .filter(|p| self.selected.contains(&p.id))
            .map(|p| p.id.clone())
            .collect()
    }

    /// Label for a package's toggle control
    pub fn button_label(&self, id: &PackageId) -> &'static str {
        if self.is_selected(id) { "Remove" } else { "Add" }
    }

    pub fn quantity_label(&self) -> String {
        format!("QTY: {}", self.quantity())
    }

    pub fn total_label(&self) -> String {
        format!("USD {}", self.total().to_usd())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn selection() -> PackageSelection {
        PackageSelection::new(vec![
            Package::new("1", dec!(20.00)),
            Package::new("2", dec!(15.00)),
            Package::new("3", dec!(0.10)),
        ])
    }

    #[test]
    fn test_toggle_on_and_off_restores_state() {
        let mut sel = selection();
        let id = PackageId::new("1");

        sel.toggle(&id).unwrap();
        assert_eq!(sel.quantity_label(), "QTY: 1");
        assert_eq!(sel.total_label(), "USD $20.00");
        assert_eq!(sel.button_label(&id), "Remove");

        sel.toggle(&id).unwrap();
        assert_eq!(sel.quantity(), 0);
        assert_eq!(sel.total(), Amount::ZERO);
        assert_eq!(sel.button_label(&id), "Add");
    }

    #[test]
    fn test_checkout_enabled_iff_total_positive() {
        let mut sel = selection();
        let ids: Vec<_> = ["1", "2", "3", "1", "3", "2"].iter().map(|s| PackageId::new(*s)).collect();

        assert!(!sel.checkout_enabled());
        for id in &ids {
            sel.toggle(id).unwrap();
            let positive = sel.total().value().is_some_and(|t| t > Decimal::ZERO);
            assert_eq!(sel.checkout_enabled(), positive);
        }
        assert!(!sel.checkout_enabled());
    }

    #[test]
    fn test_small_remaining_total_keeps_checkout_enabled() {
        let mut sel = selection();
        sel.toggle(&PackageId::new("1")).unwrap();
        sel.toggle(&PackageId::new("3")).unwrap();
        let change = sel.toggle(&PackageId::new("1")).unwrap();

        assert!(!change.checkout_changed);
        assert!(sel.checkout_enabled());
        assert_eq!(sel.total_label(), "USD $0.10");
    }

    #[test]
    fn test_checkout_transition_reported() {
        let mut sel = selection();
        let first = sel.toggle(&PackageId::new("2")).unwrap();
        assert!(first.selected && first.checkout_changed);

        let second = sel.toggle(&PackageId::new("1")).unwrap();
        assert!(!second.checkout_changed);
    }

    #[test]
    fn test_selected_ids_in_page_order() {
        let mut sel = selection();
        sel.toggle(&PackageId::new("3")).unwrap();
        sel.toggle(&PackageId::new("1")).unwrap();
        assert_eq!(sel.selected_ids(), vec![PackageId::new("1"), PackageId::new("3")]);
    }

    #[test]
    fn test_unknown_package_is_error() {
        let mut sel = selection();
        assert!(matches!(sel.toggle(&PackageId::new("9")), Err(ClientError::Markup(_))));
    }

    #[test]
    fn test_package_id_from_element_id() {
        assert_eq!(PackageId::from_element_id("package_42"), Some(PackageId::new("42")));
        assert_eq!(PackageId::from_element_id("package_"), None);
        assert_eq!(PackageId::from_element_id("nounderscore"), None);
        assert_eq!(PackageId::from_element_id("package_4_2"), Some(PackageId::new("4")));
    }

    #[test]
    fn test_unreadable_price_renders_nan() {
        let mut sel = PackageSelection::new(vec![
            Package::new("1", dec!(20.00)),
            Package::new("2", Amount::parse_display("call us")),
        ]);
        sel.toggle(&PackageId::new("1")).unwrap();
        let change = sel.toggle(&PackageId::new("2")).unwrap();

        assert!(change.selected && change.checkout_changed);
        assert_eq!(sel.quantity_label(), "QTY: 2");
        assert_eq!(sel.total_label(), "USD $NaN");
        assert!(!sel.checkout_enabled());

        sel.toggle(&PackageId::new("2")).unwrap();
        assert_eq!(sel.total_label(), "USD $20.00");
    }

    #[test]
    fn test_overflowing_total_renders_nan() {
        let mut sel = PackageSelection::new(vec![
            Package::new("1", Decimal::MAX),
            Package::new("2", dec!(1)),
        ]);
        sel.toggle(&PackageId::new("1")).unwrap();
        sel.toggle(&PackageId::new("2")).unwrap();
        assert_eq!(sel.total(), Amount::Invalid);
        assert!(!sel.checkout_enabled());
    }
}
