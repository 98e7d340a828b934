//! Money
//!
//! Prices arrive as rendered text (`"$1,250.00"`, `"USD $20.00"`). Parsing is
//! locale-agnostic: everything but digits and the decimal point is dropped.
//! Text with no usable digits yields [`Amount::Invalid`], which survives
//! arithmetic and renders as `NaN`.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Two-place price run; ASCII digits only
static FIXED_POINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.[0-9]{2}").expect("FIXED_POINT_RE: invalid regex pattern"));

/// A currency amount, or the result of parsing something that wasn't one
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Amount {
    Valid(Decimal),
    Invalid,
}

impl Amount {
    pub const ZERO: Self = Self::Valid(Decimal::ZERO);

    /// Parse rendered price text, keeping only digits and `.`
    ///
    /// The longest numeric prefix of what remains is used, so `"1.2.3"`
    /// reads as `1.2`.
    pub fn parse_display(text: &str) -> Self {
        let kept: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();

        let mut parts = kept.splitn(3, '.');
        let whole = parts.next().unwrap_or_default();
        let fraction = parts.next().unwrap_or_default();

        if whole.is_empty() && fraction.is_empty() {
            return Self::Invalid;
        }

        let normalized = match (whole.is_empty(), fraction.is_empty()) {
            (true, _) => format!("0.{fraction}"),
            (false, true) => whole.to_string(),
            (false, false) => format!("{whole}.{fraction}"),
        };

        normalized
            .parse::<Decimal>()
            .map_or(Self::Invalid, Self::Valid)
    }

    /// Parse the first `\d+\.\d{2}` run in `text`
    pub fn parse_fixed_point(text: &str) -> Self {
        extract_fixed_point(text)
            .and_then(|s| s.parse::<Decimal>().ok())
            .map_or(Self::Invalid, Self::Valid)
    }

    pub const fn value(self) -> Option<Decimal> {
        match self {
            Self::Valid(d) => Some(d),
            Self::Invalid => None,
        }
    }

    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Round to cents, half away from zero
    #[must_use]
    pub fn round2(self) -> Self {
        match self {
            Self::Valid(d) => Self::Valid(round2(d)),
            Self::Invalid => Self::Invalid,
        }
    }

    /// Integer minor units (cents), `None` when invalid or out of range
    pub fn to_minor_units(self) -> Option<i64> {
        self.value()
            .and_then(|d| round2(d).checked_mul(dec!(100)))
            .and_then(|cents| cents.to_i64())
    }

    /// Combine two valid amounts; overflow is as unreadable as bad input
    fn checked(self, rhs: Self, op: impl FnOnce(Decimal, Decimal) -> Option<Decimal>) -> Self {
        match (self, rhs) {
            (Self::Valid(a), Self::Valid(b)) => op(a, b).map_or(Self::Invalid, Self::Valid),
            _ => Self::Invalid,
        }
    }

    /// Rendered with a leading dollar sign, e.g. `$16.74` or `$NaN`
    pub fn to_usd(self) -> String {
        format!("${self}")
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Decimal> for Amount {
    fn from(d: Decimal) -> Self {
        Self::Valid(d)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(d) => write!(f, "{:.2}", round2(*d)),
            Self::Invalid => write!(f, "NaN"),
        }
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.checked(rhs, Decimal::checked_add)
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.checked(rhs, Decimal::checked_sub)
    }
}

impl Mul<Decimal> for Amount {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self {
        self.checked(Self::Valid(rhs), Decimal::checked_mul)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Round to two places, half away from zero
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Leftmost match of `\d+\.\d{2}` in `text`
pub fn extract_fixed_point(text: &str) -> Option<&str> {
    FIXED_POINT_RE.find(text).map(|m| m.as_str())
}
