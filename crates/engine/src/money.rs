use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Exact decimal money amount.
///
/// Use this type for **all** monetary values in the engine (balances and
/// transfer amounts). It wraps [`Decimal`], so add/subtract chains never go
/// through floating point.
///
/// Amounts are rendered and persisted in canonical form: trailing zeros are
/// stripped, so `40.00` becomes `"40"` and `-0` becomes `"0"`.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount: Money = "40.00".parse().unwrap();
/// assert_eq!(amount.to_string(), "40");
/// assert!(amount.is_positive());
/// ```
///
/// Parsing from user input accepts `.` or `,` as decimal separator and
/// rejects values that would lose precision:
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10,5".parse::<Money>().unwrap().to_string(), "10.5");
/// assert!("abc".parse::<Money>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Creates a new amount from a decimal value.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying decimal value.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if the amount is strictly greater than 0.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns `true` if the amount is strictly lower than 0.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Canonical text stored in the database.
    ///
    /// Compare-and-swap updates match on this exact string, so every write
    /// must go through it.
    pub(crate) fn to_db_string(self) -> String {
        self.0.normalize().to_string()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    /// Rejects empty strings and values with more precision than [`Decimal`]
    /// can hold.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidAmount("empty amount".to_string()));
        }

        let normalized = trimmed.replace(',', ".");
        let normalized = normalized.strip_prefix('+').unwrap_or(&normalized);
        Decimal::from_str_exact(normalized)
            .map(Money)
            .map_err(|_| EngineError::InvalidAmount(format!("invalid amount: {trimmed}")))
    }
}
