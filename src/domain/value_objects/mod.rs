//! Value Objects for the workbench

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-entered label with surrounding whitespace trimmed and internal runs
/// collapsed to a single space.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(value: impl AsRef<str>) -> Result<Self, LabelError> {
        let value = collapse_whitespace(value.as_ref());
        if value.is_empty() { return Err(LabelError::Empty); }
        Ok(Self(value))
    }
    pub fn as_str(&self) -> &str { &self.0 }
    pub fn into_inner(self) -> String { self.0 }

    /// Lower-cased, hyphenated form used when comparing against platform slugs.
    pub fn slug(&self) -> String { self.0.to_lowercase().replace(' ', "-") }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum LabelError { Empty }
impl std::error::Error for LabelError {}
impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Label empty") }
}

pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Form inputs never go below zero; anything negative is treated as 0.
pub fn non_negative(value: Decimal) -> Decimal { value.max(Decimal::ZERO) }

/// Clamps into `0..=max` and rounds to `dp` places.
pub fn bounded(value: Decimal, max: Decimal, dp: u32) -> Decimal {
    non_negative(value).min(max).round_dp(dp)
}

/// `1 + pct/100`, the multiplier a percentage uplift applies.
pub fn uplift(percent: Decimal) -> Decimal { Decimal::ONE + percent / Decimal::ONE_HUNDRED }

/// `pct/100` as a fraction.
pub fn fraction(percent: Decimal) -> Decimal { percent / Decimal::ONE_HUNDRED }
