//! Numeric record fields

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use serde_json::Number;
use thiserror::Error;

/// A number as the console entered it: integral or fractional.
///
/// The exact JSON representation is kept, so `1500` stays `1500` and
/// `45000.5` stays `45000.5` through both record shapes. Non-numeric values
/// are still rejected on input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Number);

impl Amount {
    /// The value as a float.
    pub fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or_default()
    }

    /// The value as an integer, when it is one.
    pub fn as_i64(&self) -> Option<i64> {
        self.0.as_i64()
    }

    /// The underlying JSON number.
    pub fn as_number(&self) -> &Number {
        &self.0
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self(Number::from(0))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(Number::from(value))
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(Number::from(value))
    }
}

impl TryFrom<f64> for Amount {
    type Error = NonFiniteAmount;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Number::from_f64(value).map(Self).ok_or(NonFiniteAmount(value))
    }
}

/// NaN and infinities have no JSON representation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{0} is not a finite amount")]
pub struct NonFiniteAmount(pub f64);
