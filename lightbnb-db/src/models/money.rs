//! Minor currency units
//!
//! Nightly costs are stored as integer cents. Search filters arrive in
//! whole-currency decimals and are converted here, once.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Amount in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(i64);

impl Cents {
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Convert a whole-currency amount (e.g. `49.99`) to cents, rounding to
    /// the nearest cent.
    ///
    /// Float-to-int conversion saturates: non-finite or huge inputs clamp to
    /// `i64` bounds, NaN becomes zero.
    ///
    /// ```
    /// use lightbnb_db::Cents;
    ///
    /// assert_eq!(Cents::from_dollars(50.0).get(), 5000);
    /// assert_eq!(Cents::from_dollars(0.29).get(), 29);
    /// ```
    pub fn from_dollars(dollars: f64) -> Self {
        Self((dollars * 100.0).round() as i64)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i32> for Cents {
    fn from(cents: i32) -> Self {
        Self(i64::from(cents))
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}
