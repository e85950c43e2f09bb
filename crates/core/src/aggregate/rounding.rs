//! Display-precision rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Output precision of a report.
///
/// Aggregation always runs at full precision; a report rounds once, at
/// its output boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Whole units (aging summaries).
    Whole,
    /// Two decimal places (amounts and hours).
    Cents,
}

impl Precision {
    /// Rounds a value to this precision, midpoint away from zero.
    #[must_use]
    pub fn round(self, value: Decimal) -> Decimal {
        let places = match self {
            Self::Whole => 0,
            Self::Cents => 2,
        };
        value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
    }
}
