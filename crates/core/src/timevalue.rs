//! Packed legacy time decoding.
//!
//! The practice-management source stores logged time as concatenated
//! HHMM-style digits rather than a duration: `130` means 1 hour 30
//! minutes, `45` means 45 minutes. This is a lossy domain encoding and is
//! reproduced exactly, including the `< 100` minutes-only branch.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::record::RawScalar;

const MINUTES_PER_HOUR: i64 = 60;
const PACKED_HOUR_BASE: i64 = 100;

/// Decodes a packed time value into fractional hours.
///
/// Missing, non-numeric, and non-positive values decode to zero. The
/// raw value is rounded to the nearest integer first to absorb stored
/// floating-point noise.
#[must_use]
pub fn packed_to_hours(raw: Option<&RawScalar>) -> Decimal {
    let Some(raw) = raw else {
        return Decimal::ZERO;
    };

    let value = raw.to_decimal();
    if value <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let packed = value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0);
    if packed <= 0 {
        return Decimal::ZERO;
    }

    if packed < PACKED_HOUR_BASE {
        // Minutes only.
        return Decimal::from(packed) / Decimal::from(MINUTES_PER_HOUR);
    }

    let hours = packed / PACKED_HOUR_BASE;
    let minutes = packed % PACKED_HOUR_BASE;
    Decimal::from(hours) + Decimal::from(minutes) / Decimal::from(MINUTES_PER_HOUR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(RawScalar::from(12), dec!(0.2))]
    #[case(RawScalar::from(112), dec!(1.2))]
    #[case(RawScalar::from(130), dec!(1.5))]
    #[case(RawScalar::from(99), dec!(1.65))]
    #[case(RawScalar::from(100), dec!(1))]
    #[case(RawScalar::from(1230), dec!(12.5))]
    #[case(RawScalar::from(0), dec!(0))]
    #[case(RawScalar::from(-5), dec!(0))]
    fn test_known_values(#[case] raw: RawScalar, #[case] expected: Decimal) {
        assert_eq!(packed_to_hours(Some(&raw)), expected);
    }

    #[test]
    fn test_missing_and_garbage_decode_to_zero() {
        assert_eq!(packed_to_hours(None), Decimal::ZERO);
        assert_eq!(
            packed_to_hours(Some(&RawScalar::from("not a number"))),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_float_noise_is_rounded_first() {
        // 129.999 stored for 130 decodes as 1h30m, not 1h29.999m.
        let raw = RawScalar::from("129.999");
        assert_eq!(packed_to_hours(Some(&raw)), dec!(1.5));

        let raw = RawScalar::from("11.5");
        assert_eq!(packed_to_hours(Some(&raw)), dec!(0.2));
    }

    #[test]
    fn test_string_encoded_values_decode() {
        assert_eq!(packed_to_hours(Some(&RawScalar::from("112"))), dec!(1.2));
    }
}
