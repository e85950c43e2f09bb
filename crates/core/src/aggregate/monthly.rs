//! Fiscal-month bucketing for two-period comparisons.

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::fiscal::{ComparisonWindows, fiscal_month_index};
use crate::record::TimeRecord;

/// Twelve fiscal-ordered month totals for current and prior periods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyBreakdown {
    /// Current-period totals, index 0 = July.
    pub current: [Decimal; 12],
    /// Prior-period totals, index 0 = July.
    pub prior: [Decimal; 12],
}

impl Default for MonthlyBreakdown {
    fn default() -> Self {
        Self {
            current: [Decimal::ZERO; 12],
            prior: [Decimal::ZERO; 12],
        }
    }
}

/// Sums `value` per fiscal month into current/prior buckets.
///
/// A record lands in the bucket derived from its calendar date. Records
/// outside the active window - including past a same-point-in-time upper
/// clamp - and records without a parseable date are excluded, not
/// zero-filled.
pub fn monthly_breakdown<F>(
    current_rows: &[TimeRecord],
    prior_rows: &[TimeRecord],
    windows: &ComparisonWindows,
    value: F,
) -> MonthlyBreakdown
where
    F: Fn(&TimeRecord) -> Decimal,
{
    let mut breakdown = MonthlyBreakdown::default();

    for record in current_rows {
        if let Some(date) = record.service_date()
            && windows.current.contains(date)
        {
            breakdown.current[fiscal_month_index(date.month())] += value(record);
        }
    }

    for record in prior_rows {
        if let Some(date) = record.service_date()
            && windows.prior.contains(date)
        {
            breakdown.prior[fiscal_month_index(date.month())] += value(record);
        }
    }

    breakdown
}
