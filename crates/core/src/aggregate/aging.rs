//! Aging buckets for outstanding amounts.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::record::TimeRecord;

/// Monetary totals bucketed by age-in-days.
///
/// The bands are fixed and non-overlapping; every record lands in
/// exactly one, so the bucket sums always equal the row-set total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgingTotals {
    /// Younger than 30 days (also future-dated and undated records).
    pub less_than_30: Decimal,
    /// 30-59 days.
    pub days_30_to_60: Decimal,
    /// 60-89 days.
    pub days_60_to_90: Decimal,
    /// 90-119 days.
    pub days_90_to_120: Decimal,
    /// 120 days and older.
    pub days_120_plus: Decimal,
}

impl AgingTotals {
    /// Sum across all bands.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.less_than_30
            + self.days_30_to_60
            + self.days_60_to_90
            + self.days_90_to_120
            + self.days_120_plus
    }

    fn add(&mut self, today: NaiveDate, date: Option<NaiveDate>, amount: Decimal) {
        // Undated records cannot be aged; keep them in the youngest band
        // so the bucket sums still reconcile with the total.
        let Some(date) = date else {
            self.less_than_30 += amount;
            return;
        };

        let age_days = (today - date).num_days();
        match age_days {
            i64::MIN..30 => self.less_than_30 += amount,
            30..60 => self.days_30_to_60 += amount,
            60..90 => self.days_60_to_90 += amount,
            90..120 => self.days_90_to_120 += amount,
            _ => self.days_120_plus += amount,
        }
    }
}

/// Buckets `value` sums by record age relative to `today`.
pub fn aging_totals<F>(rows: &[TimeRecord], today: NaiveDate, value: F) -> AgingTotals
where
    F: Fn(&TimeRecord) -> Decimal,
{
    let mut totals = AgingTotals::default();
    for record in rows {
        totals.add(today, record.service_date(), value(record));
    }
    totals
}
