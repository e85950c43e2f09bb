//! Aggregation engine.
//!
//! Consumes materialized row sets and produces the aggregate shapes the
//! reports are built from: fiscal-month totals, per-entity two-period
//! totals, aging buckets, mode selection, and distinct name lists. All
//! sums are `Decimal`; rounding happens only at the report boundary.

pub mod aging;
pub mod entity;
pub mod mode;
pub mod monthly;
pub mod names;
pub mod rounding;


pub use aging::{AgingTotals, aging_totals};
pub use entity::{
    DISBURSEMENT, EntityField, EntityOptions, EntityTotals, UNCATEGORIZED, entity_totals,
    finalize, is_disbursement, mode_by_group,
};
pub use mode::ModeTracker;
pub use monthly::{MonthlyBreakdown, monthly_breakdown};
pub use names::distinct_values;
pub use rounding::Precision;
