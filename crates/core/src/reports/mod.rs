//! Report response shapes.
//!
//! The fixed key names here (`"Current Year"`, `"Last Year"`,
//! `lessThan30`, ...) are load-bearing: downstream chart consumers match
//! on them exactly.

pub mod types;


pub use types::{
    AccountManagerTotalsRow, AgingPercentages, AgingSummary, ClientGroupTotalsRow,
    MonthlyComparisonRow, StaffTotalsRow, monthly_rows,
};
