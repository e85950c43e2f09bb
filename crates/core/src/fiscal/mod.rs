//! Fiscal year windows and month indexing.
//!
//! Every report in the application works on a July 1 - June 30 fiscal
//! year. Reference dates are always injected by the caller; nothing in
//! this module reads the wall clock.

pub mod calendar;


pub use calendar::{
    ComparisonWindows, FISCAL_MONTH_LABELS, FISCAL_YEAR_START_MONTH, FiscalYearWindow, as_of_or,
    fiscal_month_index, parse_as_of,
};
