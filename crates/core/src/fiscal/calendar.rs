//! Fiscal year window calculations.

use chrono::{Datelike, NaiveDate};
use firmsight_shared::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Calendar month that opens the fiscal year (July).
pub const FISCAL_YEAR_START_MONTH: u32 = 7;

/// Month names in fiscal order (July first, June last).
pub const FISCAL_MONTH_LABELS: [&str; 12] = [
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
];

/// A fiscal year window.
///
/// Computed fresh per request from a reference date; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalYearWindow {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window (inclusive).
    pub end: NaiveDate,
    /// Calendar year the window starts in.
    pub start_year: i32,
    /// Calendar year the window ends in.
    pub end_year: i32,
}

impl FiscalYearWindow {
    /// Returns the full fiscal year starting July 1 of `start_year`.
    #[must_use]
    pub fn starting_in(start_year: i32) -> Self {
        Self {
            start: july_first(start_year),
            end: june_thirtieth(start_year + 1),
            start_year,
            end_year: start_year + 1,
        }
    }

    /// Returns the fiscal year containing `date`.
    ///
    /// Dates in July-December belong to the year starting that July;
    /// dates in January-June belong to the year that started the
    /// previous July.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        let start_year = if date.month() >= FISCAL_YEAR_START_MONTH {
            date.year()
        } else {
            date.year() - 1
        };
        Self::starting_in(start_year)
    }

    /// Returns the fiscal year immediately before this one.
    #[must_use]
    pub fn prior(&self) -> Self {
        Self::starting_in(self.start_year - 1)
    }

    /// Returns true if `date` falls within this window (inclusive).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Maps a calendar month (1-12) to its fiscal position: 0 = July,
/// 5 = December, 6 = January, 11 = June.
#[must_use]
pub fn fiscal_month_index(month: u32) -> usize {
    let index = if month >= FISCAL_YEAR_START_MONTH {
        month - FISCAL_YEAR_START_MONTH
    } else {
        month + (12 - FISCAL_YEAR_START_MONTH)
    };
    index as usize
}

/// Current and prior fiscal windows for a two-period comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonWindows {
    /// The window containing the reference date.
    pub current: FiscalYearWindow,
    /// The window one fiscal year earlier.
    pub prior: FiscalYearWindow,
}

impl ComparisonWindows {
    /// Full-year comparison: both windows run July 1 - June 30.
    #[must_use]
    pub fn full_year(as_of: NaiveDate) -> Self {
        let current = FiscalYearWindow::containing(as_of);
        let prior = current.prior();
        Self { current, prior }
    }

    /// Same-point-in-time comparison as of a specific day.
    ///
    /// The current window is truncated at `as_of`; the prior window is
    /// truncated at the same day one calendar year earlier, clamped so it
    /// never runs past the prior fiscal year end (the shift from a leap
    /// day lands on Feb 28).
    #[must_use]
    pub fn to_date(as_of: NaiveDate) -> Self {
        let mut windows = Self::full_year(as_of);
        windows.current.end = as_of;

        let shifted = shift_back_one_year(as_of);
        if shifted < windows.prior.end {
            windows.prior.end = shifted;
        }
        windows
    }
}

/// Strictly parses an explicit as-of-date parameter (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `AppError::Validation` when the value does not parse.
pub fn parse_as_of(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("invalid as-of date: {raw}")))
}

/// Resolves an optional as-of-date parameter, falling back to `today`
/// when the value is absent or unparseable.
#[must_use]
pub fn as_of_or(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    raw.and_then(|value| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok())
        .unwrap_or(today)
}

/// Shifts a date back exactly one calendar year, clamping the day into
/// the target month when the source day does not exist there.
fn shift_back_one_year(date: NaiveDate) -> NaiveDate {
    let year = date.year() - 1;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .unwrap_or_else(|| last_day_of_month(year, date.month()))
}

fn july_first(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 7, 1).unwrap()
}

fn june_thirtieth(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 6, 30).unwrap()
}

/// Returns the last day of a month.
fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    next_month
        .unwrap()
        .pred_opt()
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap())
}
