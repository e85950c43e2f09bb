//! Conjunctive record filters.
//!
//! The supported filter kinds form a closed enum so an unsupported kind
//! is a compile error rather than a silently-ignored dictionary key. The
//! wire form is a JSON array of `{"type": ..., "value": ...}` objects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::TimeRecord;

/// A single filter predicate over source rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum RecordFilter {
    /// Record date on or after this date.
    DateFrom(NaiveDate),
    /// Record date on or before this date.
    DateTo(NaiveDate),
    /// Exact staff name.
    Staff(String),
    /// Exact account manager name.
    AccountManager(String),
    /// Exact job manager name.
    JobManager(String),
    /// Exact client group name.
    ClientGroup(String),
    /// Billable flag equality.
    Billable(bool),
    /// Capacity-reducing flag equality.
    CapacityReducing(bool),
}

impl RecordFilter {
    /// Evaluates this predicate against a record.
    ///
    /// Records whose date cannot be parsed fail any date-range filter.
    #[must_use]
    pub fn matches(&self, record: &TimeRecord) -> bool {
        match self {
            Self::DateFrom(from) => record.service_date().is_some_and(|date| date >= *from),
            Self::DateTo(to) => record.service_date().is_some_and(|date| date <= *to),
            Self::Staff(name) => record.staff.as_deref() == Some(name.as_str()),
            Self::AccountManager(name) => {
                record.account_manager.as_deref() == Some(name.as_str())
            }
            Self::JobManager(name) => record.job_manager.as_deref() == Some(name.as_str()),
            Self::ClientGroup(name) => record.client_group.as_deref() == Some(name.as_str()),
            Self::Billable(flag) => record.is_billable() == *flag,
            Self::CapacityReducing(flag) => record.is_capacity_reducing() == *flag,
        }
    }
}

/// A conjunction of filters; empty matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    filters: Vec<RecordFilter>,
}

impl FilterSet {
    /// Creates an empty filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter set covering an inclusive date range.
    #[must_use]
    pub fn for_dates(from: NaiveDate, to: NaiveDate) -> Self {
        Self::new()
            .with(RecordFilter::DateFrom(from))
            .with(RecordFilter::DateTo(to))
    }

    /// Adds a filter to the conjunction.
    #[must_use]
    pub fn with(mut self, filter: RecordFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Parses a JSON filter payload.
    ///
    /// A payload that fails to parse is treated as "no filters".
    #[must_use]
    pub fn parse(payload: &str) -> Self {
        serde_json::from_str(payload).unwrap_or_default()
    }

    /// Returns true if the set has no filters (matches everything).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Evaluates the conjunction against a record.
    #[must_use]
    pub fn matches(&self, record: &TimeRecord) -> bool {
        self.filters.iter().all(|filter| filter.matches(record))
    }

    /// Iterates the individual filters.
    pub fn iter(&self) -> impl Iterator<Item = &RecordFilter> {
        self.filters.iter()
    }
}
