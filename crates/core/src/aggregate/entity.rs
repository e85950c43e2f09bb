//! Per-entity two-period totals and group mode selection.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::mode::ModeTracker;
use super::rounding::Precision;
use crate::record::TimeRecord;

/// Bucket label for rows whose grouping field is blank.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Bucket label for revenue rows carrying no staff member.
pub const DISBURSEMENT: &str = "Disbursement";

/// Categorical field a row set can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityField {
    /// Staff member.
    Staff,
    /// Account manager (partner).
    AccountManager,
    /// Job manager.
    JobManager,
    /// Client group.
    ClientGroup,
}

impl EntityField {
    /// Reads this field off a record.
    #[must_use]
    pub fn value(self, record: &TimeRecord) -> Option<&str> {
        match self {
            Self::Staff => record.staff.as_deref(),
            Self::AccountManager => record.account_manager.as_deref(),
            Self::JobManager => record.job_manager.as_deref(),
            Self::ClientGroup => record.client_group.as_deref(),
        }
    }
}

/// Returns true for the literal disbursement staff marker (any case).
#[must_use]
pub fn is_disbursement(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(DISBURSEMENT)
}

/// Grouping behavior for an entity aggregation.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityOptions {
    /// Bucket label for blank/whitespace-only keys; `None` drops the row.
    pub fallback: Option<&'static str>,
    /// Drop rows whose staff is the literal disbursement marker.
    pub exclude_disbursement: bool,
}

/// Current/prior totals for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTotals {
    /// Entity name (or a fallback bucket label).
    pub name: String,
    /// Current-period total.
    pub current: Decimal,
    /// Prior-period total.
    pub prior: Decimal,
}

/// Sums `value` per entity for the current and prior row sets.
///
/// Entities accumulate in first-seen order; `finalize` applies rounding,
/// zero-suppression and ordering.
pub fn entity_totals<F>(
    current_rows: &[TimeRecord],
    prior_rows: &[TimeRecord],
    field: EntityField,
    options: EntityOptions,
    value: F,
) -> Vec<EntityTotals>
where
    F: Fn(&TimeRecord) -> Decimal,
{
    let mut totals: Vec<EntityTotals> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let mut add = |record: &TimeRecord, is_current: bool, totals: &mut Vec<EntityTotals>| {
        let Some(key) = bucket_key(record, field, options) else {
            return;
        };
        let slot = match index.get(&key) {
            Some(&position) => position,
            None => {
                totals.push(EntityTotals {
                    name: key.clone(),
                    current: Decimal::ZERO,
                    prior: Decimal::ZERO,
                });
                index.insert(key, totals.len() - 1);
                totals.len() - 1
            }
        };
        if is_current {
            totals[slot].current += value(record);
        } else {
            totals[slot].prior += value(record);
        }
    };

    for record in current_rows {
        add(record, true, &mut totals);
    }
    for record in prior_rows {
        add(record, false, &mut totals);
    }

    totals
}

/// Rounds to display precision, optionally drops entities whose rounded
/// totals are both zero, and sorts descending by current-period total.
#[must_use]
pub fn finalize(
    mut totals: Vec<EntityTotals>,
    precision: Precision,
    suppress_zero: bool,
) -> Vec<EntityTotals> {
    for entry in &mut totals {
        entry.current = precision.round(entry.current);
        entry.prior = precision.round(entry.prior);
    }
    if suppress_zero {
        totals.retain(|entry| !(entry.current.is_zero() && entry.prior.is_zero()));
    }
    totals.sort_by(|a, b| b.current.cmp(&a.current));
    totals
}

/// Selects the most common companion value per group.
///
/// Groups use the same bucket rules as `entity_totals`; blank companion
/// values are not counted. Ties resolve to the first value seen.
#[must_use]
pub fn mode_by_group(
    rows: &[TimeRecord],
    group: EntityField,
    companion: EntityField,
    options: EntityOptions,
) -> HashMap<String, String> {
    let mut trackers: Vec<(String, ModeTracker)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in rows {
        let Some(key) = bucket_key(record, group, options) else {
            continue;
        };
        let Some(value) = companion
            .value(record)
            .map(str::trim)
            .filter(|name| !name.is_empty())
        else {
            continue;
        };

        let slot = match index.get(&key) {
            Some(&position) => position,
            None => {
                trackers.push((key.clone(), ModeTracker::new()));
                index.insert(key, trackers.len() - 1);
                trackers.len() - 1
            }
        };
        trackers[slot].1.record(value);
    }

    trackers
        .into_iter()
        .filter_map(|(key, tracker)| tracker.mode().map(|mode| (key, mode.to_string())))
        .collect()
}

/// Resolves the bucket a record lands in, or `None` to drop the record.
fn bucket_key(
    record: &TimeRecord,
    field: EntityField,
    options: EntityOptions,
) -> Option<String> {
    if options.exclude_disbursement
        && record.staff.as_deref().is_some_and(is_disbursement)
    {
        return None;
    }

    match field.value(record).map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => Some(name.to_string()),
        None => options.fallback.map(str::to_string),
    }
}
