//! Distinct name lists for filter dropdowns.

use std::collections::BTreeSet;

use super::entity::EntityField;
use crate::record::TimeRecord;

/// Collects the distinct non-blank values of `field`, sorted ascending.
#[must_use]
pub fn distinct_values(rows: &[TimeRecord], field: EntityField) -> Vec<String> {
    let names: BTreeSet<String> = rows
        .iter()
        .filter_map(|record| field.value(record))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    names.into_iter().collect()
}
