//! Report row and summary types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::aggregate::{AgingTotals, EntityTotals, MonthlyBreakdown, Precision};
use crate::fiscal::FISCAL_MONTH_LABELS;

/// One month of a two-period comparison series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyComparisonRow {
    /// Month name in fiscal order (July first).
    pub month: String,
    /// Current-period total.
    #[serde(rename = "Current Year")]
    pub current_year: Decimal,
    /// Prior-period total.
    #[serde(rename = "Last Year")]
    pub last_year: Decimal,
}

/// Shapes a monthly breakdown into the 12 fiscal-ordered rows.
#[must_use]
pub fn monthly_rows(breakdown: &MonthlyBreakdown, precision: Precision) -> Vec<MonthlyComparisonRow> {
    FISCAL_MONTH_LABELS
        .iter()
        .enumerate()
        .map(|(index, month)| MonthlyComparisonRow {
            month: (*month).to_string(),
            current_year: precision.round(breakdown.current[index]),
            last_year: precision.round(breakdown.prior[index]),
        })
        .collect()
}

/// Two-period totals for one staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffTotalsRow {
    /// Staff name.
    pub staff: String,
    /// Current-period total.
    pub current_year: Decimal,
    /// Prior-period total.
    pub last_year: Decimal,
}

impl StaffTotalsRow {
    /// Shapes finalized entity totals into staff rows.
    #[must_use]
    pub fn from_totals(totals: Vec<EntityTotals>) -> Vec<Self> {
        totals
            .into_iter()
            .map(|entry| Self {
                staff: entry.name,
                current_year: entry.current,
                last_year: entry.prior,
            })
            .collect()
    }
}

/// Two-period totals for one account manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountManagerTotalsRow {
    /// Account manager name.
    pub account_manager: String,
    /// Current-period total.
    pub current_year: Decimal,
    /// Prior-period total.
    pub last_year: Decimal,
}

impl AccountManagerTotalsRow {
    /// Shapes finalized entity totals into account-manager rows.
    #[must_use]
    pub fn from_totals(totals: Vec<EntityTotals>) -> Vec<Self> {
        totals
            .into_iter()
            .map(|entry| Self {
                account_manager: entry.name,
                current_year: entry.current,
                last_year: entry.prior,
            })
            .collect()
    }
}

/// Two-period totals for one client group, with the representative
/// managers mode-selected from the group's records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientGroupTotalsRow {
    /// Client group name.
    pub client_group: String,
    /// Current-period total.
    pub current_year: Decimal,
    /// Prior-period total.
    pub last_year: Decimal,
    /// Most common account manager on the group's records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_manager: Option<String>,
    /// Most common job manager on the group's records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_manager: Option<String>,
}

impl ClientGroupTotalsRow {
    /// Shapes finalized entity totals into client-group rows, attaching
    /// mode-selected managers where a group has any.
    #[must_use]
    pub fn from_totals(
        totals: Vec<EntityTotals>,
        account_managers: &HashMap<String, String>,
        job_managers: &HashMap<String, String>,
    ) -> Vec<Self> {
        totals
            .into_iter()
            .map(|entry| Self {
                account_manager: account_managers.get(&entry.name).cloned(),
                job_manager: job_managers.get(&entry.name).cloned(),
                client_group: entry.name,
                current_year: entry.current,
                last_year: entry.prior,
            })
            .collect()
    }
}

/// Aging-bucket shares of the summary total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgingPercentages {
    /// Share younger than 30 days.
    pub less_than_30: Decimal,
    /// Share aged 30-59 days.
    #[serde(rename = "days30to60")]
    pub days_30_to_60: Decimal,
    /// Share aged 60-89 days.
    #[serde(rename = "days60to90")]
    pub days_60_to_90: Decimal,
    /// Share aged 90-119 days.
    #[serde(rename = "days90to120")]
    pub days_90_to_120: Decimal,
    /// Share aged 120 days and older.
    pub days_120_plus: Decimal,
}

/// Aging summary over outstanding amounts, all values rounded to whole
/// units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgingSummary {
    /// Amount younger than 30 days.
    pub less_than_30: Decimal,
    /// Amount aged 30-59 days.
    #[serde(rename = "days30to60")]
    pub days_30_to_60: Decimal,
    /// Amount aged 60-89 days.
    #[serde(rename = "days60to90")]
    pub days_60_to_90: Decimal,
    /// Amount aged 90-119 days.
    #[serde(rename = "days90to120")]
    pub days_90_to_120: Decimal,
    /// Amount aged 120 days and older.
    pub days_120_plus: Decimal,
    /// Total outstanding amount.
    pub total: Decimal,
    /// Bucket shares of the total.
    pub percentages: AgingPercentages,
}

impl AgingSummary {
    /// Rounds aging totals to whole units and derives bucket shares.
    ///
    /// A zero total produces zero percentages rather than dividing.
    #[must_use]
    pub fn from_totals(totals: &AgingTotals) -> Self {
        let total = totals.total();
        let percent = |bucket: Decimal| {
            if total.is_zero() {
                Decimal::ZERO
            } else {
                Precision::Whole.round(bucket / total * Decimal::ONE_HUNDRED)
            }
        };

        Self {
            percentages: AgingPercentages {
                less_than_30: percent(totals.less_than_30),
                days_30_to_60: percent(totals.days_30_to_60),
                days_60_to_90: percent(totals.days_60_to_90),
                days_90_to_120: percent(totals.days_90_to_120),
                days_120_plus: percent(totals.days_120_plus),
            },
            less_than_30: Precision::Whole.round(totals.less_than_30),
            days_30_to_60: Precision::Whole.round(totals.days_30_to_60),
            days_60_to_90: Precision::Whole.round(totals.days_60_to_90),
            days_90_to_120: Precision::Whole.round(totals.days_90_to_120),
            days_120_plus: Precision::Whole.round(totals.days_120_plus),
            total: Precision::Whole.round(total),
        }
    }
}
