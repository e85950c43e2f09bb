//! Source row model and coercion rules.
//!
//! Rows come back from the tabular source with loosely-typed fields:
//! amounts may be numbers or strings, dates are strings, and almost
//! everything is nullable. Coercion is total - a malformed field folds to
//! zero or `None` so one bad row can never abort an aggregation.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::timevalue::packed_to_hours;

/// A numeric field as it arrives from the source: number or string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    /// Already numeric.
    Number(Decimal),
    /// Stringly-typed numeric, parsed on access.
    Text(String),
}

impl RawScalar {
    /// Coerces to a decimal; parse failure folds to zero.
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        match self {
            Self::Number(value) => *value,
            Self::Text(text) => Decimal::from_str(text.trim()).unwrap_or(Decimal::ZERO),
        }
    }
}

impl From<Decimal> for RawScalar {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for RawScalar {
    fn from(value: i64) -> Self {
        Self::Number(Decimal::from(value))
    }
}

impl From<&str> for RawScalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One unit of logged time or money fetched from the data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeRecord {
    /// Calendar date of the record (`YYYY-MM-DD`).
    pub date: Option<String>,
    /// Staff member the time/amount belongs to.
    pub staff: Option<String>,
    /// Account manager (partner) responsible for the client.
    pub account_manager: Option<String>,
    /// Job manager responsible for the engagement.
    pub job_manager: Option<String>,
    /// Client group the work was performed for.
    pub client_group: Option<String>,
    /// Packed legacy time value (HHMM-style digits).
    pub time_value: Option<RawScalar>,
    /// Monetary amount.
    pub amount: Option<RawScalar>,
    /// Whether the time is billable.
    pub billable: Option<bool>,
    /// Whether the entry reduces capacity (leave, admin).
    pub capacity_reducing: Option<bool>,
    /// Whether the amount has been billed.
    pub billed: Option<bool>,
}

impl TimeRecord {
    /// Parses the record date; `None` when missing or malformed.
    #[must_use]
    pub fn service_date(&self) -> Option<NaiveDate> {
        self.date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
    }

    /// Monetary amount coerced to a decimal (zero when absent/garbage).
    #[must_use]
    pub fn amount_value(&self) -> Decimal {
        self.amount
            .as_ref()
            .map_or(Decimal::ZERO, RawScalar::to_decimal)
    }

    /// Logged time decoded to fractional hours.
    #[must_use]
    pub fn hours(&self) -> Decimal {
        packed_to_hours(self.time_value.as_ref())
    }

    /// Whether the record is flagged billable.
    #[must_use]
    pub fn is_billable(&self) -> bool {
        self.billable.unwrap_or(false)
    }

    /// Whether the record is flagged capacity-reducing.
    #[must_use]
    pub fn is_capacity_reducing(&self) -> bool {
        self.capacity_reducing.unwrap_or(false)
    }

    /// Whether the record has been billed.
    #[must_use]
    pub fn is_billed(&self) -> bool {
        self.billed.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_raw_scalar_coercion() {
        assert_eq!(RawScalar::from(42i64).to_decimal(), dec!(42));
        assert_eq!(RawScalar::from("123.45").to_decimal(), dec!(123.45));
        assert_eq!(RawScalar::from(" 10 ").to_decimal(), dec!(10));
        assert_eq!(RawScalar::from("garbage").to_decimal(), Decimal::ZERO);
        assert_eq!(RawScalar::from("").to_decimal(), Decimal::ZERO);
    }

    #[test]
    fn test_amount_accepts_number_or_string() {
        let json = r#"{"date": "2024-07-05", "amount": "99.50"}"#;
        let record: TimeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.amount_value(), dec!(99.50));

        let json = r#"{"date": "2024-07-05", "amount": 99.5}"#;
        let record: TimeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.amount_value(), dec!(99.5));
    }

    #[test]
    fn test_service_date_parses_or_folds_to_none() {
        let record = TimeRecord {
            date: Some("2024-07-05".to_string()),
            ..TimeRecord::default()
        };
        assert_eq!(
            record.service_date(),
            Some(NaiveDate::from_ymd_opt(2024, 7, 5).unwrap())
        );

        let record = TimeRecord {
            date: Some("05/07/2024".to_string()),
            ..TimeRecord::default()
        };
        assert_eq!(record.service_date(), None);
        assert_eq!(TimeRecord::default().service_date(), None);
    }

    #[test]
    fn test_camel_case_field_names() {
        let json = r#"{
            "date": "2024-07-05",
            "staff": "Dana",
            "accountManager": "Lee",
            "jobManager": "Kim",
            "clientGroup": "Acme Group",
            "timeValue": 130,
            "billable": true,
            "capacityReducing": false
        }"#;
        let record: TimeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.account_manager.as_deref(), Some("Lee"));
        assert_eq!(record.client_group.as_deref(), Some("Acme Group"));
        assert!(record.is_billable());
        assert!(!record.is_capacity_reducing());
        assert!(!record.is_billed());
    }
}
