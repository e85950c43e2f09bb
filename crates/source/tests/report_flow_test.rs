//! End-to-end report flows over an in-memory source.

use async_trait::async_trait;
use chrono::NaiveDate;
use firmsight_core::filter::FilterSet;
use firmsight_core::record::{RawScalar, TimeRecord};
use firmsight_shared::AppError;
use firmsight_shared::types::{OrganizationId, PageWindow};
use firmsight_source::{MemorySource, ReportAssembler, ReportError, SourceError, TableSource};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, dom).unwrap()
}

fn amount_row(date: &str, staff: &str, amount: Decimal) -> TimeRecord {
    TimeRecord {
        date: Some(date.to_string()),
        staff: Some(staff.to_string()),
        amount: Some(RawScalar::Number(amount)),
        ..TimeRecord::default()
    }
}

fn time_row(date: &str, staff: &str, packed: i64, billable: bool) -> TimeRecord {
    TimeRecord {
        date: Some(date.to_string()),
        staff: Some(staff.to_string()),
        time_value: Some(RawScalar::from(packed)),
        billable: Some(billable),
        ..TimeRecord::default()
    }
}

#[tokio::test]
async fn test_revenue_by_month_buckets_one_fiscal_year() {
    let organization_id = OrganizationId::new();
    let source = MemorySource::with_rows(
        organization_id,
        vec![
            amount_row("2024-07-05", "Dana", dec!(100)),
            amount_row("2024-08-10", "Dana", dec!(200)),
            amount_row("2025-06-20", "Dana", dec!(50)),
        ],
    );
    let assembler = ReportAssembler::new(source);

    let rows = assembler
        .revenue_by_month(organization_id, day(2025, 6, 30))
        .await
        .unwrap();

    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0].month, "July");
    assert_eq!(rows[0].current_year, dec!(100));
    assert_eq!(rows[1].month, "August");
    assert_eq!(rows[1].current_year, dec!(200));
    assert_eq!(rows[11].month, "June");
    assert_eq!(rows[11].current_year, dec!(50));

    let zero_months = rows
        .iter()
        .filter(|row| row.current_year.is_zero())
        .count();
    assert_eq!(zero_months, 9);
    assert!(rows.iter().all(|row| row.last_year.is_zero()));
}

#[tokio::test]
async fn test_revenue_by_staff_totals_both_periods() {
    let organization_id = OrganizationId::new();
    let source = MemorySource::with_rows(
        organization_id,
        vec![
            amount_row("2024-07-05", "Dana", dec!(100)),
            amount_row("2024-08-10", "Dana", dec!(200)),
            amount_row("2025-06-20", "Dana", dec!(50)),
            // Prior fiscal year.
            amount_row("2023-09-01", "Dana", dec!(75)),
            // No staff member: a disbursement line, kept visible.
            TimeRecord {
                date: Some("2024-10-01".to_string()),
                amount: Some(RawScalar::from("25.5")),
                ..TimeRecord::default()
            },
        ],
    );
    let assembler = ReportAssembler::new(source);

    let rows = assembler
        .revenue_by_staff(organization_id, day(2025, 6, 30))
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].staff, "Dana");
    assert_eq!(rows[0].current_year, dec!(350));
    assert_eq!(rows[0].last_year, dec!(75));
    assert_eq!(rows[1].staff, "Disbursement");
    assert_eq!(rows[1].current_year, dec!(25.50));
}

#[tokio::test]
async fn test_revenue_by_client_group_mode_selects_managers() {
    let organization_id = OrganizationId::new();
    let group_row = |date: &str, group: &str, manager: &str, amount: Decimal| TimeRecord {
        date: Some(date.to_string()),
        client_group: Some(group.to_string()),
        account_manager: Some(manager.to_string()),
        amount: Some(RawScalar::Number(amount)),
        ..TimeRecord::default()
    };
    let source = MemorySource::with_rows(
        organization_id,
        vec![
            group_row("2024-08-01", "Acme", "Lee", dec!(100)),
            group_row("2024-08-02", "Acme", "Kim", dec!(40)),
            group_row("2024-08-03", "Acme", "Lee", dec!(60)),
            group_row("2024-09-01", "Globex", "Kim", dec!(500)),
        ],
    );
    let assembler = ReportAssembler::new(source);

    let rows = assembler
        .revenue_by_client_group(organization_id, day(2025, 6, 30))
        .await
        .unwrap();

    // Sorted descending by current-period total.
    assert_eq!(rows[0].client_group, "Globex");
    assert_eq!(rows[0].account_manager.as_deref(), Some("Kim"));
    assert_eq!(rows[1].client_group, "Acme");
    assert_eq!(rows[1].current_year, dec!(200));
    assert_eq!(rows[1].account_manager.as_deref(), Some("Lee"));
    assert_eq!(rows[1].job_manager, None);
}

#[tokio::test]
async fn test_billable_hours_by_staff_excludes_disbursement_and_zero_rows() {
    let organization_id = OrganizationId::new();
    let source = MemorySource::with_rows(
        organization_id,
        vec![
            time_row("2024-08-01", "Dana", 130, true), // 1.5h
            time_row("2024-08-02", "Dana", 45, true),  // 0.75h
            time_row("2024-08-03", "Disbursement", 800, true),
            time_row("2024-08-04", "Lee", 0, true),
            time_row("2024-08-05", "Kim", 230, false), // not billable
        ],
    );
    let assembler = ReportAssembler::new(source);

    let rows = assembler
        .billable_hours_by_staff(organization_id, day(2025, 6, 30))
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].staff, "Dana");
    assert_eq!(rows[0].current_year, dec!(2.25));
}

#[tokio::test]
async fn test_hours_by_staff_skips_capacity_reducing_entries() {
    let organization_id = OrganizationId::new();
    let productive = |date: &str, staff: &str, packed: i64, reducing: bool| TimeRecord {
        date: Some(date.to_string()),
        staff: Some(staff.to_string()),
        time_value: Some(RawScalar::from(packed)),
        capacity_reducing: Some(reducing),
        ..TimeRecord::default()
    };
    let source = MemorySource::with_rows(
        organization_id,
        vec![
            productive("2024-08-01", "Dana", 700, false),
            productive("2024-08-02", "Dana", 100, true), // leave
        ],
    );
    let assembler = ReportAssembler::new(source);

    let rows = assembler
        .hours_by_staff(organization_id, day(2025, 6, 30))
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].current_year, dec!(7));
}

#[tokio::test]
async fn test_wip_aging_covers_unbilled_amounts_only() {
    let organization_id = OrganizationId::new();
    let wip_row = |date: Option<&str>, amount: Decimal, billed: bool| TimeRecord {
        date: date.map(str::to_string),
        amount: Some(RawScalar::Number(amount)),
        billed: Some(billed),
        ..TimeRecord::default()
    };
    let source = MemorySource::with_rows(
        organization_id,
        vec![
            wip_row(Some("2024-09-20"), dec!(100), false), // 11 days
            wip_row(Some("2024-08-10"), dec!(200), false), // 52 days
            wip_row(Some("2024-01-01"), dec!(300), false), // ancient
            wip_row(None, dec!(50), false),                // undated
            wip_row(Some("2024-09-01"), dec!(999), true),  // billed, ignored
        ],
    );
    let assembler = ReportAssembler::new(source);

    let summary = assembler
        .wip_aging(organization_id, day(2024, 10, 1))
        .await
        .unwrap();

    assert_eq!(summary.less_than_30, dec!(150));
    assert_eq!(summary.days_30_to_60, dec!(200));
    assert_eq!(summary.days_120_plus, dec!(300));
    assert_eq!(summary.total, dec!(650));
    assert_eq!(summary.percentages.days_30_to_60, dec!(31));
}

#[tokio::test]
async fn test_option_lists_are_sorted_and_deduplicated() {
    let organization_id = OrganizationId::new();
    let source = MemorySource::with_rows(
        organization_id,
        vec![
            amount_row("2024-08-01", "Lee", dec!(1)),
            amount_row("2024-08-02", "Dana", dec!(1)),
            amount_row("2024-08-03", "Lee", dec!(1)),
            amount_row("2024-08-04", "Disbursement", dec!(1)),
        ],
    );
    let assembler = ReportAssembler::new(source);

    let names = assembler.staff_names(organization_id).await.unwrap();
    assert_eq!(names, vec!["Dana".to_string(), "Lee".to_string()]);
}

#[tokio::test]
async fn test_fetch_failure_aborts_report() {
    struct BrokenSource;

    #[async_trait]
    impl TableSource for BrokenSource {
        async fn fetch_page(
            &self,
            _organization_id: OrganizationId,
            _filters: &FilterSet,
            page: PageWindow,
        ) -> Result<Vec<TimeRecord>, SourceError> {
            Err(SourceError::PageFetch {
                offset: page.offset,
                message: "remote table offline".to_string(),
            })
        }
    }

    let assembler = ReportAssembler::new(BrokenSource);
    let err = assembler
        .revenue_by_month(OrganizationId::new(), day(2025, 6, 30))
        .await
        .unwrap_err();

    assert!(matches!(&err, ReportError::Fetch(_)));
    assert!(err.to_string().starts_with("failed to fetch data"));
    assert!(err.to_string().contains("remote table offline"));

    let app_err = AppError::from(err);
    assert_eq!(app_err.status_code(), 500);
    assert_eq!(app_err.error_code(), "EXTERNAL_SERVICE_ERROR");
}
