//! Report assemblers.
//!
//! Each report is a thin wiring of fiscal windows + source filters +
//! aggregation + response shape. Current and prior fetches run
//! concurrently and join before aggregation; nothing here retries or
//! reads the wall clock - callers inject every reference date.

use chrono::NaiveDate;
use firmsight_core::aggregate::{
    DISBURSEMENT, EntityField, EntityOptions, Precision, UNCATEGORIZED, aging_totals,
    distinct_values, entity_totals, finalize, is_disbursement, mode_by_group,
    monthly_breakdown,
};
use firmsight_core::filter::{FilterSet, RecordFilter};
use firmsight_core::fiscal::ComparisonWindows;
use firmsight_core::record::TimeRecord;
use firmsight_core::reports::{
    AccountManagerTotalsRow, AgingSummary, ClientGroupTotalsRow, MonthlyComparisonRow,
    StaffTotalsRow, monthly_rows,
};
use firmsight_shared::AppError;
use firmsight_shared::types::OrganizationId;

use crate::fetch::fetch_all;
use crate::source::{SourceError, TableSource};

/// Error types for report assembly.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A page fetch failed; the whole report computation is aborted and
    /// no partial aggregate is returned.
    #[error("failed to fetch data: {0}")]
    Fetch(#[from] SourceError),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Fetch(inner) => Self::ExternalService(inner.to_string()),
        }
    }
}

/// Assembles the report families served to the dashboard.
#[derive(Debug, Clone)]
pub struct ReportAssembler<S> {
    source: S,
}

impl<S: TableSource> ReportAssembler<S> {
    /// Creates a new assembler over a table source.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    // ========================================================================
    // Revenue
    // ========================================================================

    /// Invoice amounts per fiscal month, current vs prior full year.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fetch fails.
    pub async fn revenue_by_month(
        &self,
        organization_id: OrganizationId,
        as_of: NaiveDate,
    ) -> Result<Vec<MonthlyComparisonRow>, ReportError> {
        let windows = ComparisonWindows::full_year(as_of);
        let (current, prior) = self.fetch_windows(organization_id, &windows, None).await?;

        let breakdown = monthly_breakdown(&current, &prior, &windows, TimeRecord::amount_value);
        Ok(monthly_rows(&breakdown, Precision::Cents))
    }

    /// Revenue per staff member as of the same point in both years.
    ///
    /// Amounts carrying no staff member are disbursements and stay
    /// visible under their own bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fetch fails.
    pub async fn revenue_by_staff(
        &self,
        organization_id: OrganizationId,
        as_of: NaiveDate,
    ) -> Result<Vec<StaffTotalsRow>, ReportError> {
        let windows = ComparisonWindows::to_date(as_of);
        let (current, prior) = self.fetch_windows(organization_id, &windows, None).await?;

        let totals = entity_totals(
            &current,
            &prior,
            EntityField::Staff,
            EntityOptions {
                fallback: Some(DISBURSEMENT),
                exclude_disbursement: false,
            },
            TimeRecord::amount_value,
        );
        Ok(StaffTotalsRow::from_totals(finalize(
            totals,
            Precision::Cents,
            false,
        )))
    }

    /// Revenue per client group as of the same point in both years, with
    /// the group's representative managers mode-selected from its
    /// current-period records.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fetch fails.
    pub async fn revenue_by_client_group(
        &self,
        organization_id: OrganizationId,
        as_of: NaiveDate,
    ) -> Result<Vec<ClientGroupTotalsRow>, ReportError> {
        let windows = ComparisonWindows::to_date(as_of);
        let (current, prior) = self.fetch_windows(organization_id, &windows, None).await?;

        let options = EntityOptions {
            fallback: Some(UNCATEGORIZED),
            exclude_disbursement: false,
        };
        let totals = entity_totals(
            &current,
            &prior,
            EntityField::ClientGroup,
            options,
            TimeRecord::amount_value,
        );
        let account_managers = mode_by_group(
            &current,
            EntityField::ClientGroup,
            EntityField::AccountManager,
            options,
        );
        let job_managers = mode_by_group(
            &current,
            EntityField::ClientGroup,
            EntityField::JobManager,
            options,
        );

        Ok(ClientGroupTotalsRow::from_totals(
            finalize(totals, Precision::Cents, false),
            &account_managers,
            &job_managers,
        ))
    }

    // ========================================================================
    // Billable time & productivity
    // ========================================================================

    /// Billable hours per fiscal month, current vs prior full year.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fetch fails.
    pub async fn billable_hours_by_month(
        &self,
        organization_id: OrganizationId,
        as_of: NaiveDate,
    ) -> Result<Vec<MonthlyComparisonRow>, ReportError> {
        let windows = ComparisonWindows::full_year(as_of);
        let (current, prior) = self
            .fetch_windows(organization_id, &windows, Some(RecordFilter::Billable(true)))
            .await?;

        let breakdown = monthly_breakdown(&current, &prior, &windows, TimeRecord::hours);
        Ok(monthly_rows(&breakdown, Precision::Cents))
    }

    /// Billable hours per staff member as of the same point in both
    /// years. Disbursement rows are dropped entirely; staff whose
    /// rounded totals are both zero are suppressed.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fetch fails.
    pub async fn billable_hours_by_staff(
        &self,
        organization_id: OrganizationId,
        as_of: NaiveDate,
    ) -> Result<Vec<StaffTotalsRow>, ReportError> {
        let windows = ComparisonWindows::to_date(as_of);
        let (current, prior) = self
            .fetch_windows(organization_id, &windows, Some(RecordFilter::Billable(true)))
            .await?;

        let totals = entity_totals(
            &current,
            &prior,
            EntityField::Staff,
            EntityOptions {
                fallback: None,
                exclude_disbursement: true,
            },
            TimeRecord::hours,
        );
        Ok(StaffTotalsRow::from_totals(finalize(
            totals,
            Precision::Cents,
            true,
        )))
    }

    /// Productive (non-capacity-reducing) hours per staff member as of
    /// the same point in both years.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fetch fails.
    pub async fn hours_by_staff(
        &self,
        organization_id: OrganizationId,
        as_of: NaiveDate,
    ) -> Result<Vec<StaffTotalsRow>, ReportError> {
        let windows = ComparisonWindows::to_date(as_of);
        let (current, prior) = self
            .fetch_windows(
                organization_id,
                &windows,
                Some(RecordFilter::CapacityReducing(false)),
            )
            .await?;

        let totals = entity_totals(
            &current,
            &prior,
            EntityField::Staff,
            EntityOptions {
                fallback: None,
                exclude_disbursement: true,
            },
            TimeRecord::hours,
        );
        Ok(StaffTotalsRow::from_totals(finalize(
            totals,
            Precision::Cents,
            true,
        )))
    }

    // ========================================================================
    // Recoverability & WIP
    // ========================================================================

    /// Billed amounts per account manager as of the same point in both
    /// years. Rows without an account manager fold into "Uncategorized".
    ///
    /// # Errors
    ///
    /// Returns an error if any page fetch fails.
    pub async fn recoverability_by_account_manager(
        &self,
        organization_id: OrganizationId,
        as_of: NaiveDate,
    ) -> Result<Vec<AccountManagerTotalsRow>, ReportError> {
        let windows = ComparisonWindows::to_date(as_of);
        let (mut current, mut prior) =
            self.fetch_windows(organization_id, &windows, None).await?;
        current.retain(TimeRecord::is_billed);
        prior.retain(TimeRecord::is_billed);

        let totals = entity_totals(
            &current,
            &prior,
            EntityField::AccountManager,
            EntityOptions {
                fallback: Some(UNCATEGORIZED),
                exclude_disbursement: false,
            },
            TimeRecord::amount_value,
        );
        Ok(AccountManagerTotalsRow::from_totals(finalize(
            totals,
            Precision::Cents,
            false,
        )))
    }

    /// Aging summary over unbilled (work-in-progress) amounts.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fetch fails.
    pub async fn wip_aging(
        &self,
        organization_id: OrganizationId,
        today: NaiveDate,
    ) -> Result<AgingSummary, ReportError> {
        let mut rows = fetch_all(&self.source, organization_id, &FilterSet::new()).await?;
        rows.retain(|record| !record.is_billed());

        let totals = aging_totals(&rows, today, TimeRecord::amount_value);
        Ok(AgingSummary::from_totals(&totals))
    }

    // ========================================================================
    // Option lists
    // ========================================================================

    /// Distinct staff names for filter dropdowns (disbursement marker
    /// excluded).
    ///
    /// # Errors
    ///
    /// Returns an error if any page fetch fails.
    pub async fn staff_names(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<String>, ReportError> {
        let rows = fetch_all(&self.source, organization_id, &FilterSet::new()).await?;
        let mut names = distinct_values(&rows, EntityField::Staff);
        names.retain(|name| !is_disbursement(name));
        Ok(names)
    }

    /// Distinct account manager names for filter dropdowns.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fetch fails.
    pub async fn account_managers(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<String>, ReportError> {
        let rows = fetch_all(&self.source, organization_id, &FilterSet::new()).await?;
        Ok(distinct_values(&rows, EntityField::AccountManager))
    }

    /// Distinct client group names for filter dropdowns.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fetch fails.
    pub async fn client_groups(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<String>, ReportError> {
        let rows = fetch_all(&self.source, organization_id, &FilterSet::new()).await?;
        Ok(distinct_values(&rows, EntityField::ClientGroup))
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Fetches the current and prior windows concurrently and joins
    /// before aggregation. The two fetches address disjoint date ranges;
    /// pages within each stay strictly sequential.
    async fn fetch_windows(
        &self,
        organization_id: OrganizationId,
        windows: &ComparisonWindows,
        extra: Option<RecordFilter>,
    ) -> Result<(Vec<TimeRecord>, Vec<TimeRecord>), ReportError> {
        let mut current_filters =
            FilterSet::for_dates(windows.current.start, windows.current.end);
        let mut prior_filters = FilterSet::for_dates(windows.prior.start, windows.prior.end);
        if let Some(filter) = extra {
            current_filters = current_filters.with(filter.clone());
            prior_filters = prior_filters.with(filter);
        }

        let (current, prior) = tokio::try_join!(
            fetch_all(&self.source, organization_id, &current_filters),
            fetch_all(&self.source, organization_id, &prior_filters),
        )?;
        Ok((current, prior))
    }
}
