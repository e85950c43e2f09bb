//! The tabular data-source collaborator contract.

use async_trait::async_trait;
use firmsight_core::filter::FilterSet;
use firmsight_core::record::TimeRecord;
use firmsight_shared::types::{OrganizationId, PageWindow};

/// Error types for source operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source rejected or failed a single page request.
    #[error("page fetch failed at offset {offset}: {message}")]
    PageFetch {
        /// Offset of the failed page.
        offset: u64,
        /// Message reported by the source.
        message: String,
    },

    /// The source could not be reached at all.
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// A remote tabular source of time/amount records.
///
/// Implementations apply the filter conjunction server-side, scope every
/// query to one tenant, and may return at most `page.limit` rows per
/// call. Fetching is read-only; no implementation is expected to retry.
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Returns one window of rows matching `filters` for the tenant.
    async fn fetch_page(
        &self,
        organization_id: OrganizationId,
        filters: &FilterSet,
        page: PageWindow,
    ) -> Result<Vec<TimeRecord>, SourceError>;
}
