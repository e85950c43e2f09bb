//! Exhaustive offset-paged fetching.

use firmsight_core::filter::FilterSet;
use firmsight_core::record::TimeRecord;
use firmsight_shared::types::{OrganizationId, PageWindow};
use tracing::debug;

use crate::source::{SourceError, TableSource};

/// Maximum rows the source returns per call.
pub const PAGE_SIZE: u64 = 1000;

/// Fetches every row matching `filters` for the tenant.
///
/// Pages are requested strictly sequentially - each page's existence is
/// only known after observing the previous page's size. A short page
/// (fewer rows than the window, zero included) ends the walk.
///
/// # Errors
///
/// Any page failure aborts the whole fetch; no partial result is
/// returned.
pub async fn fetch_all<S>(
    source: &S,
    organization_id: OrganizationId,
    filters: &FilterSet,
) -> Result<Vec<TimeRecord>, SourceError>
where
    S: TableSource + ?Sized,
{
    let mut rows = Vec::new();
    let mut window = PageWindow::first(PAGE_SIZE);

    loop {
        let page = source.fetch_page(organization_id, filters, window).await?;
        let returned = page.len();
        debug!(offset = window.offset, returned, "fetched source page");

        rows.extend(page);
        if window.is_last_page(returned) {
            break;
        }
        window = window.next();
    }

    Ok(rows)
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
