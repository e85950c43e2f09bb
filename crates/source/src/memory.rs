//! In-memory tabular source.
//!
//! Backs uploaded CSV snapshots and tests. Rows are keyed by tenant;
//! queries never cross tenants.

use std::collections::HashMap;

use async_trait::async_trait;
use firmsight_core::filter::FilterSet;
use firmsight_core::record::TimeRecord;
use firmsight_shared::types::{OrganizationId, PageWindow};

use crate::source::{SourceError, TableSource};

/// Tenant-keyed in-memory row store implementing [`TableSource`].
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: HashMap<OrganizationId, Vec<TimeRecord>>,
}

impl MemorySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source holding one tenant's rows.
    #[must_use]
    pub fn with_rows(organization_id: OrganizationId, rows: Vec<TimeRecord>) -> Self {
        let mut source = Self::new();
        source.insert(organization_id, rows);
        source
    }

    /// Appends rows for a tenant.
    pub fn insert(&mut self, organization_id: OrganizationId, rows: Vec<TimeRecord>) {
        self.rows.entry(organization_id).or_default().extend(rows);
    }

    /// Number of rows stored for a tenant.
    #[must_use]
    pub fn len(&self, organization_id: OrganizationId) -> usize {
        self.rows.get(&organization_id).map_or(0, Vec::len)
    }

    /// Returns true if the tenant has no rows.
    #[must_use]
    pub fn is_empty(&self, organization_id: OrganizationId) -> bool {
        self.len(organization_id) == 0
    }
}

#[async_trait]
impl TableSource for MemorySource {
    async fn fetch_page(
        &self,
        organization_id: OrganizationId,
        filters: &FilterSet,
        page: PageWindow,
    ) -> Result<Vec<TimeRecord>, SourceError> {
        let offset = usize::try_from(page.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);

        Ok(self
            .rows
            .get(&organization_id)
            .into_iter()
            .flatten()
            .filter(|record| filters.matches(record))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}
