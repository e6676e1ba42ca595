//! Query execution and result envelope assembly.

use serde::Serialize;

use super::filter::FilterSpec;
use crate::db::repository::{PractitionerRepository, RepositoryResult};
use crate::models::Practitioner;

/// One page of a listing plus the metadata needed to render pagination.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    pub items: Vec<Practitioner>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl ResultEnvelope {
    pub fn new(items: Vec<Practitioner>, total: u64, page: u32, page_size: u32) -> Self {
        Self {
            items,
            total,
            page,
            page_size,
            total_pages: total_pages(total, page_size),
        }
    }
}

/// `ceil(total / page_size)`; zero when nothing matched.
pub fn total_pages(total: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(page_size))
}

/// Run a normalized listing against the store.
///
/// The page fetch and the count share one predicate snapshot and are issued
/// concurrently. They are still two store calls, so a concurrent writer can
/// make `total` and the page disagree momentarily.
pub async fn execute<R>(spec: &FilterSpec, repo: &R) -> RepositoryResult<ResultEnvelope>
where
    R: PractitionerRepository + ?Sized,
{
    let query = spec.to_query();
    let (items, total) = tokio::try_join!(repo.find(&query), repo.count(&query.filter))?;

    Ok(ResultEnvelope::new(items, total, spec.page, spec.limit))
}
