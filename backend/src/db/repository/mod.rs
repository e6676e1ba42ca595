//! Repository trait for abstracting the practitioner document store.
//!
//! The listing engine only ever talks to the store through this trait, so a
//! Postgres pool and the in-memory store are interchangeable.

use async_trait::async_trait;

use crate::models::{NewPractitioner, Practitioner};
use crate::query::{PractitionerFilter, PractitionerQuery};

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Query, count and insert operations over the practitioner roster.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; one handle is shared by every
/// request.
///
/// # Timeouts
/// Implementations bound their own calls and report a
/// [`RepositoryError::TimeoutError`] instead of hanging the caller.
#[async_trait]
pub trait PractitionerRepository: Send + Sync {
    /// Check if the store answers.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Fetch the practitioners matching `query.filter`, ordered by
    /// `query.sort` and cut to `query.window`.
    ///
    /// Equal sort keys keep the store's native order; no secondary key is
    /// applied.
    async fn find(&self, query: &PractitionerQuery) -> RepositoryResult<Vec<Practitioner>>;

    /// Count every practitioner matching `filter`, ignoring any window.
    async fn count(&self, filter: &PractitionerFilter) -> RepositoryResult<u64>;

    /// Persist a new practitioner, assigning its id and timestamps.
    ///
    /// # Errors
    /// * [`RepositoryError::Conflict`] if the slug is already taken
    async fn insert(&self, practitioner: &NewPractitioner) -> RepositoryResult<Practitioner>;

    /// Look a practitioner up by slug.
    async fn find_by_slug(&self, slug: &str) -> RepositoryResult<Option<Practitioner>>;

    /// Delete every practitioner and insert `practitioners` in their place.
    ///
    /// Returns the number of documents inserted.
    async fn replace_all(&self, practitioners: &[NewPractitioner]) -> RepositoryResult<u64>;
}
