//! In-memory local repository implementation.
//!
//! Stores practitioners in insertion order behind a lock. Suitable for unit
//! tests and local development: fast, deterministic and isolated.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::db::repository::{
    ErrorContext, PractitionerRepository, RepositoryError, RepositoryResult,
};
use crate::models::{NewPractitioner, Practitioner, PractitionerId};
use crate::query::{PractitionerFilter, PractitionerQuery};

/// In-memory local repository.
///
/// Clones share the same underlying data.
///
/// # Example
/// ```ignore
/// use practitioner_directory::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// repo.set_healthy(false); // every call now fails with a connection error
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    /// Kept in insertion order; sorting is stable over it.
    practitioners: Vec<Practitioner>,
    next_id: i64,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            practitioners: Vec::new(),
            next_id: 1,
            is_healthy: true,
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing store failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data, keeping the health flag.
    pub fn clear(&self) {
        let mut data = self.data.write();
        let is_healthy = data.is_healthy;
        *data = LocalData {
            is_healthy,
            ..Default::default()
        };
    }

    pub fn len(&self) -> usize {
        self.data.read().practitioners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection_with_context(
                "Store is not healthy",
                ErrorContext::new(operation).with_entity("practitioner"),
            ));
        }
        Ok(())
    }

    fn insert_locked(data: &mut LocalData, doc: &NewPractitioner) -> RepositoryResult<Practitioner> {
        if data.practitioners.iter().any(|p| p.slug == doc.slug) {
            return Err(RepositoryError::conflict_with_context(
                format!("slug '{}' already exists", doc.slug),
                ErrorContext::new("insert")
                    .with_entity("practitioner")
                    .with_entity_id(&doc.slug),
            ));
        }

        let id = PractitionerId::new(data.next_id);
        data.next_id += 1;
        let practitioner = doc.clone().into_practitioner(id, Utc::now());
        data.practitioners.push(practitioner.clone());
        Ok(practitioner)
    }
}

#[async_trait]
impl PractitionerRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn find(&self, query: &PractitionerQuery) -> RepositoryResult<Vec<Practitioner>> {
        self.check_health("find")?;
        let data = self.data.read();

        let mut matching: Vec<&Practitioner> = data
            .practitioners
            .iter()
            .filter(|p| query.filter.matches(p))
            .collect();
        // `sort_by` is stable, so ties keep insertion order.
        matching.sort_by(|a, b| query.sort.compare(a, b));

        let skip = usize::try_from(query.window.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.window.limit).unwrap_or(usize::MAX);
        Ok(matching
            .into_iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &PractitionerFilter) -> RepositoryResult<u64> {
        self.check_health("count")?;
        let data = self.data.read();
        Ok(data.practitioners.iter().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn insert(&self, practitioner: &NewPractitioner) -> RepositoryResult<Practitioner> {
        self.check_health("insert")?;
        let mut data = self.data.write();
        Self::insert_locked(&mut data, practitioner)
    }

    async fn find_by_slug(&self, slug: &str) -> RepositoryResult<Option<Practitioner>> {
        self.check_health("find_by_slug")?;
        let data = self.data.read();
        Ok(data.practitioners.iter().find(|p| p.slug == slug).cloned())
    }

    async fn replace_all(&self, practitioners: &[NewPractitioner]) -> RepositoryResult<u64> {
        self.check_health("replace_all")?;
        let mut data = self.data.write();

        // Build the replacement first so a duplicate slug leaves the store untouched.
        let mut staged = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
        for doc in practitioners {
            Self::insert_locked(&mut staged, doc)?;
        }
        *data = staged;
        Ok(practitioners.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Availability, Gender};
    use crate::query::{Predicate, SortField, SortOrder, SortSpec, Window};

    fn doc(name: &str, rating: f64) -> NewPractitioner {
        NewPractitioner {
            slug: crate::models::slugify(name),
            name: name.to_string(),
            specialty: "Cardiology".to_string(),
            experience: 5,
            qualification: "MBBS".to_string(),
            languages: vec!["English".to_string()],
            gender: Gender::Male,
            consultation_fee: 500.0,
            availability: Availability::default(),
            rating,
            review_count: 0,
            location: None,
            hospital: None,
            image_url: None,
            next_available_slot: None,
        }
    }

    fn query(skip: u64, limit: u64) -> PractitionerQuery {
        PractitionerQuery {
            filter: PractitionerFilter::new(),
            sort: SortSpec {
                field: SortField::Rating,
                order: SortOrder::Descending,
            },
            window: Window { skip, limit },
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = LocalRepository::new();
        let a = repo.insert(&doc("Dr. A", 4.0)).await.unwrap();
        let b = repo.insert(&doc("Dr. B", 4.0)).await.unwrap();
        assert_eq!(a.id.value(), 1);
        assert_eq!(b.id.value(), 2);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_slug_conflicts() {
        let repo = LocalRepository::new();
        repo.insert(&doc("Dr. A", 4.0)).await.unwrap();
        let err = repo.insert(&doc("Dr A", 3.0)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { .. }));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_find_sorts_stably_and_windows() {
        let repo = LocalRepository::new();
        for (name, rating) in [("Dr. A", 4.0), ("Dr. B", 5.0), ("Dr. C", 4.0), ("Dr. D", 3.0)] {
            repo.insert(&doc(name, rating)).await.unwrap();
        }

        let names: Vec<String> = repo
            .find(&query(0, 10))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Dr. B", "Dr. A", "Dr. C", "Dr. D"]);

        let page = repo.find(&query(1, 2)).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name, "Dr. A");
        assert!(repo.find(&query(10, 2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_count_ignores_window() {
        let repo = LocalRepository::new();
        for i in 0..7 {
            repo.insert(&doc(&format!("Dr. {}", i), 4.0 + f64::from(i) / 10.0))
                .await
                .unwrap();
        }
        let filter = PractitionerFilter::new().and(Predicate::RatingAtLeast(4.25));
        assert_eq!(repo.count(&filter).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_unhealthy_store_fails_calls() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
        let err = repo.find(&query(0, 10)).await.unwrap_err();
        assert!(err.is_unavailable());
        assert!(repo.insert(&doc("Dr. A", 4.0)).await.is_err());
    }

    #[tokio::test]
    async fn test_find_by_slug() {
        let repo = LocalRepository::new();
        repo.insert(&doc("Dr. Meera Joshi", 4.6)).await.unwrap();
        let found = repo.find_by_slug("dr-meera-joshi").await.unwrap();
        assert_eq!(found.map(|p| p.name), Some("Dr. Meera Joshi".to_string()));
        assert!(repo.find_by_slug("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_all_is_all_or_nothing() {
        let repo = LocalRepository::new();
        repo.insert(&doc("Dr. Old", 4.0)).await.unwrap();

        let err = repo
            .replace_all(&[doc("Dr. X", 4.0), doc("Dr. X", 3.0)])
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { .. }));
        assert!(repo.find_by_slug("dr-old").await.unwrap().is_some());

        let inserted = repo
            .replace_all(&[doc("Dr. New", 4.0), doc("Dr. Newer", 4.5)])
            .await
            .unwrap();
        assert_eq!(inserted, 2);
        assert_eq!(repo.len(), 2);
        assert!(repo.find_by_slug("dr-old").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_keeps_health_flag() {
        let repo = LocalRepository::new();
        repo.insert(&doc("Dr. A", 4.0)).await.unwrap();
        repo.set_healthy(false);
        repo.clear();
        assert!(repo.is_empty());
        assert!(!repo.health_check().await.unwrap());
    }
}
