//! High-level directory service layer.
//!
//! Repository-agnostic operations that combine the query engine with a store
//! handle. The HTTP handlers call these; so can any other front end.
//!
//! # Usage
//!
//! ```no_run
//! use practitioner_directory::db::{repositories::LocalRepository, services};
//! use practitioner_directory::query::RawParams;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     services::seed_practitioners(&repo, &services::sample_roster()).await?;
//!
//!     let page = services::list_practitioners(&repo, &RawParams::new()).await?;
//!     println!("{} of {} practitioners", page.items.len(), page.total);
//!     Ok(())
//! }
//! ```

use log::{debug, info};
use serde_json::Value;

use super::repository::{ErrorContext, PractitionerRepository, RepositoryError, RepositoryResult};
use crate::models::{NewPractitioner, Practitioner};
use crate::query::{self, RawParams, ResultEnvelope, ValidationError};

pub use super::seed::{sample_roster, sample_roster_at};

/// Failure of a directory operation.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

// ==================== Health ====================

/// Check whether the store answers.
pub async fn health_check<R>(repo: &R) -> RepositoryResult<bool>
where
    R: PractitionerRepository + ?Sized,
{
    repo.health_check().await
}

// ==================== Read path ====================

/// Validate raw listing parameters and run the listing.
pub async fn list_practitioners<R>(repo: &R, raw: &RawParams) -> ServiceResult<ResultEnvelope>
where
    R: PractitionerRepository + ?Sized,
{
    let spec = query::normalize(raw)?;
    debug!(
        "listing {} (page {}, limit {})",
        spec.specialty, spec.page, spec.limit
    );
    Ok(query::execute(&spec, repo).await?)
}

/// Fetch one practitioner by slug.
///
/// # Errors
/// * [`RepositoryError::NotFound`] when no practitioner has that slug
pub async fn get_practitioner<R>(repo: &R, slug: &str) -> ServiceResult<Practitioner>
where
    R: PractitionerRepository + ?Sized,
{
    repo.find_by_slug(slug).await?.ok_or_else(|| {
        RepositoryError::not_found_with_context(
            format!("Practitioner '{}' not found", slug),
            ErrorContext::new("get_practitioner")
                .with_entity("practitioner")
                .with_entity_id(slug),
        )
        .into()
    })
}

// ==================== Write path ====================

/// Validate a create payload and persist it.
pub async fn create_practitioner<R>(repo: &R, payload: &Value) -> ServiceResult<Practitioner>
where
    R: PractitionerRepository + ?Sized,
{
    let doc = query::validate_and_shape(payload)?;
    let created = repo.insert(&doc).await?;
    info!("Created practitioner {} ({})", created.slug, created.id);
    Ok(created)
}

/// Replace the whole roster with `practitioners`.
///
/// Returns the number of practitioners inserted.
pub async fn seed_practitioners<R>(repo: &R, practitioners: &[NewPractitioner]) -> RepositoryResult<u64>
where
    R: PractitionerRepository + ?Sized,
{
    let inserted = repo.replace_all(practitioners).await?;
    info!("Seeded {} practitioner(s)", inserted);
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::query::DEFAULT_SPECIALTY;
    use serde_json::json;

    fn raw(pairs: &[(&str, &str)]) -> RawParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_list_defaults_to_general_physicians_by_rating() {
        let repo = LocalRepository::new();
        seed_practitioners(&repo, &sample_roster()).await.unwrap();

        let page = list_practitioners(&repo, &RawParams::new()).await.unwrap();
        assert_eq!(page.total, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.iter().all(|p| p.specialty == DEFAULT_SPECIALTY));
        assert!(page
            .items
            .windows(2)
            .all(|w| w[0].rating >= w[1].rating));
    }

    #[tokio::test]
    async fn test_list_rejects_before_touching_store() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);
        let err = list_practitioners(&repo, &raw(&[("limit", "0")]))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_surfaces_store_failure() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);
        let err = list_practitioners(&repo, &RawParams::new())
            .await
            .unwrap_err();
        match err {
            ServiceError::Repository(e) => assert!(e.is_unavailable()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_by_slug() {
        let repo = LocalRepository::new();
        let payload = json!({
            "name": "Dr. Asha Menon",
            "specialty": "Dermatology",
            "experience": 7,
            "qualification": "MBBS, MD",
            "gender": "Female",
            "consultationFee": 650,
        });

        let created = create_practitioner(&repo, &payload).await.unwrap();
        assert_eq!(created.slug, "dr-asha-menon");

        let fetched = get_practitioner(&repo, "dr-asha-menon").await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_duplicate_is_conflict() {
        let repo = LocalRepository::new();
        let payload = json!({
            "name": "Dr. Asha Menon",
            "specialty": "Dermatology",
            "experience": 7,
            "qualification": "MBBS",
            "gender": "Female",
            "consultationFee": 650,
        });
        create_practitioner(&repo, &payload).await.unwrap();
        let err = create_practitioner(&repo, &payload).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Repository(RepositoryError::Conflict { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_invalid_payload_is_validation_error() {
        let repo = LocalRepository::new();
        let err = create_practitioner(&repo, &json!({ "name": "Dr. X" }))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::MissingFields { .. })
        ));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_slug_is_not_found() {
        let repo = LocalRepository::new();
        let err = get_practitioner(&repo, "dr-nobody").await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Repository(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_seed_replaces_existing_roster() {
        let repo = LocalRepository::new();
        seed_practitioners(&repo, &sample_roster()).await.unwrap();
        let inserted = seed_practitioners(&repo, &sample_roster()).await.unwrap();
        assert_eq!(inserted, 10);
        assert_eq!(repo.len(), 10);
        assert!(health_check(&repo).await.unwrap());
    }
}
