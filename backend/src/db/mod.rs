//! Storage layer for the practitioner directory.
//!
//! This module provides abstractions for store operations via the Repository
//! pattern, allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API)                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Parameter normalization + listing                    │
//! │  - Create validation, lookup, seeding                   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//!     │                                │
//! ┌───▼───────────────┐   ┌────────────▼────────────┐
//! │ Postgres (Diesel) │   │ Local Repository        │
//! │ r2d2 pool         │   │ (in-memory)             │
//! └───────────────────┘   └─────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! ```ignore
//! use practitioner_directory::db::{services, RepositoryFactory};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_env().await?;
//!     let page = services::list_practitioners(repo.as_ref(), &Default::default()).await?;
//!     Ok(())
//! }
//! ```
//!
//! There is no process-wide store: the caller builds one handle and passes
//! it wherever it is needed.

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod seed;
pub mod services;

// Postgres config is colocated with the repository implementation.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::{PoolStats, PostgresConfig};
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}

pub use services::{
    create_practitioner, get_practitioner, health_check, list_practitioners, sample_roster,
    seed_practitioners, ServiceError, ServiceResult,
};

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{ErrorContext, PractitionerRepository, RepositoryError, RepositoryResult};
