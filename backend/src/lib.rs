//! # Practitioner Directory Backend
//!
//! Query engine and REST API for a directory of medical practitioners.
//!
//! Callers send loosely typed listing parameters (specialty, minimum rating,
//! minimum experience, gender, consultation channel, sort key, page, page
//! size). The engine validates and normalizes them, turns them into a store
//! query plus a count, and returns one page of practitioners with pagination
//! metadata. A write path validates new practitioner records before
//! persisting them.
//!
//! ## Architecture
//!
//! - [`query`]: parameter normalization, query plans, listing execution and
//!   create-payload validation
//! - [`models`]: the practitioner record and its value types
//! - [`db`]: repository trait, in-memory and Postgres stores, factory,
//!   configuration and the service layer
//! - [`config`]: HTTP listener settings
//! - [`http`]: axum router, handlers and error mapping
//!
//! ## Example
//!
//! ```no_run
//! use practitioner_directory::db::{services, LocalRepository};
//! use practitioner_directory::query::RawParams;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = LocalRepository::new();
//! services::seed_practitioners(&repo, &services::sample_roster()).await?;
//!
//! let mut params = RawParams::new();
//! params.insert("sortBy".into(), "experience".into());
//! let page = services::list_practitioners(&repo, &params).await?;
//! assert_eq!(page.total, 10);
//! # Ok(())
//! # }
//! ```

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod models;
pub mod query;

#[cfg(feature = "http-server")]
pub mod http;
