//! Practitioner listing engine.
//!
//! ```text
//! raw params ─► filter::normalize ─► FilterSpec ─► executor::execute ─► ResultEnvelope
//! raw payload ─► create::validate_and_shape ─► NewPractitioner ─► store insert
//! ```
//!
//! The engine holds no state between calls and never opens store connections;
//! the repository is always passed in.

pub mod create;
pub mod error;
pub mod executor;
pub mod filter;
pub mod plan;

pub use create::{validate_and_shape, REQUIRED_FIELDS};
pub use error::{ValidationError, ValidationResult};
pub use executor::{execute, total_pages, ResultEnvelope};
pub use filter::{normalize, FilterSpec, RawParams, DEFAULT_SPECIALTY};
pub use plan::{
    Predicate, PractitionerFilter, PractitionerQuery, SortField, SortOrder, SortSpec, Window,
};
