//! Store-facing query description.
//!
//! A [`PractitionerQuery`] is what the executor hands to a repository: a
//! conjunction of predicates, one sort key and a skip/limit window. Stores
//! translate it into their own dialect (SQL clauses, in-memory filtering);
//! nothing here knows about a concrete backend.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::{AvailabilityChannel, Practitioner};

/// Field a listing can be ordered by.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Rating,
    Experience,
    /// Consultation fee.
    Price,
    Name,
}

impl SortField {
    /// Parse a `sortBy` value; `None` for anything unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rating" => Some(Self::Rating),
            "experience" => Some(Self::Experience),
            "price" | "consultationFee" => Some(Self::Price),
            "name" => Some(Self::Name),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Experience => "experience",
            Self::Price => "price",
            Self::Name => "name",
        }
    }

    /// Compare two practitioners on this field, ascending.
    pub fn compare(&self, a: &Practitioner, b: &Practitioner) -> Ordering {
        match self {
            Self::Rating => a.rating.total_cmp(&b.rating),
            Self::Experience => a.experience.cmp(&b.experience),
            Self::Price => a.consultation_fee.total_cmp(&b.consultation_fee),
            Self::Name => a.name.cmp(&b.name),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// `"asc"` is ascending; everything else, including absence, is descending.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("asc") => Self::Ascending,
            _ => Self::Descending,
        }
    }
}

/// Single conjunct of a listing filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    SpecialtyEquals(String),
    RatingAtLeast(f64),
    ExperienceAtLeast(f64),
    GenderEquals(String),
    AvailableVia(AvailabilityChannel),
}

impl Predicate {
    pub fn matches(&self, practitioner: &Practitioner) -> bool {
        match self {
            Self::SpecialtyEquals(specialty) => practitioner.specialty == *specialty,
            Self::RatingAtLeast(min) => practitioner.rating >= *min,
            Self::ExperienceAtLeast(min) => f64::from(practitioner.experience) >= *min,
            Self::GenderEquals(gender) => practitioner.gender.as_str() == gender,
            Self::AvailableVia(channel) => practitioner.availability.supports(*channel),
        }
    }
}

/// Conjunction of predicates. An empty filter matches every practitioner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PractitionerFilter {
    predicates: Vec<Predicate>,
}

impl PractitionerFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn matches(&self, practitioner: &Practitioner) -> bool {
        self.predicates.iter().all(|p| p.matches(practitioner))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn compare(&self, a: &Practitioner, b: &Practitioner) -> Ordering {
        let ordering = self.field.compare(a, b);
        match self.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Skip/limit window over the sorted result.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Window {
    pub skip: u64,
    pub limit: u64,
}

/// Everything a store needs to fetch one page of practitioners.
#[derive(Debug, Clone, PartialEq)]
pub struct PractitionerQuery {
    pub filter: PractitionerFilter,
    pub sort: SortSpec,
    pub window: Window,
}
