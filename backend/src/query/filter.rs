//! Filter normalization.
//!
//! Turns the raw string parameters of a listing request into a bounded
//! [`FilterSpec`]. Checks run in a fixed order and stop at the first failure.
//! Blank values count as absent.

use std::collections::HashMap;

use super::error::{ValidationError, ValidationResult};
use super::plan::{
    Predicate, PractitionerFilter, PractitionerQuery, SortField, SortOrder, SortSpec, Window,
};
use crate::models::AvailabilityChannel;

/// Specialty listed when the caller does not ask for one.
pub const DEFAULT_SPECIALTY: &str = "General Physician & Internal Medicine";
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;
pub const MAX_RATING: f64 = 5.0;

/// Raw query parameters as received from the HTTP layer.
pub type RawParams = HashMap<String, String>;

/// Validated listing constraints plus pagination and sort directives.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub specialty: String,
    pub min_rating: Option<f64>,
    pub min_experience: Option<f64>,
    pub gender: Option<String>,
    pub availability: Option<AvailabilityChannel>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    /// 1-based page number.
    pub page: u32,
    /// Page size, within `1..=MAX_LIMIT`.
    pub limit: u32,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            specialty: DEFAULT_SPECIALTY.to_string(),
            min_rating: None,
            min_experience: None,
            gender: None,
            availability: None,
            sort_by: SortField::Rating,
            sort_order: SortOrder::Descending,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl FilterSpec {
    /// Number of rows to skip before the requested page.
    pub fn skip(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Predicate set for this spec. Only supplied filters contribute a predicate.
    pub fn filter(&self) -> PractitionerFilter {
        let mut filter =
            PractitionerFilter::new().and(Predicate::SpecialtyEquals(self.specialty.clone()));
        if let Some(rating) = self.min_rating {
            filter = filter.and(Predicate::RatingAtLeast(rating));
        }
        if let Some(experience) = self.min_experience {
            filter = filter.and(Predicate::ExperienceAtLeast(experience));
        }
        if let Some(gender) = &self.gender {
            filter = filter.and(Predicate::GenderEquals(gender.clone()));
        }
        if let Some(channel) = self.availability {
            filter = filter.and(Predicate::AvailableVia(channel));
        }
        filter
    }

    /// Full store query: predicates, sort key and page window.
    pub fn to_query(&self) -> PractitionerQuery {
        PractitionerQuery {
            filter: self.filter(),
            sort: SortSpec {
                field: self.sort_by,
                order: self.sort_order,
            },
            window: Window {
                skip: self.skip(),
                limit: u64::from(self.limit),
            },
        }
    }
}

fn param<'a>(raw: &'a RawParams, key: &str) -> Option<&'a str> {
    raw.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_rating(value: &str) -> ValidationResult<f64> {
    match value.parse::<f64>() {
        Ok(rating) if (0.0..=MAX_RATING).contains(&rating) => Ok(rating),
        _ => Err(ValidationError::invalid("rating", "rating out of range")),
    }
}

fn parse_experience(value: &str) -> ValidationResult<f64> {
    match value.parse::<f64>() {
        Ok(years) if years.is_finite() && years >= 0.0 => Ok(years),
        _ => Err(ValidationError::invalid(
            "experience",
            "experience must be non-negative",
        )),
    }
}

fn parse_availability(value: &str) -> ValidationResult<AvailabilityChannel> {
    value
        .parse()
        .map_err(|_| ValidationError::invalid("availability", "invalid availability type"))
}

fn parse_page(value: &str) -> ValidationResult<u32> {
    match value.parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(ValidationError::invalid(
            "page",
            "page must be a positive number",
        )),
    }
}

fn parse_limit(value: &str) -> ValidationResult<u32> {
    match value.parse::<u32>() {
        Ok(limit) if (1..=MAX_LIMIT).contains(&limit) => Ok(limit),
        _ => Err(ValidationError::invalid("limit", "limit must be between 1-100")),
    }
}

/// Validate and canonicalize raw listing parameters.
///
/// Recognized keys: `specialty`, `rating`, `experience`, `availability`,
/// `gender`, `page`, `limit`, `sortBy`, `sortOrder`. Unknown keys are ignored.
/// An unrecognized `sortBy` falls back to rating so arbitrary field names
/// never reach the store.
pub fn normalize(raw: &RawParams) -> ValidationResult<FilterSpec> {
    let min_rating = param(raw, "rating").map(parse_rating).transpose()?;
    let min_experience = param(raw, "experience").map(parse_experience).transpose()?;
    let availability = param(raw, "availability")
        .map(parse_availability)
        .transpose()?;
    let gender = param(raw, "gender").map(str::to_string);
    let page = param(raw, "page")
        .map(parse_page)
        .transpose()?
        .unwrap_or(DEFAULT_PAGE);
    let limit = param(raw, "limit")
        .map(parse_limit)
        .transpose()?
        .unwrap_or(DEFAULT_LIMIT);
    let sort_by = param(raw, "sortBy")
        .and_then(SortField::parse)
        .unwrap_or(SortField::Rating);
    let sort_order = SortOrder::parse(param(raw, "sortOrder"));
    let specialty = param(raw, "specialty")
        .unwrap_or(DEFAULT_SPECIALTY)
        .to_string();

    Ok(FilterSpec {
        specialty,
        min_rating,
        min_experience,
        gender,
        availability,
        sort_by,
        sort_order,
        page,
        limit,
    })
}
