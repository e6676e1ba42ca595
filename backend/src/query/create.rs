//! Create-path validation.
//!
//! [`validate_and_shape`] checks a raw JSON practitioner payload and turns it
//! into a [`NewPractitioner`] with its slug already derived. Nothing is
//! written here; persistence belongs to the store.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::error::{ValidationError, ValidationResult};
use super::filter::MAX_RATING;
use crate::models::{slugify, Availability, Gender, NewPractitioner};

/// Fields a create payload must carry, in reporting order.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "name",
    "specialty",
    "experience",
    "qualification",
    "gender",
    "consultationFee",
];

static NULL: Value = Value::Null;

fn field<'a>(obj: &'a Map<String, Value>, name: &str) -> &'a Value {
    obj.get(name).unwrap_or(&NULL)
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn required_string(obj: &Map<String, Value>, field: &str) -> ValidationResult<String> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        _ => Err(ValidationError::invalid(
            field,
            format!("{} must be a string", field),
        )),
    }
}

fn optional_string(obj: &Map<String, Value>, field: &str) -> ValidationResult<Option<String>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(_) => Err(ValidationError::invalid(
            field,
            format!("{} must be a string", field),
        )),
    }
}

/// Numbers may arrive as JSON numbers or numeric strings (HTML form posts).
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn non_negative_count(value: &Value, field: &str) -> ValidationResult<u32> {
    match as_number(value) {
        Some(n) if n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) => Ok(n as u32),
        _ => Err(ValidationError::invalid(
            field,
            format!("{} must be a non-negative integer", field),
        )),
    }
}

fn parse_gender(value: &Value) -> ValidationResult<Gender> {
    value
        .as_str()
        .and_then(|s| s.trim().parse::<Gender>().ok())
        .ok_or_else(|| ValidationError::invalid("gender", "gender must be Male, Female or Other"))
}

fn parse_languages(value: Option<&Value>) -> ValidationResult<Vec<String>> {
    let invalid = || ValidationError::invalid("languages", "languages must be a list of strings");
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
            .collect(),
        Some(_) => Err(invalid()),
    }
}

fn parse_availability(value: Option<&Value>) -> ValidationResult<Availability> {
    match value {
        None | Some(Value::Null) => Ok(Availability::default()),
        Some(v @ Value::Object(_)) => serde_json::from_value(v.clone()).map_err(|_| {
            ValidationError::invalid("availability", "availability flags must be booleans")
        }),
        Some(_) => Err(ValidationError::invalid(
            "availability",
            "availability must be an object",
        )),
    }
}

fn parse_slot(value: Option<&Value>) -> ValidationResult<Option<DateTime<Utc>>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| {
                ValidationError::invalid(
                    "nextAvailableSlot",
                    "nextAvailableSlot must be an RFC 3339 timestamp",
                )
            }),
        Some(_) => Err(ValidationError::invalid(
            "nextAvailableSlot",
            "nextAvailableSlot must be an RFC 3339 timestamp",
        )),
    }
}

/// Validate a raw create payload and shape it into a store-ready document.
///
/// All missing required fields are reported together. Once every required
/// field is present, type and range checks fail on the first bad field.
pub fn validate_and_shape(payload: &Value) -> ValidationResult<NewPractitioner> {
    let Some(obj) = payload.as_object() else {
        return Err(ValidationError::MissingFields {
            fields: REQUIRED_FIELDS.iter().map(|f| f.to_string()).collect(),
        });
    };

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| is_missing(obj.get(**field)))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields { fields: missing });
    }

    let name = required_string(obj, "name")?;
    let slug = slugify(&name);
    if slug.is_empty() {
        return Err(ValidationError::invalid(
            "name",
            "name must contain at least one letter or digit",
        ));
    }

    let specialty = required_string(obj, "specialty")?;
    let qualification = required_string(obj, "qualification")?;
    let experience = non_negative_count(field(obj, "experience"), "experience")?;
    let gender = parse_gender(field(obj, "gender"))?;

    let consultation_fee = match as_number(field(obj, "consultationFee")) {
        Some(fee) if fee >= 0.0 => fee,
        _ => {
            return Err(ValidationError::invalid(
                "consultationFee",
                "consultationFee must be a non-negative number",
            ))
        }
    };

    let rating = match obj.get("rating") {
        None | Some(Value::Null) => 0.0,
        Some(v) => match as_number(v) {
            Some(r) if (0.0..=MAX_RATING).contains(&r) => r,
            _ => return Err(ValidationError::invalid("rating", "rating out of range")),
        },
    };

    let review_count = match obj.get("reviewCount") {
        None | Some(Value::Null) => 0,
        Some(v) => non_negative_count(v, "reviewCount")?,
    };

    Ok(NewPractitioner {
        slug,
        name,
        specialty,
        experience,
        qualification,
        languages: parse_languages(obj.get("languages"))?,
        gender,
        consultation_fee,
        availability: parse_availability(obj.get("availability"))?,
        rating,
        review_count,
        location: optional_string(obj, "location")?,
        hospital: optional_string(obj, "hospital")?,
        image_url: optional_string(obj, "imageUrl")?,
        next_available_slot: parse_slot(obj.get("nextAvailableSlot"))?,
    })
}
