use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

use super::schema::practitioners;
use crate::db::repository::{RepositoryError, RepositoryResult};
use crate::models::{Availability, NewPractitioner, Practitioner, PractitionerId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = practitioners)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PractitionerRow {
    pub practitioner_id: i64,
    pub slug: String,
    pub name: String,
    pub specialty: String,
    pub experience_years: i32,
    pub qualification: String,
    pub languages_json: Value,
    pub gender: String,
    pub consultation_fee: f64,
    pub available_online: bool,
    pub available_clinic: bool,
    pub available_hospital: bool,
    pub rating: f64,
    pub review_count: i32,
    pub location: Option<String>,
    pub hospital: Option<String>,
    pub image_url: Option<String>,
    pub next_available_slot: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = practitioners)]
pub struct NewPractitionerRow {
    pub slug: String,
    pub name: String,
    pub specialty: String,
    pub experience_years: i32,
    pub qualification: String,
    pub languages_json: Value,
    pub gender: String,
    pub consultation_fee: f64,
    pub available_online: bool,
    pub available_clinic: bool,
    pub available_hospital: bool,
    pub rating: f64,
    pub review_count: i32,
    pub location: Option<String>,
    pub hospital: Option<String>,
    pub image_url: Option<String>,
    pub next_available_slot: Option<DateTime<Utc>>,
}

fn to_i32(value: u32, field: &str) -> RepositoryResult<i32> {
    i32::try_from(value)
        .map_err(|_| RepositoryError::internal(format!("{} out of range: {}", field, value)))
}

fn to_u32(value: i32, field: &str) -> RepositoryResult<u32> {
    u32::try_from(value)
        .map_err(|_| RepositoryError::internal(format!("negative {} in row: {}", field, value)))
}

impl NewPractitionerRow {
    pub fn from_domain(doc: &NewPractitioner) -> RepositoryResult<Self> {
        Ok(Self {
            slug: doc.slug.clone(),
            name: doc.name.clone(),
            specialty: doc.specialty.clone(),
            experience_years: to_i32(doc.experience, "experience")?,
            qualification: doc.qualification.clone(),
            languages_json: Value::from(doc.languages.clone()),
            gender: doc.gender.as_str().to_string(),
            consultation_fee: doc.consultation_fee,
            available_online: doc.availability.online,
            available_clinic: doc.availability.clinic,
            available_hospital: doc.availability.hospital,
            rating: doc.rating,
            review_count: to_i32(doc.review_count, "review_count")?,
            location: doc.location.clone(),
            hospital: doc.hospital.clone(),
            image_url: doc.image_url.clone(),
            next_available_slot: doc.next_available_slot,
        })
    }
}

impl TryFrom<PractitionerRow> for Practitioner {
    type Error = RepositoryError;

    fn try_from(row: PractitionerRow) -> RepositoryResult<Self> {
        let languages: Vec<String> = serde_json::from_value(row.languages_json).map_err(|e| {
            RepositoryError::internal(format!("Failed to parse languages JSON: {e}"))
        })?;
        let gender = row
            .gender
            .parse()
            .map_err(|e: String| RepositoryError::internal(e))?;

        Ok(Practitioner {
            id: PractitionerId::new(row.practitioner_id),
            slug: row.slug,
            name: row.name,
            specialty: row.specialty,
            experience: to_u32(row.experience_years, "experience_years")?,
            qualification: row.qualification,
            languages,
            gender,
            consultation_fee: row.consultation_fee,
            availability: Availability {
                online: row.available_online,
                clinic: row.available_clinic,
                hospital: row.available_hospital,
            },
            rating: row.rating,
            review_count: to_u32(row.review_count, "review_count")?,
            location: row.location,
            hospital: row.hospital,
            image_url: row.image_url,
            next_available_slot: row.next_available_slot,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
