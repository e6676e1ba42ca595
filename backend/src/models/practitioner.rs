//! Practitioner domain types.
//!
//! A [`Practitioner`] is the persisted roster entry returned by the store.
//! A [`NewPractitioner`] is the store-ready document produced by the create
//! path before the store assigns an identifier and timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned practitioner identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PractitionerId(pub i64);

impl PractitionerId {
    pub fn new(value: i64) -> Self {
        PractitionerId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PractitionerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PractitionerId {
    fn from(v: i64) -> Self {
        PractitionerId(v)
    }
}

/// Gender recorded on a practitioner profile.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

/// Consultation channel a practitioner can be booked through.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityChannel {
    Online,
    Clinic,
    Hospital,
}

impl AvailabilityChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityChannel::Online => "online",
            AvailabilityChannel::Clinic => "clinic",
            AvailabilityChannel::Hospital => "hospital",
        }
    }
}

impl FromStr for AvailabilityChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(AvailabilityChannel::Online),
            "clinic" => Ok(AvailabilityChannel::Clinic),
            "hospital" => Ok(AvailabilityChannel::Hospital),
            _ => Err(format!("Unknown availability type: {}", s)),
        }
    }
}

/// Independent availability flags, one per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub clinic: bool,
    #[serde(default)]
    pub hospital: bool,
}

impl Availability {
    pub fn supports(&self, channel: AvailabilityChannel) -> bool {
        match channel {
            AvailabilityChannel::Online => self.online,
            AvailabilityChannel::Clinic => self.clinic,
            AvailabilityChannel::Hospital => self.hospital,
        }
    }
}

/// A practitioner as persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Practitioner {
    pub id: PractitionerId,
    pub slug: String,
    pub name: String,
    pub specialty: String,
    pub experience: u32,
    pub qualification: String,
    #[serde(default)]
    pub languages: Vec<String>,
    pub gender: Gender,
    pub consultation_fee: f64,
    #[serde(default)]
    pub availability: Availability,
    pub rating: f64,
    pub review_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_available_slot: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated practitioner document ready to be inserted.
///
/// The slug is fixed here and is never recomputed by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPractitioner {
    pub slug: String,
    pub name: String,
    pub specialty: String,
    pub experience: u32,
    pub qualification: String,
    pub languages: Vec<String>,
    pub gender: Gender,
    pub consultation_fee: f64,
    pub availability: Availability,
    pub rating: f64,
    pub review_count: u32,
    pub location: Option<String>,
    pub hospital: Option<String>,
    pub image_url: Option<String>,
    pub next_available_slot: Option<DateTime<Utc>>,
}

impl NewPractitioner {
    /// Attach the store-assigned identity, producing the persisted record.
    pub fn into_practitioner(self, id: PractitionerId, now: DateTime<Utc>) -> Practitioner {
        Practitioner {
            id,
            slug: self.slug,
            name: self.name,
            specialty: self.specialty,
            experience: self.experience,
            qualification: self.qualification,
            languages: self.languages,
            gender: self.gender,
            consultation_fee: self.consultation_fee,
            availability: self.availability,
            rating: self.rating,
            review_count: self.review_count,
            location: self.location,
            hospital: self.hospital,
            image_url: self.image_url,
            next_available_slot: self.next_available_slot,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Derive a URL-safe slug from a display name.
///
/// Lower-cases the name, strips everything except ASCII word characters and
/// spaces, then joins the remaining words with single hyphens.
pub fn slugify(name: &str) -> String {
    let kept: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == ' ')
        .collect();

    kept.split(' ')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
