//! Built-in sample roster used to populate an empty directory.

use chrono::{DateTime, Duration, Utc};

use crate::models::{slugify, Availability, Gender, NewPractitioner};
use crate::query::DEFAULT_SPECIALTY;

struct SeedEntry {
    name: &'static str,
    experience: u32,
    qualification: &'static str,
    languages: [&'static str; 3],
    gender: Gender,
    fee: f64,
    /// online, clinic, hospital
    channels: (bool, bool, bool),
    rating: f64,
    reviews: u32,
    image: &'static str,
    location: &'static str,
    hospital: &'static str,
}

const ROSTER: [SeedEntry; 10] = [
    SeedEntry {
        name: "Dr. Rajesh Kumar",
        experience: 15,
        qualification: "MBBS, MD (Internal Medicine)",
        languages: ["English", "Hindi", "Tamil"],
        gender: Gender::Male,
        fee: 800.0,
        channels: (true, true, false),
        rating: 4.8,
        reviews: 245,
        image: "/images/doctors/male-doctor-1.jpg",
        location: "Chennai",
        hospital: "Apollo Hospitals",
    },
    SeedEntry {
        name: "Dr. Priya Sharma",
        experience: 12,
        qualification: "MBBS, DNB (Family Medicine)",
        languages: ["English", "Hindi", "Bengali"],
        gender: Gender::Female,
        fee: 700.0,
        channels: (true, true, true),
        rating: 4.7,
        reviews: 189,
        image: "/images/doctors/female-doctor-1.jpg",
        location: "Delhi",
        hospital: "Apollo Clinic",
    },
    SeedEntry {
        name: "Dr. Suresh Patel",
        experience: 20,
        qualification: "MBBS, MD (Internal Medicine), DM (Cardiology)",
        languages: ["English", "Gujarati", "Hindi"],
        gender: Gender::Male,
        fee: 1200.0,
        channels: (true, false, true),
        rating: 4.9,
        reviews: 312,
        image: "/images/doctors/male-doctor-3.png",
        location: "Mumbai",
        hospital: "Apollo Spectra",
    },
    SeedEntry {
        name: "Dr. Ananya Reddy",
        experience: 8,
        qualification: "MBBS, MD (General Medicine)",
        languages: ["English", "Telugu", "Tamil"],
        gender: Gender::Female,
        fee: 600.0,
        channels: (true, true, false),
        rating: 4.5,
        reviews: 156,
        image: "/images/doctors/female-doctor-2.jpg",
        location: "Hyderabad",
        hospital: "Apollo Health City",
    },
    SeedEntry {
        name: "Dr. Vikram Singh",
        experience: 18,
        qualification: "MBBS, MD (Internal Medicine), FRCP",
        languages: ["English", "Hindi", "Punjabi"],
        gender: Gender::Male,
        fee: 1000.0,
        channels: (true, true, true),
        rating: 4.8,
        reviews: 278,
        image: "/images/doctors/male-doctor-2.png",
        location: "Bangalore",
        hospital: "Apollo Hospitals",
    },
    SeedEntry {
        name: "Dr. Meera Joshi",
        experience: 10,
        qualification: "MBBS, DNB (Family Medicine)",
        languages: ["English", "Marathi", "Hindi"],
        gender: Gender::Female,
        fee: 750.0,
        channels: (true, false, false),
        rating: 4.6,
        reviews: 142,
        image: "/images/doctors/female-doctor-3.png",
        location: "Pune",
        hospital: "Apollo Clinic",
    },
    SeedEntry {
        name: "Dr. Arjun Nair",
        experience: 14,
        qualification: "MBBS, MD (Internal Medicine)",
        languages: ["English", "Malayalam", "Tamil"],
        gender: Gender::Male,
        fee: 850.0,
        channels: (true, true, false),
        rating: 4.7,
        reviews: 198,
        image: "/images/doctors/male-doctor-4.jpg",
        location: "Kochi",
        hospital: "Apollo Adlux",
    },
    SeedEntry {
        name: "Dr. Kavita Desai",
        experience: 16,
        qualification: "MBBS, MD (General Medicine), MRCP",
        languages: ["English", "Gujarati", "Hindi"],
        gender: Gender::Female,
        fee: 900.0,
        channels: (true, true, true),
        rating: 4.8,
        reviews: 231,
        image: "/images/doctors/female-doctor-4.jpg",
        location: "Ahmedabad",
        hospital: "Apollo Hospitals",
    },
    SeedEntry {
        name: "Dr. Rahul Verma",
        experience: 9,
        qualification: "MBBS, DNB (General Medicine)",
        languages: ["English", "Hindi", "Punjabi"],
        gender: Gender::Male,
        fee: 650.0,
        channels: (true, false, true),
        rating: 4.5,
        reviews: 124,
        image: "/images/doctors/male-doctor-5.jpeg",
        location: "Chandigarh",
        hospital: "Apollo Spectra",
    },
    SeedEntry {
        name: "Dr. Lakshmi Rao",
        experience: 22,
        qualification: "MBBS, MD (Internal Medicine), DM (Endocrinology)",
        languages: ["English", "Telugu", "Kannada"],
        gender: Gender::Female,
        fee: 1100.0,
        channels: (true, true, true),
        rating: 4.9,
        reviews: 287,
        image: "/images/doctors/female-doctor-5.jpg",
        location: "Hyderabad",
        hospital: "Apollo Health City",
    },
];

/// The sample roster, with the n-th practitioner's next slot `n` hours
/// after `now`.
pub fn sample_roster_at(now: DateTime<Utc>) -> Vec<NewPractitioner> {
    ROSTER
        .iter()
        .zip(1i64..)
        .map(|(entry, hours)| {
            let (online, clinic, hospital) = entry.channels;
            NewPractitioner {
                slug: slugify(entry.name),
                name: entry.name.to_string(),
                specialty: DEFAULT_SPECIALTY.to_string(),
                experience: entry.experience,
                qualification: entry.qualification.to_string(),
                languages: entry.languages.iter().map(|l| l.to_string()).collect(),
                gender: entry.gender,
                consultation_fee: entry.fee,
                availability: Availability {
                    online,
                    clinic,
                    hospital,
                },
                rating: entry.rating,
                review_count: entry.reviews,
                location: Some(entry.location.to_string()),
                hospital: Some(entry.hospital.to_string()),
                image_url: Some(entry.image.to_string()),
                next_available_slot: Some(now + Duration::hours(hours)),
            }
        })
        .collect()
}

/// The sample roster relative to the current time.
pub fn sample_roster() -> Vec<NewPractitioner> {
    sample_roster_at(Utc::now())
}
