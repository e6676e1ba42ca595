#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use practitioner_directory::models::{slugify, Availability, Gender, NewPractitioner};
use practitioner_directory::query::RawParams;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Query-string style parameters.
pub fn params(pairs: &[(&str, &str)]) -> RawParams {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A practitioner with the fields the listing engine looks at.
pub fn practitioner(name: &str, specialty: &str, rating: f64, experience: u32) -> NewPractitioner {
    NewPractitioner {
        slug: slugify(name),
        name: name.to_string(),
        specialty: specialty.to_string(),
        experience,
        qualification: "MBBS".to_string(),
        languages: vec!["English".to_string()],
        gender: if experience % 2 == 0 {
            Gender::Female
        } else {
            Gender::Male
        },
        consultation_fee: 500.0 + f64::from(experience) * 10.0,
        availability: Availability {
            online: true,
            clinic: experience % 3 == 0,
            hospital: false,
        },
        rating,
        review_count: 10,
        location: Some("Chennai".to_string()),
        hospital: None,
        image_url: None,
        next_available_slot: None,
    }
}
