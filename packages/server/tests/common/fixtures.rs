//! Test fixtures for building request bodies and provider payloads.

use jobboard_core::domains::auth::IdentityProfile;
use jobboard_core::kernel::ExternalJob;
use serde_json::{json, Value};
use uuid::Uuid;

/// Suffix a label so rows from different tests never collide
pub fn unique(label: &str) -> String {
    format!("{} {}", label, Uuid::new_v4().simple())
}

pub fn profile(sub: &str, name: &str) -> IdentityProfile {
    IdentityProfile {
        sub: sub.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        name: name.to_string(),
        picture: format!("https://example.com/{}.png", name.to_lowercase().replace(' ', "-")),
    }
}

/// A provider listing with every field the normalizer reads
pub fn external_job(title: &str, city: &str, country: &str) -> ExternalJob {
    ExternalJob {
        job_title: Some(title.to_string()),
        job_description: Some(format!("{} wanted", title)),
        job_city: Some(city.to_string()),
        job_state: None,
        job_country: Some(country.to_string()),
        job_min_salary: Some(60000.0),
        job_employment_type: Some("Full-time".to_string()),
        job_required_skills: Some(vec!["Rust".to_string(), "SQL".to_string()]),
        employer_website: Some("https://acme.example.com".to_string()),
    }
}

/// `POST /jobs` body as the browser form sends it (comma-separated lists)
pub fn create_job_body(title: &str, location: &str, tags: &str) -> Value {
    json!({
        "title": title,
        "description": format!("{} description", title),
        "location": location,
        "salary": 85000,
        "jobType": "Full-time",
        "tags": tags,
        "skills": "Rust, PostgreSQL",
        "salaryType": "Year",
        "negotiable": true,
        "companyDescription": "Small product team"
    })
}
