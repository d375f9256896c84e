//! Map an external listing onto the local job shape.

use crate::domains::jobs::models::{NewJob, Provenance, SalaryType};
use crate::kernel::ExternalJob;

/// Salary stored when the provider does not publish one
pub const FALLBACK_SALARY: f64 = 50000.0;

/// Job type stored when the provider omits the employment type
pub const FALLBACK_JOB_TYPE: &str = "Full-time";

/// Normalize one external listing. Pure; never fails.
///
/// Ingested jobs are always yearly and non-negotiable. `tags` and `skills`
/// both receive the provider's required-skills list.
pub fn normalize_external_job(raw: &ExternalJob, source: &str) -> NewJob {
    let skills = raw.job_required_skills.clone().unwrap_or_default();

    NewJob {
        title: raw.job_title.clone().unwrap_or_default(),
        description: raw.job_description.clone().unwrap_or_default(),
        location: join_location(
            raw.job_city.as_deref(),
            raw.job_state.as_deref(),
            raw.job_country.as_deref(),
        ),
        salary: raw
            .job_min_salary
            .filter(|s| *s != 0.0 && s.is_finite())
            .unwrap_or(FALLBACK_SALARY),
        salary_type: SalaryType::Year,
        negotiable: false,
        job_type: vec![raw
            .job_employment_type
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| FALLBACK_JOB_TYPE.to_string())],
        tags: skills.clone(),
        skills,
        company_description: raw.employer_website.clone().unwrap_or_default(),
        provenance: Provenance::External(source.to_string()),
    }
}

/// `"city, state, country"`; missing parts stay as empty segments.
pub fn join_location(city: Option<&str>, state: Option<&str>, country: Option<&str>) -> String {
    [city, state, country]
        .map(|part| part.unwrap_or(""))
        .join(", ")
}
