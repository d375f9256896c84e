//! Integration tests for the job API.
//!
//! Drives the real router over in-memory stores:
//! - Public listing and search
//! - Protected CRUD with owner checks
//! - Apply and like
//! - Lazy user registration and the login landing route

mod common;

use axum::http::{header, StatusCode};
use common::{create_job_body, profile, TestApp, TEST_CLIENT_URL};
use jobboard_core::domains::users::UserRole;
use serde_json::json;

const RECRUITER_SUB: &str = "auth0|recruiter";
const SEEKER_SUB: &str = "auth0|seeker";

struct Actors {
    app: TestApp,
    recruiter: String,
    seeker: String,
}

fn actors() -> Actors {
    let app = TestApp::new();
    let recruiter = app.token_for(&profile(RECRUITER_SUB, "Kofi Boateng"));
    let seeker = app.token_for(&profile(SEEKER_SUB, "Ama Mensah"));
    Actors {
        app,
        recruiter,
        seeker,
    }
}

/// Create a job as `token` and return its id
async fn create_job(app: &TestApp, token: &str, title: &str, location: &str, tags: &str) -> String {
    let response = app
        .post("/api/v1/jobs", token, create_job_body(title, location, tags))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body["_id"].as_str().unwrap().to_string()
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_job_populates_creator() {
    let Actors { app, recruiter, .. } = actors();

    let response = app
        .post(
            "/api/v1/jobs",
            &recruiter,
            create_job_body("Rust Engineer", "Accra, Ghana", "rust, backend"),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let job = &response.body;
    assert_eq!(job["title"], "Rust Engineer");
    assert_eq!(job["tags"], json!(["rust", "backend"]));
    assert_eq!(job["skills"], json!(["Rust", "PostgreSQL"]));
    assert_eq!(job["jobType"], json!(["Full-time"]));
    assert_eq!(job["salaryType"], "Year");
    assert_eq!(job["createdBy"]["name"], "Kofi Boateng");
    assert_eq!(job["source"], serde_json::Value::Null);
    assert_eq!(job["applicants"], json!([]));
}

#[tokio::test]
async fn test_create_job_accepts_json_arrays() {
    let Actors { app, recruiter, .. } = actors();

    let mut body = create_job_body("Rust Engineer", "Accra, Ghana", "");
    body["tags"] = json!(["rust", "tokio"]);
    body["jobType"] = json!(["Full-time", "Remote"]);

    let response = app.post("/api/v1/jobs", &recruiter, body).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["tags"], json!(["rust", "tokio"]));
    assert_eq!(response.body["jobType"], json!(["Full-time", "Remote"]));
}

#[tokio::test]
async fn test_create_job_reports_first_missing_field() {
    let Actors { app, recruiter, .. } = actors();

    let mut body = create_job_body("Rust Engineer", "Accra, Ghana", "rust");
    body["description"] = json!("");
    body["salary"] = serde_json::Value::Null;

    let response = app.post("/api/v1/jobs", &recruiter, body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Description is required");
    assert!(app.deps.jobs.is_empty());
}

#[tokio::test]
async fn test_create_job_rejects_malformed_json() {
    let Actors { app, recruiter, .. } = actors();

    let response = app
        .request(
            axum::http::Method::POST,
            "/api/v1/jobs",
            Some(&recruiter),
            Some(json!("not an object")),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(!response.message().is_empty());
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new();

    let create = app
        .request(
            axum::http::Method::POST,
            "/api/v1/jobs",
            None,
            Some(create_job_body("Rust Engineer", "Accra", "rust")),
        )
        .await;
    assert_eq!(create.status, StatusCode::UNAUTHORIZED);
    assert_eq!(create.message(), "Not Authorized");

    let bogus = app
        .post("/api/v1/jobs", "not-a-jwt", create_job_body("Rust Engineer", "Accra", "rust"))
        .await;
    assert_eq!(bogus.status, StatusCode::UNAUTHORIZED);

    assert!(app.deps.jobs.is_empty());
    assert!(app.deps.users.all().is_empty());
}

// ============================================================================
// Read
// ============================================================================

#[tokio::test]
async fn test_list_jobs_is_public_and_newest_first() {
    let Actors { app, recruiter, .. } = actors();

    create_job(&app, &recruiter, "First", "Accra", "rust").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    create_job(&app, &recruiter, "Second", "Lagos", "go").await;

    let response = app.get("/api/v1/jobs", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let titles: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|j| j["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Second", "First"]);
    assert_eq!(response.body[0]["createdBy"]["name"], "Kofi Boateng");
}

#[tokio::test]
async fn test_get_job_by_id() {
    let Actors { app, recruiter, seeker } = actors();
    let id = create_job(&app, &recruiter, "Rust Engineer", "Accra", "rust").await;

    let found = app.get(&format!("/api/v1/jobs/{}", id), Some(&seeker)).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["_id"], id.as_str());

    let missing = app
        .get(&format!("/api/v1/jobs/{}", uuid::Uuid::new_v4()), Some(&seeker))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.message(), "Job not found");

    let malformed = app.get("/api/v1/jobs/not-an-id", Some(&seeker)).await;
    assert_eq!(malformed.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_jobs_by_user() {
    let Actors { app, recruiter, seeker } = actors();
    create_job(&app, &recruiter, "Rust Engineer", "Accra", "rust").await;
    create_job(&app, &seeker, "Side Gig", "Accra", "design").await;

    let recruiter_id = app
        .deps
        .users
        .all()
        .into_iter()
        .find(|u| u.auth0_id == RECRUITER_SUB)
        .unwrap()
        .id;

    let response = app
        .get(&format!("/api/v1/jobs/user/{}", recruiter_id), Some(&seeker))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let jobs = response.body.as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["title"], "Rust Engineer");

    let unknown = app
        .get(&format!("/api/v1/jobs/user/{}", uuid::Uuid::new_v4()), Some(&seeker))
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.message(), "User not found");
}

#[tokio::test]
async fn test_search_by_tags_location_and_title() {
    let Actors { app, recruiter, .. } = actors();
    create_job(&app, &recruiter, "Senior Rust Engineer", "Accra, Ghana", "rust, backend").await;
    create_job(&app, &recruiter, "Frontend Developer", "Lagos, Nigeria", "react").await;
    create_job(&app, &recruiter, "Go Engineer", "Accra, Ghana", "go, backend").await;

    let by_tag = app.get("/api/v1/jobs/search?tags=react,elixir", None).await;
    assert_eq!(by_tag.status, StatusCode::OK);
    assert_eq!(by_tag.body.as_array().unwrap().len(), 1);
    assert_eq!(by_tag.body[0]["title"], "Frontend Developer");

    let by_location = app.get("/api/v1/jobs/search?location=accra", None).await;
    assert_eq!(by_location.body.as_array().unwrap().len(), 2);

    let combined = app
        .get("/api/v1/jobs/search?tags=backend&title=rust", None)
        .await;
    assert_eq!(combined.body.as_array().unwrap().len(), 1);
    assert_eq!(combined.body[0]["title"], "Senior Rust Engineer");

    let everything = app.get("/api/v1/jobs/search", None).await;
    assert_eq!(everything.body.as_array().unwrap().len(), 3);
}

// ============================================================================
// Update / Delete
// ============================================================================

#[tokio::test]
async fn test_owner_can_update_job() {
    let Actors { app, recruiter, .. } = actors();
    let id = create_job(&app, &recruiter, "Rust Engineer", "Accra", "rust").await;

    let response = app
        .put(
            &format!("/api/v1/jobs/{}", id),
            &recruiter,
            Some(json!({ "title": "Staff Rust Engineer", "salary": "120000", "tags": "rust, lead" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["title"], "Staff Rust Engineer");
    assert_eq!(response.body["salary"], 120000.0);
    assert_eq!(response.body["tags"], json!(["rust", "lead"]));
    assert_eq!(response.body["location"], "Accra");
}

#[tokio::test]
async fn test_update_rejects_invalid_fields() {
    let Actors { app, recruiter, .. } = actors();
    let id = create_job(&app, &recruiter, "Rust Engineer", "Accra", "rust").await;

    let cases = [
        (json!({ "salary": "NaN" }), "Salary is required"),
        (json!({ "salary": "inf" }), "Salary is required"),
        (json!({ "title": "" }), "Title is required"),
        (json!({ "description": "  " }), "Description is required"),
        (json!({ "location": "" }), "Location is required"),
        (json!({ "jobType": [] }), "Job Type is required"),
    ];

    for (body, expected) in cases {
        let response = app
            .put(&format!("/api/v1/jobs/{}", id), &recruiter, Some(body))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.message(), expected);
    }

    let stored = &app.deps.jobs.all()[0];
    assert_eq!(stored.title, "Rust Engineer");
    assert_eq!(stored.location, "Accra");
    assert!(stored.salary.is_finite());
    assert!(!stored.job_type.is_empty());
}

#[tokio::test]
async fn test_non_owner_cannot_update_or_delete() {
    let Actors { app, recruiter, seeker } = actors();
    let id = create_job(&app, &recruiter, "Rust Engineer", "Accra", "rust").await;

    let update = app
        .put(
            &format!("/api/v1/jobs/{}", id),
            &seeker,
            Some(json!({ "title": "Hijacked" })),
        )
        .await;
    assert_eq!(update.status, StatusCode::FORBIDDEN);
    assert_eq!(update.message(), "Not authorized to update this job");

    let delete = app.delete(&format!("/api/v1/jobs/{}", id), &seeker).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);
    assert_eq!(delete.message(), "Not authorized to delete this job");

    assert_eq!(app.deps.jobs.all()[0].title, "Rust Engineer");
}

#[tokio::test]
async fn test_owner_can_delete_job() {
    let Actors { app, recruiter, .. } = actors();
    let id = create_job(&app, &recruiter, "Rust Engineer", "Accra", "rust").await;

    let response = app.delete(&format!("/api/v1/jobs/{}", id), &recruiter).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Job deleted successfully");
    assert!(app.deps.jobs.is_empty());

    let again = app.delete(&format!("/api/v1/jobs/{}", id), &recruiter).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Apply / Like
// ============================================================================

#[tokio::test]
async fn test_apply_once() {
    let Actors { app, recruiter, seeker } = actors();
    let id = create_job(&app, &recruiter, "Rust Engineer", "Accra", "rust").await;

    let applied = app
        .put(&format!("/api/v1/jobs/apply/{}", id), &seeker, None)
        .await;
    assert_eq!(applied.status, StatusCode::OK);
    assert_eq!(applied.body["applicants"].as_array().unwrap().len(), 1);

    let again = app
        .put(&format!("/api/v1/jobs/apply/{}", id), &seeker, None)
        .await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.message(), "Already applied for this job");
    assert_eq!(app.deps.jobs.all()[0].applicants.len(), 1);
}

#[tokio::test]
async fn test_like_toggles() {
    let Actors { app, recruiter, seeker } = actors();
    let id = create_job(&app, &recruiter, "Rust Engineer", "Accra", "rust").await;
    let uri = format!("/api/v1/jobs/like/{}", id);

    let liked = app.put(&uri, &seeker, None).await;
    assert_eq!(liked.status, StatusCode::OK);
    assert_eq!(liked.body["likes"].as_array().unwrap().len(), 1);

    let unliked = app.put(&uri, &seeker, None).await;
    assert_eq!(unliked.status, StatusCode::OK);
    assert_eq!(unliked.body["likes"], json!([]));
}

#[tokio::test]
async fn test_apply_to_missing_job() {
    let Actors { app, seeker, .. } = actors();

    let response = app
        .put(
            &format!("/api/v1/jobs/apply/{}", uuid::Uuid::new_v4()),
            &seeker,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Users and landing
// ============================================================================

#[tokio::test]
async fn test_first_request_registers_jobseeker_once() {
    let Actors { app, seeker, .. } = actors();

    app.get("/api/v1/jobs/search", Some(&seeker)).await;
    assert!(app.deps.users.all().is_empty(), "public routes do not register");

    create_job(&app, &seeker, "Side Gig", "Accra", "design").await;
    create_job(&app, &seeker, "Another Gig", "Accra", "design").await;

    let users = app.deps.users.all();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].auth0_id, SEEKER_SUB);
    assert_eq!(users[0].role, UserRole::Jobseeker);
    assert_eq!(users[0].name, "Ama Mensah");
}

#[tokio::test]
async fn test_root_redirects_signed_in_callers() {
    let Actors { app, seeker, .. } = actors();

    let response = app.get("/", Some(&seeker)).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.headers[header::LOCATION], TEST_CLIENT_URL);
    assert_eq!(app.deps.users.all().len(), 1);
}

#[tokio::test]
async fn test_root_without_token_is_logged_out() {
    let app = TestApp::new();

    let response = app.get("/", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "Logged out");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.get("/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
}
