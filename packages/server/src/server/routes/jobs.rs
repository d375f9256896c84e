//! `/api/v1/jobs` handlers.
//!
//! Handlers only translate HTTP to job actions; ownership and validation live
//! in `domains::jobs::actions`.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::common::{JobId, UserId};
use crate::domains::jobs::actions;
use crate::domains::jobs::data::{CreateJobInput, JobData, SearchParams, UpdateJobInput};
use crate::domains::jobs::models::JobQuery;
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::CurrentUser;

fn parse_job_id(raw: &str) -> Result<JobId, ApiError> {
    JobId::parse(raw).map_err(|_| ApiError::NotFound("Job not found".to_string()))
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    UserId::parse(raw).map_err(|_| ApiError::NotFound("User not found".to_string()))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

pub async fn create_job_handler(
    Extension(state): Extension<AppState>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<CreateJobInput>, JsonRejection>,
) -> Result<(StatusCode, Json<JobData>), ApiError> {
    let input = json_body(body)?;
    let job = actions::create_job(input, &user, state.deps.jobs.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(job.into())))
}

pub async fn list_jobs_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<JobData>>, ApiError> {
    let jobs = actions::list_jobs(&JobQuery::all(), state.deps.jobs.as_ref()).await?;
    Ok(Json(jobs.into_iter().map(JobData::from).collect()))
}

pub async fn search_jobs_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<JobData>>, ApiError> {
    let query = JobQuery::from(params);
    let jobs = actions::list_jobs(&query, state.deps.jobs.as_ref()).await?;
    Ok(Json(jobs.into_iter().map(JobData::from).collect()))
}

pub async fn jobs_by_user_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    CurrentUser(_user): CurrentUser,
) -> Result<Json<Vec<JobData>>, ApiError> {
    let user_id = parse_user_id(&id)?;
    let jobs = actions::list_jobs_by_user(
        user_id,
        state.deps.users.as_ref(),
        state.deps.jobs.as_ref(),
    )
    .await?;
    Ok(Json(jobs.into_iter().map(JobData::from).collect()))
}

pub async fn get_job_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    CurrentUser(_user): CurrentUser,
) -> Result<Json<JobData>, ApiError> {
    let job_id = parse_job_id(&id)?;
    let job = actions::get_job(job_id, state.deps.jobs.as_ref()).await?;
    Ok(Json(job.into()))
}

pub async fn apply_job_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<JobData>, ApiError> {
    let job_id = parse_job_id(&id)?;
    let job = actions::apply_to_job(job_id, &user, state.deps.jobs.as_ref()).await?;
    Ok(Json(job.into()))
}

pub async fn like_job_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<JobData>, ApiError> {
    let job_id = parse_job_id(&id)?;
    let job = actions::toggle_job_like(job_id, &user, state.deps.jobs.as_ref()).await?;
    Ok(Json(job.into()))
}

pub async fn update_job_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<UpdateJobInput>, JsonRejection>,
) -> Result<Json<JobData>, ApiError> {
    let job_id = parse_job_id(&id)?;
    let input = json_body(body)?;
    let job = actions::update_job(job_id, input, &user, state.deps.jobs.as_ref()).await?;
    Ok(Json(job.into()))
}

pub async fn delete_job_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let job_id = parse_job_id(&id)?;
    actions::delete_job(job_id, &user, state.deps.jobs.as_ref()).await?;
    Ok(Json(json!({ "message": "Job deleted successfully" })))
}
