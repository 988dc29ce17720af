// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Job posting and applicant endpoints.

use aquahr_api::{
    ApplicantListQuery, ChangeStageRequest, ChangeStageResponse, CreateApplicantRequest,
    CreateJobRequest, DeleteJobResponse, DeleteResponse, JobListQuery, UpdateApplicantRequest,
    UpdateJobRequest, change_applicant_stage, create_applicant, create_job, delete_applicant,
    delete_job, get_applicant, get_job, list_applicants, list_jobs, update_applicant, update_job,
};
use aquahr_domain::{Applicant, Job, Page};
use axum::{
    Json,
    extract::{Path, State as AxumState},
    http::StatusCode,
};
use tracing::{debug, info};

use super::{AppState, today};
use crate::error::{HttpError, JsonBody, QueryParams};
use crate::live::LiveEvent;

// ============================================================================
// Jobs
// ============================================================================

/// Handler for POST `/jobs`.
pub(super) async fn handle_create_job(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<CreateJobRequest>,
) -> Result<(StatusCode, Json<Job>), HttpError> {
    info!(title = %req.title, "Handling create_job request");

    let mut persistence = app_state.persistence.lock().await;
    let job: Job = create_job(&mut persistence, &req)?;
    drop(persistence);

    app_state
        .broadcaster
        .broadcast(&LiveEvent::JobCreated { job: job.clone() });

    Ok((StatusCode::CREATED, Json(job)))
}

/// Handler for GET `/jobs`.
pub(super) async fn handle_list_jobs(
    AxumState(app_state): AxumState<AppState>,
    QueryParams(query): QueryParams<JobListQuery>,
) -> Result<Json<Page<Job>>, HttpError> {
    debug!(?query, "Handling list_jobs request");

    let mut persistence = app_state.persistence.lock().await;
    let page: Page<Job> = list_jobs(&mut persistence, &query)?;
    drop(persistence);

    Ok(Json(page))
}

/// Handler for GET `/jobs/{id}`.
pub(super) async fn handle_get_job(
    AxumState(app_state): AxumState<AppState>,
    Path(job_id): Path<i64>,
) -> Result<Json<Job>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let job: Job = get_job(&mut persistence, job_id)?;
    drop(persistence);

    Ok(Json(job))
}

/// Handler for PUT/PATCH `/jobs/{id}`.
pub(super) async fn handle_update_job(
    AxumState(app_state): AxumState<AppState>,
    Path(job_id): Path<i64>,
    JsonBody(req): JsonBody<UpdateJobRequest>,
) -> Result<Json<Job>, HttpError> {
    info!(job_id, "Handling update_job request");

    let mut persistence = app_state.persistence.lock().await;
    let job: Job = update_job(&mut persistence, job_id, &req)?;
    drop(persistence);

    app_state
        .broadcaster
        .broadcast(&LiveEvent::JobUpdated { job: job.clone() });

    Ok(Json(job))
}

/// Handler for DELETE `/jobs/{id}`.
pub(super) async fn handle_delete_job(
    AxumState(app_state): AxumState<AppState>,
    Path(job_id): Path<i64>,
) -> Result<Json<DeleteJobResponse>, HttpError> {
    info!(job_id, "Handling delete_job request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteJobResponse = delete_job(&mut persistence, job_id)?;
    drop(persistence);

    app_state
        .broadcaster
        .broadcast(&LiveEvent::JobDeleted { job_id });

    Ok(Json(response))
}

// ============================================================================
// Applicants
// ============================================================================

/// Handler for POST `/applicants`.
pub(super) async fn handle_create_applicant(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<CreateApplicantRequest>,
) -> Result<(StatusCode, Json<Applicant>), HttpError> {
    info!(job_id = req.job_id, email = %req.email, "Handling create_applicant request");

    let mut persistence = app_state.persistence.lock().await;
    let applicant: Applicant = create_applicant(&mut persistence, &req, today())?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::ApplicantCreated {
        applicant: applicant.clone(),
    });

    Ok((StatusCode::CREATED, Json(applicant)))
}

/// Handler for GET `/applicants`.
pub(super) async fn handle_list_applicants(
    AxumState(app_state): AxumState<AppState>,
    QueryParams(query): QueryParams<ApplicantListQuery>,
) -> Result<Json<Page<Applicant>>, HttpError> {
    debug!(?query, "Handling list_applicants request");

    let mut persistence = app_state.persistence.lock().await;
    let page: Page<Applicant> = list_applicants(&mut persistence, &query)?;
    drop(persistence);

    Ok(Json(page))
}

/// Handler for GET `/applicants/{id}`.
pub(super) async fn handle_get_applicant(
    AxumState(app_state): AxumState<AppState>,
    Path(applicant_id): Path<i64>,
) -> Result<Json<Applicant>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let applicant: Applicant = get_applicant(&mut persistence, applicant_id)?;
    drop(persistence);

    Ok(Json(applicant))
}

/// Handler for PUT/PATCH `/applicants/{id}`.
pub(super) async fn handle_update_applicant(
    AxumState(app_state): AxumState<AppState>,
    Path(applicant_id): Path<i64>,
    JsonBody(req): JsonBody<UpdateApplicantRequest>,
) -> Result<Json<Applicant>, HttpError> {
    info!(applicant_id, "Handling update_applicant request");

    let mut persistence = app_state.persistence.lock().await;
    let applicant: Applicant = update_applicant(&mut persistence, applicant_id, &req, today())?;
    drop(persistence);

    Ok(Json(applicant))
}

/// Handler for PATCH `/applicants/{id}/stage`.
///
/// Only an actual change of stage is broadcast.
pub(super) async fn handle_change_applicant_stage(
    AxumState(app_state): AxumState<AppState>,
    Path(applicant_id): Path<i64>,
    JsonBody(req): JsonBody<ChangeStageRequest>,
) -> Result<Json<ChangeStageResponse>, HttpError> {
    info!(applicant_id, stage = %req.stage, "Handling change_applicant_stage request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ChangeStageResponse =
        change_applicant_stage(&mut persistence, applicant_id, &req)?;
    drop(persistence);

    if response.previous_stage != response.applicant.stage {
        app_state
            .broadcaster
            .broadcast(&LiveEvent::ApplicantStageChanged {
                applicant: response.applicant.clone(),
                previous_stage: response.previous_stage,
            });
    }

    Ok(Json(response))
}

/// Handler for DELETE `/applicants/{id}`.
pub(super) async fn handle_delete_applicant(
    AxumState(app_state): AxumState<AppState>,
    Path(applicant_id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(applicant_id, "Handling delete_applicant request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse = delete_applicant(&mut persistence, applicant_id)?;
    drop(persistence);

    Ok(Json(response))
}
