// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Applicant handlers.
//!
//! An application is only accepted while its job is `OPEN`. After that the
//! applicant moves through the hiring pipeline one stage at a time.

use aquahr_domain::{
    Applicant, ApplicantSortKey, ApplicantStage, DomainError, Job, JobStatus, Page,
    normalize_email, normalize_optional, validate_applicant,
};
use aquahr_persistence::{ApplicantFilter, ListOptions, Persistence};
use time::Date;
use tracing::{debug, info};

use super::{experience_from_inputs, list_options, parse_optional_enum};
use crate::error::ApiError;
use crate::request_response::{
    ApplicantListQuery, ChangeStageRequest, ChangeStageResponse, CreateApplicantRequest,
    DeleteResponse, UpdateApplicantRequest,
};

fn ensure_not_applied(
    persistence: &mut Persistence,
    job_id: i64,
    email: &str,
    exclude: Option<i64>,
) -> Result<(), ApiError> {
    if persistence.applicant_email_taken(job_id, email, exclude)? {
        return Err(ApiError::Conflict {
            rule: String::from("unique_application"),
            message: format!("'{email}' has already applied to job {job_id}"),
        });
    }
    Ok(())
}

/// Records an application to a job.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The application, including the experience step
/// * `today` - The current date, used to check experience dates
///
/// # Errors
///
/// Returns an error if:
/// - The job does not exist or is not open
/// - A field is invalid (experience errors name the entry index)
/// - The email address has already applied to this job
pub fn create_applicant(
    persistence: &mut Persistence,
    request: &CreateApplicantRequest,
    today: Date,
) -> Result<Applicant, ApiError> {
    let job: Job = persistence
        .get_job(request.job_id)?
        .ok_or_else(|| ApiError::unknown_reference("job_id", "Job", request.job_id))?;
    if job.status != JobStatus::Open {
        return Err(DomainError::JobNotOpen {
            job_id: request.job_id,
            status: job.status,
        }
        .into());
    }

    let applicant: Applicant = Applicant {
        applicant_id: None,
        job_id: request.job_id,
        first_name: request.first_name.trim().to_string(),
        last_name: request.last_name.trim().to_string(),
        email: normalize_email(&request.email),
        phone: normalize_optional(request.phone.clone()),
        resume_url: normalize_optional(request.resume_url.clone()),
        cover_letter: normalize_optional(request.cover_letter.clone()),
        experience: experience_from_inputs(&request.experience)?,
        stage: ApplicantStage::default(),
        applied_at: None,
        updated_at: None,
    };
    validate_applicant(&applicant, today)?;
    ensure_not_applied(persistence, applicant.job_id, &applicant.email, None)?;

    let applicant_id: i64 = persistence.create_applicant(&applicant)?;
    info!(applicant_id, job_id = applicant.job_id, "Created applicant");
    get_applicant(persistence, applicant_id)
}

/// Retrieves an applicant.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the applicant does not exist.
pub fn get_applicant(
    persistence: &mut Persistence,
    applicant_id: i64,
) -> Result<Applicant, ApiError> {
    persistence
        .get_applicant(applicant_id)?
        .ok_or_else(|| ApiError::not_found("Applicant", applicant_id))
}

/// Lists applicants.
///
/// # Errors
///
/// Returns an error if the query parameters are invalid.
pub fn list_applicants(
    persistence: &mut Persistence,
    query: &ApplicantListQuery,
) -> Result<Page<Applicant>, ApiError> {
    let options: ListOptions<ApplicantSortKey> = list_options(
        query.search.as_deref(),
        query.sort.as_deref(),
        query.order.as_deref(),
        query.page,
        query.per_page,
    )?;
    let filter: ApplicantFilter = ApplicantFilter {
        job_id: query.job_id,
        stage: parse_optional_enum(query.stage.as_deref())?,
    };

    let page: Page<Applicant> = persistence.list_applicants(filter, &options)?;
    debug!(total = page.total, "Listed applicants");
    Ok(page)
}

/// Applies a partial update to an applicant's details.
///
/// # Errors
///
/// Returns an error if the applicant does not exist, a field is invalid, or
/// the new email has already applied to the same job.
pub fn update_applicant(
    persistence: &mut Persistence,
    applicant_id: i64,
    request: &UpdateApplicantRequest,
    today: Date,
) -> Result<Applicant, ApiError> {
    let mut applicant: Applicant = get_applicant(persistence, applicant_id)?;

    if let Some(first_name) = &request.first_name {
        applicant.first_name = first_name.trim().to_string();
    }
    if let Some(last_name) = &request.last_name {
        applicant.last_name = last_name.trim().to_string();
    }
    if let Some(email) = &request.email {
        applicant.email = normalize_email(email);
    }
    if let Some(phone) = &request.phone {
        applicant.phone = normalize_optional(phone.clone());
    }
    if let Some(resume_url) = &request.resume_url {
        applicant.resume_url = normalize_optional(resume_url.clone());
    }
    if let Some(cover_letter) = &request.cover_letter {
        applicant.cover_letter = normalize_optional(cover_letter.clone());
    }
    if let Some(experience) = &request.experience {
        applicant.experience = experience_from_inputs(experience)?;
    }
    validate_applicant(&applicant, today)?;

    if request.email.is_some() {
        ensure_not_applied(
            persistence,
            applicant.job_id,
            &applicant.email,
            Some(applicant_id),
        )?;
    }

    persistence.update_applicant(&applicant)?;
    info!(applicant_id, "Updated applicant");
    get_applicant(persistence, applicant_id)
}

/// Moves an applicant to another pipeline stage.
///
/// Requesting the current stage is a no-op.
///
/// # Errors
///
/// Returns an error if the applicant does not exist, the stage is unknown,
/// or the move is not a permitted transition.
pub fn change_applicant_stage(
    persistence: &mut Persistence,
    applicant_id: i64,
    request: &ChangeStageRequest,
) -> Result<ChangeStageResponse, ApiError> {
    let mut applicant: Applicant = get_applicant(persistence, applicant_id)?;
    let previous_stage: ApplicantStage = applicant.stage;
    let target: ApplicantStage = request.stage.parse::<ApplicantStage>()?;

    if target == previous_stage {
        return Ok(ChangeStageResponse {
            applicant,
            previous_stage,
        });
    }
    if !previous_stage.can_transition_to(target) {
        return Err(DomainError::InvalidStageTransition {
            from: previous_stage,
            to: target,
        }
        .into());
    }

    applicant.stage = target;
    persistence.update_applicant(&applicant)?;
    info!(applicant_id, from = %previous_stage, to = %target, "Changed applicant stage");

    Ok(ChangeStageResponse {
        applicant: get_applicant(persistence, applicant_id)?,
        previous_stage,
    })
}

/// Deletes an applicant.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the applicant does not exist.
pub fn delete_applicant(
    persistence: &mut Persistence,
    applicant_id: i64,
) -> Result<DeleteResponse, ApiError> {
    get_applicant(persistence, applicant_id)?;
    persistence.delete_applicant(applicant_id)?;

    info!(applicant_id, "Deleted applicant");
    Ok(DeleteResponse {
        id: applicant_id,
        message: format!("Applicant {applicant_id} deleted"),
    })
}
