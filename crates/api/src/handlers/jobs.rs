// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Job posting handlers.

use aquahr_domain::{
    DomainError, EmploymentType, ExperienceLevel, Job, JobSortKey, JobStatus, Page,
    normalize_optional, parse_optional_date, validate_job,
};
use aquahr_persistence::{JobFilter, ListOptions, Persistence};
use tracing::{debug, info};

use super::{list_options, parse_optional_enum, require_department};
use crate::error::ApiError;
use crate::request_response::{CreateJobRequest, DeleteJobResponse, JobListQuery, UpdateJobRequest};

/// Creates a job posting.
///
/// Postings are `OPEN` unless another status is given.
///
/// # Errors
///
/// Returns an error if a field is invalid or the department does not exist.
pub fn create_job(
    persistence: &mut Persistence,
    request: &CreateJobRequest,
) -> Result<Job, ApiError> {
    let mut job: Job = Job {
        job_id: None,
        title: request.title.trim().to_string(),
        department_id: request.department_id,
        description: request.description.trim().to_string(),
        location: normalize_optional(request.location.clone()),
        employment_type: request.employment_type.parse::<EmploymentType>()?,
        experience_level: request.experience_level.parse::<ExperienceLevel>()?,
        skills: request.skills.clone(),
        salary_min: request.salary_min,
        salary_max: request.salary_max,
        status: parse_optional_enum::<JobStatus>(request.status.as_deref())?.unwrap_or_default(),
        closing_date: parse_optional_date("closing_date", request.closing_date.as_deref())?,
        created_at: None,
        updated_at: None,
    };
    validate_job(&mut job)?;

    if let Some(department_id) = job.department_id {
        require_department(persistence, "department_id", department_id)?;
    }

    let job_id: i64 = persistence.create_job(&job)?;
    info!(job_id, title = %job.title, status = %job.status, "Created job");
    get_job(persistence, job_id)
}

/// Retrieves a job posting.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the job does not exist.
pub fn get_job(persistence: &mut Persistence, job_id: i64) -> Result<Job, ApiError> {
    persistence
        .get_job(job_id)?
        .ok_or_else(|| ApiError::not_found("Job", job_id))
}

/// Lists job postings.
///
/// # Errors
///
/// Returns an error if the query parameters are invalid.
pub fn list_jobs(
    persistence: &mut Persistence,
    query: &JobListQuery,
) -> Result<Page<Job>, ApiError> {
    let options: ListOptions<JobSortKey> = list_options(
        query.search.as_deref(),
        query.sort.as_deref(),
        query.order.as_deref(),
        query.page,
        query.per_page,
    )?;
    let filter: JobFilter = JobFilter {
        status: parse_optional_enum(query.status.as_deref())?,
        department_id: query.department_id,
        employment_type: parse_optional_enum(query.employment_type.as_deref())?,
        experience_level: parse_optional_enum(query.experience_level.as_deref())?,
    };

    let page: Page<Job> = persistence.list_jobs(filter, &options)?;
    debug!(total = page.total, "Listed jobs");
    Ok(page)
}

/// Applies a partial update to a job posting.
///
/// # Errors
///
/// Returns an error if the job does not exist, a field is invalid, the
/// status change is not permitted, or the department does not exist.
pub fn update_job(
    persistence: &mut Persistence,
    job_id: i64,
    request: &UpdateJobRequest,
) -> Result<Job, ApiError> {
    let mut job: Job = get_job(persistence, job_id)?;

    if let Some(title) = &request.title {
        job.title = title.trim().to_string();
    }
    if let Some(department_id) = request.department_id {
        job.department_id = department_id;
    }
    if let Some(description) = &request.description {
        job.description = description.trim().to_string();
    }
    if let Some(location) = &request.location {
        job.location = normalize_optional(location.clone());
    }
    if let Some(employment_type) = &request.employment_type {
        job.employment_type = employment_type.parse::<EmploymentType>()?;
    }
    if let Some(experience_level) = &request.experience_level {
        job.experience_level = experience_level.parse::<ExperienceLevel>()?;
    }
    if let Some(skills) = &request.skills {
        job.skills.clone_from(skills);
    }
    if let Some(salary_min) = request.salary_min {
        job.salary_min = salary_min;
    }
    if let Some(salary_max) = request.salary_max {
        job.salary_max = salary_max;
    }
    if let Some(closing_date) = &request.closing_date {
        job.closing_date = parse_optional_date("closing_date", closing_date.as_deref())?;
    }
    if let Some(status) = &request.status {
        let target: JobStatus = status.parse::<JobStatus>()?;
        if target != job.status && !job.status.can_transition_to(target) {
            return Err(DomainError::InvalidJobTransition {
                from: job.status,
                to: target,
            }
            .into());
        }
        job.status = target;
    }
    validate_job(&mut job)?;

    if let Some(Some(department_id)) = request.department_id {
        require_department(persistence, "department_id", department_id)?;
    }

    persistence.update_job(&job)?;
    info!(job_id, status = %job.status, "Updated job");
    get_job(persistence, job_id)
}

/// Deletes a job posting together with its applicants.
///
/// # Errors
///
/// Returns `Conflict` if the job still has applicants and is not `CLOSED`.
pub fn delete_job(
    persistence: &mut Persistence,
    job_id: i64,
) -> Result<DeleteJobResponse, ApiError> {
    let job: Job = get_job(persistence, job_id)?;

    let applicants: i64 = persistence.count_applicants_for_job(job_id)?;
    if applicants > 0 && job.status != JobStatus::Closed {
        return Err(ApiError::Conflict {
            rule: String::from("job_has_applicants"),
            message: format!(
                "Job {job_id} has {applicants} applicant(s); close it before deleting"
            ),
        });
    }

    let removed_applicants: usize = persistence.delete_job(job_id)?;
    info!(job_id, removed_applicants, "Deleted job");
    Ok(DeleteJobResponse {
        job_id,
        removed_applicants,
        message: format!("Job '{}' deleted", job.title),
    })
}
