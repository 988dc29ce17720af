// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Job posting mutations.

use aquahr_domain::{Job, format_date};
use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use tracing::info;

use crate::backend::sqlite::last_insert_id;
use crate::diesel_schema::{applicants, jobs};
use crate::error::PersistenceError;
use crate::mutations::{ensure_affected, require_id};

/// Inserts a job and returns its ID.
///
/// # Errors
///
/// Returns `ForeignKeyViolation` if the department does not exist, or
/// another error if the insert fails.
pub fn insert_job(conn: &mut SqliteConnection, job: &Job) -> Result<i64, PersistenceError> {
    info!("Creating job: {}", job.title);

    let skills_json: String = serde_json::to_string(&job.skills)?;

    diesel::insert_into(jobs::table)
        .values((
            jobs::title.eq(&job.title),
            jobs::department_id.eq(job.department_id),
            jobs::description.eq(&job.description),
            jobs::location.eq(&job.location),
            jobs::employment_type.eq(job.employment_type.as_str()),
            jobs::experience_level.eq(job.experience_level.as_str()),
            jobs::skills_json.eq(&skills_json),
            jobs::salary_min.eq(job.salary_min),
            jobs::salary_max.eq(job.salary_max),
            jobs::status.eq(job.status.as_str()),
            jobs::closing_date.eq(job.closing_date.map(format_date)),
        ))
        .execute(conn)?;

    let job_id: i64 = last_insert_id(conn)?;
    info!(job_id, "Job created");
    Ok(job_id)
}

/// Writes every column of a stored job.
///
/// # Errors
///
/// Returns `NotFound` if the job does not exist.
pub fn update_job(conn: &mut SqliteConnection, job: &Job) -> Result<(), PersistenceError> {
    let job_id: i64 = require_id(job.job_id, "Job")?;
    info!(job_id, status = job.status.as_str(), "Updating job");

    let skills_json: String = serde_json::to_string(&job.skills)?;

    let rows: usize = diesel::update(jobs::table)
        .filter(jobs::job_id.eq(job_id))
        .set((
            jobs::title.eq(&job.title),
            jobs::department_id.eq(job.department_id),
            jobs::description.eq(&job.description),
            jobs::location.eq(&job.location),
            jobs::employment_type.eq(job.employment_type.as_str()),
            jobs::experience_level.eq(job.experience_level.as_str()),
            jobs::skills_json.eq(&skills_json),
            jobs::salary_min.eq(job.salary_min),
            jobs::salary_max.eq(job.salary_max),
            jobs::status.eq(job.status.as_str()),
            jobs::closing_date.eq(job.closing_date.map(format_date)),
            jobs::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    ensure_affected(rows, "Job", job_id)
}

/// Deletes a job and its applicants.
///
/// Returns the number of applicants removed with it.
///
/// # Errors
///
/// Returns `NotFound` if the job does not exist.
pub fn delete_job(conn: &mut SqliteConnection, job_id: i64) -> Result<usize, PersistenceError> {
    info!(job_id, "Deleting job");

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let removed: usize = diesel::delete(applicants::table)
            .filter(applicants::job_id.eq(job_id))
            .execute(conn)?;

        let rows: usize = diesel::delete(jobs::table)
            .filter(jobs::job_id.eq(job_id))
            .execute(conn)?;
        ensure_affected(rows, "Job", job_id)?;

        info!(job_id, removed, "Job deleted with its applicants");
        Ok(removed)
    })
}
