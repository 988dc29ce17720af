// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Job posting queries.

use aquahr_domain::{Job, JobSortKey, Page};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use tracing::debug;

use crate::data_models::{JobFilter, JobRow, ListOptions};
use crate::diesel_schema::{applicants, jobs};
use crate::error::PersistenceError;

/// Retrieves a job by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored row cannot
/// be reconstructed.
/// Returns `Ok(None)` if the job is not found.
pub fn get_job(conn: &mut SqliteConnection, job_id: i64) -> Result<Option<Job>, PersistenceError> {
    debug!("Looking up job by ID: {}", job_id);

    let result: Result<JobRow, diesel::result::Error> = jobs::table
        .filter(jobs::job_id.eq(job_id))
        .select(JobRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Job::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

fn filtered<'a>(filter: JobFilter, pattern: Option<&str>) -> jobs::BoxedQuery<'a, Sqlite> {
    let mut query = jobs::table.into_boxed();
    if let Some(status) = filter.status {
        query = query.filter(jobs::status.eq(status.as_str()));
    }
    if let Some(department_id) = filter.department_id {
        query = query.filter(jobs::department_id.eq(department_id));
    }
    if let Some(employment_type) = filter.employment_type {
        query = query.filter(jobs::employment_type.eq(employment_type.as_str()));
    }
    if let Some(level) = filter.experience_level {
        query = query.filter(jobs::experience_level.eq(level.as_str()));
    }
    if let Some(pattern) = pattern {
        query = query.filter(
            matches_pattern!(jobs::title, pattern)
                .or(matches_pattern!(jobs::description, pattern))
                .or(matches_pattern!(jobs::location, pattern))
                .or(matches_pattern!(jobs::skills_json, pattern)),
        );
    }
    query
}

/// Lists jobs matching the filter and search term.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_jobs(
    conn: &mut SqliteConnection,
    filter: JobFilter,
    options: &ListOptions<JobSortKey>,
) -> Result<Page<Job>, PersistenceError> {
    let pattern: Option<String> = options.search_pattern();
    debug!(?filter, ?pattern, sort = options.sort.as_str(), "Listing jobs");

    let total: i64 = filtered(filter, pattern.as_deref())
        .count()
        .get_result(conn)?;

    let query = filtered(filter, pattern.as_deref()).select(JobRow::as_select());
    let tiebreak = jobs::job_id;
    let query = match options.sort {
        JobSortKey::Title => apply_order!(query, jobs::title, options.order, tiebreak),
        JobSortKey::Status => apply_order!(query, jobs::status, options.order, tiebreak),
        JobSortKey::ClosingDate => {
            apply_order!(query, jobs::closing_date, options.order, tiebreak)
        }
        JobSortKey::CreatedAt => apply_order!(query, jobs::created_at, options.order, tiebreak),
    };

    let rows: Vec<JobRow> = query
        .limit(options.page.limit())
        .offset(options.page.offset())
        .load(conn)?;

    let items: Vec<Job> = rows
        .into_iter()
        .map(Job::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Page::new(items, total, options.page))
}

/// Counts applicants for a job.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_applicants_for_job(
    conn: &mut SqliteConnection,
    job_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(applicants::table
        .filter(applicants::job_id.eq(job_id))
        .count()
        .get_result(conn)?)
}
