// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Applicant queries.

use aquahr_domain::{Applicant, ApplicantSortKey, Page};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use tracing::debug;

use crate::data_models::{ApplicantFilter, ApplicantRow, ListOptions};
use crate::diesel_schema::applicants;
use crate::error::PersistenceError;

/// Retrieves an applicant by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored row cannot
/// be reconstructed.
/// Returns `Ok(None)` if the applicant is not found.
pub fn get_applicant(
    conn: &mut SqliteConnection,
    applicant_id: i64,
) -> Result<Option<Applicant>, PersistenceError> {
    debug!("Looking up applicant by ID: {}", applicant_id);

    let result: Result<ApplicantRow, diesel::result::Error> = applicants::table
        .filter(applicants::applicant_id.eq(applicant_id))
        .select(ApplicantRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Applicant::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Checks whether `email` has already applied to `job_id`.
///
/// `exclude` skips one applicant, used when that applicant is the one
/// being updated.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn applicant_email_taken(
    conn: &mut SqliteConnection,
    job_id: i64,
    email: &str,
    exclude: Option<i64>,
) -> Result<bool, PersistenceError> {
    let mut query = applicants::table
        .filter(applicants::job_id.eq(job_id))
        .filter(applicants::email.eq(email.to_string()))
        .into_boxed();
    if let Some(exclude) = exclude {
        query = query.filter(applicants::applicant_id.ne(exclude));
    }
    let count: i64 = query.count().get_result(conn)?;
    Ok(count > 0)
}

fn filtered<'a>(
    filter: ApplicantFilter,
    pattern: Option<&str>,
) -> applicants::BoxedQuery<'a, Sqlite> {
    let mut query = applicants::table.into_boxed();
    if let Some(job_id) = filter.job_id {
        query = query.filter(applicants::job_id.eq(job_id));
    }
    if let Some(stage) = filter.stage {
        query = query.filter(applicants::stage.eq(stage.as_str()));
    }
    if let Some(pattern) = pattern {
        query = query.filter(
            matches_pattern!(applicants::first_name, pattern)
                .or(matches_pattern!(applicants::last_name, pattern))
                .or(matches_pattern!(applicants::email, pattern)),
        );
    }
    query
}

/// Lists applicants matching the filter and search term.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_applicants(
    conn: &mut SqliteConnection,
    filter: ApplicantFilter,
    options: &ListOptions<ApplicantSortKey>,
) -> Result<Page<Applicant>, PersistenceError> {
    let pattern: Option<String> = options.search_pattern();
    debug!(?filter, ?pattern, sort = options.sort.as_str(), "Listing applicants");

    let total: i64 = filtered(filter, pattern.as_deref())
        .count()
        .get_result(conn)?;

    let query = filtered(filter, pattern.as_deref()).select(ApplicantRow::as_select());
    let tiebreak = applicants::applicant_id;
    let query = match options.sort {
        ApplicantSortKey::AppliedAt => {
            apply_order!(query, applicants::applied_at, options.order, tiebreak)
        }
        ApplicantSortKey::LastName => {
            apply_order!(query, applicants::last_name, options.order, tiebreak)
        }
        ApplicantSortKey::Stage => apply_order!(query, applicants::stage, options.order, tiebreak),
    };

    let rows: Vec<ApplicantRow> = query
        .limit(options.page.limit())
        .offset(options.page.offset())
        .load(conn)?;

    let items: Vec<Applicant> = rows
        .into_iter()
        .map(Applicant::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Page::new(items, total, options.page))
}
