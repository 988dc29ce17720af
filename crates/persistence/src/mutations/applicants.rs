// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Applicant mutations.

use aquahr_domain::Applicant;
use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use tracing::info;

use crate::backend::sqlite::last_insert_id;
use crate::diesel_schema::applicants;
use crate::error::PersistenceError;
use crate::mutations::{ensure_affected, require_id};

/// Inserts an applicant and returns its ID.
///
/// # Errors
///
/// Returns `UniqueViolation` if the email already applied to the job,
/// `ForeignKeyViolation` if the job does not exist, or another error if the
/// insert fails.
pub fn insert_applicant(
    conn: &mut SqliteConnection,
    applicant: &Applicant,
) -> Result<i64, PersistenceError> {
    info!(job_id = applicant.job_id, "Recording application");

    let experience_json: String = serde_json::to_string(&applicant.experience)?;

    diesel::insert_into(applicants::table)
        .values((
            applicants::job_id.eq(applicant.job_id),
            applicants::first_name.eq(&applicant.first_name),
            applicants::last_name.eq(&applicant.last_name),
            applicants::email.eq(&applicant.email),
            applicants::phone.eq(&applicant.phone),
            applicants::resume_url.eq(&applicant.resume_url),
            applicants::cover_letter.eq(&applicant.cover_letter),
            applicants::experience_json.eq(&experience_json),
            applicants::stage.eq(applicant.stage.as_str()),
        ))
        .execute(conn)?;

    let applicant_id: i64 = last_insert_id(conn)?;
    info!(applicant_id, "Applicant created");
    Ok(applicant_id)
}

/// Writes every column of a stored applicant.
///
/// # Errors
///
/// Returns `NotFound` if the applicant does not exist.
pub fn update_applicant(
    conn: &mut SqliteConnection,
    applicant: &Applicant,
) -> Result<(), PersistenceError> {
    let applicant_id: i64 = require_id(applicant.applicant_id, "Applicant")?;
    info!(applicant_id, stage = applicant.stage.as_str(), "Updating applicant");

    let experience_json: String = serde_json::to_string(&applicant.experience)?;

    let rows: usize = diesel::update(applicants::table)
        .filter(applicants::applicant_id.eq(applicant_id))
        .set((
            applicants::first_name.eq(&applicant.first_name),
            applicants::last_name.eq(&applicant.last_name),
            applicants::email.eq(&applicant.email),
            applicants::phone.eq(&applicant.phone),
            applicants::resume_url.eq(&applicant.resume_url),
            applicants::cover_letter.eq(&applicant.cover_letter),
            applicants::experience_json.eq(&experience_json),
            applicants::stage.eq(applicant.stage.as_str()),
            applicants::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    ensure_affected(rows, "Applicant", applicant_id)
}

/// Deletes an applicant.
///
/// # Errors
///
/// Returns `NotFound` if the applicant does not exist.
pub fn delete_applicant(
    conn: &mut SqliteConnection,
    applicant_id: i64,
) -> Result<(), PersistenceError> {
    info!(applicant_id, "Deleting applicant");

    let rows: usize = diesel::delete(applicants::table)
        .filter(applicants::applicant_id.eq(applicant_id))
        .execute(conn)?;

    ensure_affected(rows, "Applicant", applicant_id)
}
