// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Department mutations.

use aquahr_domain::Department;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::sqlite::last_insert_id;
use crate::diesel_schema::departments;
use crate::error::PersistenceError;
use crate::mutations::{ensure_affected, require_id};

/// Inserts a department and returns its ID.
///
/// # Errors
///
/// Returns `UniqueViolation` if the name is taken, or another error if the
/// insert fails.
pub fn insert_department(
    conn: &mut SqliteConnection,
    department: &Department,
) -> Result<i64, PersistenceError> {
    info!("Creating department: {}", department.name);

    diesel::insert_into(departments::table)
        .values((
            departments::name.eq(&department.name),
            departments::description.eq(&department.description),
        ))
        .execute(conn)?;

    let department_id: i64 = last_insert_id(conn)?;
    info!(department_id, "Department created");
    Ok(department_id)
}

/// Writes every column of a stored department.
///
/// # Errors
///
/// Returns `NotFound` if the department does not exist.
pub fn update_department(
    conn: &mut SqliteConnection,
    department: &Department,
) -> Result<(), PersistenceError> {
    let department_id: i64 = require_id(department.department_id, "Department")?;
    info!(department_id, "Updating department");

    let rows: usize = diesel::update(departments::table)
        .filter(departments::department_id.eq(department_id))
        .set((
            departments::name.eq(&department.name),
            departments::description.eq(&department.description),
        ))
        .execute(conn)?;

    ensure_affected(rows, "Department", department_id)
}

/// Deletes a department.
///
/// Employees and jobs in the department keep existing with no department.
///
/// # Errors
///
/// Returns `NotFound` if the department does not exist, or
/// `ForeignKeyViolation` while contracts still reference it.
pub fn delete_department(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<(), PersistenceError> {
    info!(department_id, "Deleting department");

    let rows: usize = diesel::delete(departments::table)
        .filter(departments::department_id.eq(department_id))
        .execute(conn)?;

    ensure_affected(rows, "Department", department_id)
}
