// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee mutations.

use aquahr_domain::{Employee, Gender, format_date};
use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use tracing::{debug, info};

use crate::backend::sqlite::last_insert_id;
use crate::diesel_schema::{employees, site_employees, sites};
use crate::error::PersistenceError;
use crate::mutations::{ensure_affected, require_id};

/// Inserts an employee and returns its ID.
///
/// # Errors
///
/// Returns `UniqueViolation` if the email is taken, `ForeignKeyViolation`
/// if the department does not exist, or another error if the insert fails.
pub fn insert_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<i64, PersistenceError> {
    info!("Creating employee: {}", employee.full_name());

    let experience_json: String = serde_json::to_string(&employee.experience)?;

    diesel::insert_into(employees::table)
        .values((
            employees::first_name.eq(&employee.first_name),
            employees::last_name.eq(&employee.last_name),
            employees::email.eq(&employee.email),
            employees::phone.eq(&employee.phone),
            employees::gender.eq(employee.gender.map(|g: Gender| g.as_str())),
            employees::date_of_birth.eq(employee.date_of_birth.map(format_date)),
            employees::address.eq(&employee.address),
            employees::position.eq(&employee.position),
            employees::department_id.eq(employee.department_id),
            employees::hire_date.eq(format_date(employee.hire_date)),
            employees::employment_status.eq(employee.employment_status.as_str()),
            employees::cv_url.eq(&employee.cv_url),
            employees::id_document_url.eq(&employee.id_document_url),
            employees::photo_url.eq(&employee.photo_url),
            employees::experience_json.eq(&experience_json),
        ))
        .execute(conn)?;

    let employee_id: i64 = last_insert_id(conn)?;
    info!(employee_id, "Employee created");
    Ok(employee_id)
}

/// Writes every column of a stored employee.
///
/// # Errors
///
/// Returns `NotFound` if the employee does not exist, or a constraint
/// error if the new values are rejected.
pub fn update_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<(), PersistenceError> {
    let employee_id: i64 = require_id(employee.employee_id, "Employee")?;
    info!(employee_id, "Updating employee");

    let experience_json: String = serde_json::to_string(&employee.experience)?;

    let rows: usize = diesel::update(employees::table)
        .filter(employees::employee_id.eq(employee_id))
        .set((
            employees::first_name.eq(&employee.first_name),
            employees::last_name.eq(&employee.last_name),
            employees::email.eq(&employee.email),
            employees::phone.eq(&employee.phone),
            employees::gender.eq(employee.gender.map(|g: Gender| g.as_str())),
            employees::date_of_birth.eq(employee.date_of_birth.map(format_date)),
            employees::address.eq(&employee.address),
            employees::position.eq(&employee.position),
            employees::department_id.eq(employee.department_id),
            employees::hire_date.eq(format_date(employee.hire_date)),
            employees::employment_status.eq(employee.employment_status.as_str()),
            employees::cv_url.eq(&employee.cv_url),
            employees::id_document_url.eq(&employee.id_document_url),
            employees::photo_url.eq(&employee.photo_url),
            employees::experience_json.eq(&experience_json),
            employees::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    ensure_affected(rows, "Employee", employee_id)
}

/// Deletes an employee together with its site references.
///
/// Manager and supervisor slots held by the employee are cleared and the
/// employee leaves every roster; contracts are removed by cascade.
///
/// # Errors
///
/// Returns `NotFound` if the employee does not exist, or
/// `ForeignKeyViolation` while egg migrations reference the employee.
pub fn delete_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<(), PersistenceError> {
    info!(employee_id, "Deleting employee");

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let managed: usize = diesel::update(sites::table)
            .filter(sites::manager_id.eq(employee_id))
            .set(sites::manager_id.eq(None::<i64>))
            .execute(conn)?;
        let supervised: usize = diesel::update(sites::table)
            .filter(sites::supervisor_id.eq(employee_id))
            .set(sites::supervisor_id.eq(None::<i64>))
            .execute(conn)?;
        let rostered: usize = diesel::delete(site_employees::table)
            .filter(site_employees::employee_id.eq(employee_id))
            .execute(conn)?;
        debug!(
            employee_id,
            managed, supervised, rostered, "Cleared site references"
        );

        let rows: usize = diesel::delete(employees::table)
            .filter(employees::employee_id.eq(employee_id))
            .execute(conn)?;

        ensure_affected(rows, "Employee", employee_id)
    })
}
