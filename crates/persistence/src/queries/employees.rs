// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee queries.

use aquahr_domain::{Employee, EmployeeSortKey, Page};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use tracing::debug;

use crate::data_models::{EmployeeFilter, EmployeeRow, ListOptions};
use crate::diesel_schema::{employees, parent_egg_migrations};
use crate::error::PersistenceError;

/// Retrieves an employee by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored row cannot
/// be reconstructed.
/// Returns `Ok(None)` if the employee is not found.
pub fn get_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Option<Employee>, PersistenceError> {
    debug!("Looking up employee by ID: {}", employee_id);

    let result: Result<EmployeeRow, diesel::result::Error> = employees::table
        .filter(employees::employee_id.eq(employee_id))
        .select(EmployeeRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Employee::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Checks whether an employee exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn employee_exists(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = employees::table
        .filter(employees::employee_id.eq(employee_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Returns the subset of `employee_ids` that exist.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn existing_employee_ids(
    conn: &mut SqliteConnection,
    employee_ids: &[i64],
) -> Result<Vec<i64>, PersistenceError> {
    if employee_ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(employees::table
        .filter(employees::employee_id.eq_any(employee_ids))
        .select(employees::employee_id)
        .load(conn)?)
}

/// Finds the employee holding an email address, ignoring `exclude`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_employee_id_by_email(
    conn: &mut SqliteConnection,
    email: &str,
    exclude: Option<i64>,
) -> Result<Option<i64>, PersistenceError> {
    let mut query = employees::table
        .filter(employees::email.eq(email.to_string()))
        .select(employees::employee_id)
        .into_boxed();
    if let Some(exclude) = exclude {
        query = query.filter(employees::employee_id.ne(exclude));
    }
    Ok(query.first::<i64>(conn).optional()?)
}

fn filtered<'a>(
    filter: EmployeeFilter,
    pattern: Option<&str>,
) -> employees::BoxedQuery<'a, Sqlite> {
    let mut query = employees::table.into_boxed();
    if let Some(department_id) = filter.department_id {
        query = query.filter(employees::department_id.eq(department_id));
    }
    if let Some(status) = filter.employment_status {
        query = query.filter(employees::employment_status.eq(status.as_str()));
    }
    if let Some(pattern) = pattern {
        query = query.filter(
            matches_pattern!(employees::first_name, pattern)
                .or(matches_pattern!(employees::last_name, pattern))
                .or(matches_pattern!(employees::email, pattern))
                .or(matches_pattern!(employees::position, pattern)),
        );
    }
    query
}

/// Lists employees matching the filter and search term.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_employees(
    conn: &mut SqliteConnection,
    filter: EmployeeFilter,
    options: &ListOptions<EmployeeSortKey>,
) -> Result<Page<Employee>, PersistenceError> {
    let pattern: Option<String> = options.search_pattern();
    debug!(?filter, ?pattern, sort = options.sort.as_str(), "Listing employees");

    let total: i64 = filtered(filter, pattern.as_deref())
        .count()
        .get_result(conn)?;

    let query = filtered(filter, pattern.as_deref()).select(EmployeeRow::as_select());
    let tiebreak = employees::employee_id;
    let query = match options.sort {
        EmployeeSortKey::LastName => {
            apply_order!(query, employees::last_name, options.order, tiebreak)
        }
        EmployeeSortKey::FirstName => {
            apply_order!(query, employees::first_name, options.order, tiebreak)
        }
        EmployeeSortKey::Email => apply_order!(query, employees::email, options.order, tiebreak),
        EmployeeSortKey::Position => {
            apply_order!(query, employees::position, options.order, tiebreak)
        }
        EmployeeSortKey::HireDate => {
            apply_order!(query, employees::hire_date, options.order, tiebreak)
        }
        EmployeeSortKey::CreatedAt => {
            apply_order!(query, employees::created_at, options.order, tiebreak)
        }
    };

    let rows: Vec<EmployeeRow> = query
        .limit(options.page.limit())
        .offset(options.page.offset())
        .load(conn)?;

    let items: Vec<Employee> = rows
        .into_iter()
        .map(Employee::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Page::new(items, total, options.page))
}

/// Counts parent egg migrations performed by an employee.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_egg_migrations_for_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(parent_egg_migrations::table
        .filter(parent_egg_migrations::employee_id.eq(employee_id))
        .count()
        .get_result(conn)?)
}
