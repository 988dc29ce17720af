// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Department queries.

use aquahr_domain::{Department, DepartmentSortKey, Page};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use tracing::debug;

use crate::data_models::{DepartmentRow, ListOptions};
use crate::diesel_schema::{contracts, departments, employees, jobs};
use crate::error::PersistenceError;

/// Retrieves a department by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the department is not found.
pub fn get_department(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<Option<Department>, PersistenceError> {
    debug!("Looking up department by ID: {}", department_id);

    let result: Result<DepartmentRow, diesel::result::Error> = departments::table
        .filter(departments::department_id.eq(department_id))
        .select(DepartmentRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Department::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Checks whether a department exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn department_exists(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = departments::table
        .filter(departments::department_id.eq(department_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

fn filtered<'a>(pattern: Option<&str>) -> departments::BoxedQuery<'a, Sqlite> {
    let mut query = departments::table.into_boxed();
    if let Some(pattern) = pattern {
        query = query.filter(
            matches_pattern!(departments::name, pattern)
                .or(matches_pattern!(departments::description, pattern)),
        );
    }
    query
}

/// Lists departments matching the search term.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_departments(
    conn: &mut SqliteConnection,
    options: &ListOptions<DepartmentSortKey>,
) -> Result<Page<Department>, PersistenceError> {
    let pattern: Option<String> = options.search_pattern();
    debug!(?pattern, sort = options.sort.as_str(), "Listing departments");

    let total: i64 = filtered(pattern.as_deref()).count().get_result(conn)?;

    let query = filtered(pattern.as_deref()).select(DepartmentRow::as_select());
    let query = match options.sort {
        DepartmentSortKey::Name => apply_order!(
            query,
            departments::name,
            options.order,
            departments::department_id
        ),
        DepartmentSortKey::CreatedAt => apply_order!(
            query,
            departments::created_at,
            options.order,
            departments::department_id
        ),
    };

    let rows: Vec<DepartmentRow> = query
        .limit(options.page.limit())
        .offset(options.page.offset())
        .load(conn)?;

    Ok(Page::new(
        rows.into_iter().map(Department::from).collect(),
        total,
        options.page,
    ))
}

/// Counts contracts that reference a department.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_contracts_for_department(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(contracts::table
        .filter(contracts::department_id.eq(department_id))
        .count()
        .get_result(conn)?)
}

/// Counts employees and jobs that point at a department.
///
/// These references are nulled on delete, so they never block it; the
/// count is reported in the delete log.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_soft_references_to_department(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<i64, PersistenceError> {
    let employee_count: i64 = employees::table
        .filter(employees::department_id.eq(department_id))
        .count()
        .get_result(conn)?;
    let job_count: i64 = jobs::table
        .filter(jobs::department_id.eq(department_id))
        .count()
        .get_result(conn)?;
    Ok(employee_count + job_count)
}
