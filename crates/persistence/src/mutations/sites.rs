// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Site mutations.

use aquahr_domain::Site;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::backend::sqlite::last_insert_id;
use crate::diesel_schema::{site_employees, sites};
use crate::error::PersistenceError;
use crate::mutations::{ensure_affected, require_id};

fn write_roster(
    conn: &mut SqliteConnection,
    site_id: i64,
    employee_ids: &[i64],
) -> Result<(), PersistenceError> {
    let removed: usize = diesel::delete(site_employees::table)
        .filter(site_employees::site_id.eq(site_id))
        .execute(conn)?;

    let rows: Vec<_> = employee_ids
        .iter()
        .map(|employee_id| {
            (
                site_employees::site_id.eq(site_id),
                site_employees::employee_id.eq(*employee_id),
            )
        })
        .collect();
    if !rows.is_empty() {
        diesel::insert_into(site_employees::table)
            .values(&rows)
            .execute(conn)?;
    }

    debug!(site_id, removed, added = rows.len(), "Roster written");
    Ok(())
}

/// Inserts a site with its roster and returns its ID.
///
/// # Errors
///
/// Returns `UniqueViolation` if the name is taken, `ForeignKeyViolation` if
/// a referenced employee does not exist, or another error if a statement
/// fails. Nothing is written on error.
pub fn insert_site(conn: &mut SqliteConnection, site: &Site) -> Result<i64, PersistenceError> {
    info!("Creating site: {}", site.name);

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(sites::table)
            .values((
                sites::name.eq(&site.name),
                sites::location.eq(&site.location),
                sites::description.eq(&site.description),
                sites::image_url.eq(&site.image_url),
                sites::manager_id.eq(site.manager_id),
                sites::supervisor_id.eq(site.supervisor_id),
            ))
            .execute(conn)?;

        let site_id: i64 = last_insert_id(conn)?;
        write_roster(conn, site_id, &site.employee_ids)?;

        info!(site_id, "Site created");
        Ok(site_id)
    })
}

/// Writes every column of a stored site and replaces its roster.
///
/// # Errors
///
/// Returns `NotFound` if the site does not exist, or a constraint error if
/// the new values are rejected. Nothing is written on error.
pub fn update_site(conn: &mut SqliteConnection, site: &Site) -> Result<(), PersistenceError> {
    let site_id: i64 = require_id(site.site_id, "Site")?;
    info!(site_id, "Updating site");

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let rows: usize = diesel::update(sites::table)
            .filter(sites::site_id.eq(site_id))
            .set((
                sites::name.eq(&site.name),
                sites::location.eq(&site.location),
                sites::description.eq(&site.description),
                sites::image_url.eq(&site.image_url),
                sites::manager_id.eq(site.manager_id),
                sites::supervisor_id.eq(site.supervisor_id),
            ))
            .execute(conn)?;
        ensure_affected(rows, "Site", site_id)?;

        write_roster(conn, site_id, &site.employee_ids)
    })
}

/// Replaces the roster of a site.
///
/// # Errors
///
/// Returns `NotFound` if the site does not exist, or `ForeignKeyViolation`
/// if an employee does not exist. The previous roster is kept on error.
pub fn replace_site_roster(
    conn: &mut SqliteConnection,
    site_id: i64,
    employee_ids: &[i64],
) -> Result<(), PersistenceError> {
    info!(site_id, count = employee_ids.len(), "Replacing site roster");

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let exists: i64 = sites::table
            .filter(sites::site_id.eq(site_id))
            .count()
            .get_result(conn)?;
        if exists == 0 {
            return Err(PersistenceError::NotFound(format!("Site {site_id} not found")));
        }

        write_roster(conn, site_id, employee_ids)
    })
}

/// Adds one employee to a site roster.
///
/// Adding an employee already on the roster is a no-op.
///
/// # Errors
///
/// Returns `ForeignKeyViolation` if the site or employee does not exist.
pub fn add_site_employee(
    conn: &mut SqliteConnection,
    site_id: i64,
    employee_id: i64,
) -> Result<(), PersistenceError> {
    info!(site_id, employee_id, "Assigning employee to site");

    diesel::insert_or_ignore_into(site_employees::table)
        .values((
            site_employees::site_id.eq(site_id),
            site_employees::employee_id.eq(employee_id),
        ))
        .execute(conn)?;
    Ok(())
}

/// Removes one employee from a site roster.
///
/// # Errors
///
/// Returns `NotFound` if the employee is not on the roster.
pub fn remove_site_employee(
    conn: &mut SqliteConnection,
    site_id: i64,
    employee_id: i64,
) -> Result<(), PersistenceError> {
    info!(site_id, employee_id, "Unassigning employee from site");

    let rows: usize = diesel::delete(site_employees::table)
        .filter(site_employees::site_id.eq(site_id))
        .filter(site_employees::employee_id.eq(employee_id))
        .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Employee {employee_id} is not assigned to site {site_id}"
        )));
    }
    Ok(())
}

/// Deletes a site and its roster.
///
/// # Errors
///
/// Returns `NotFound` if the site does not exist.
pub fn delete_site(conn: &mut SqliteConnection, site_id: i64) -> Result<(), PersistenceError> {
    info!(site_id, "Deleting site");

    let rows: usize = diesel::delete(sites::table)
        .filter(sites::site_id.eq(site_id))
        .execute(conn)?;

    ensure_affected(rows, "Site", site_id)
}
