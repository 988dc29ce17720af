// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Site queries.
//!
//! A site row carries manager and supervisor; the roster is read from
//! `site_employees` and attached to the returned value.

use std::collections::HashMap;

use aquahr_domain::{Page, Site, SiteSortKey};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use tracing::debug;

use crate::data_models::{ListOptions, SiteRow};
use crate::diesel_schema::{site_employees, sites};
use crate::error::PersistenceError;

fn site_from_row(row: SiteRow, employee_ids: Vec<i64>) -> Site {
    Site {
        site_id: Some(row.site_id),
        name: row.name,
        location: row.location,
        description: row.description,
        image_url: row.image_url,
        manager_id: row.manager_id,
        supervisor_id: row.supervisor_id,
        employee_ids,
        created_at: Some(row.created_at),
    }
}

/// Retrieves the roster of a site in ascending employee order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_site_roster(
    conn: &mut SqliteConnection,
    site_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    Ok(site_employees::table
        .filter(site_employees::site_id.eq(site_id))
        .order_by(site_employees::employee_id.asc())
        .select(site_employees::employee_id)
        .load(conn)?)
}

/// Retrieves a site and its roster by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the site is not found.
pub fn get_site(
    conn: &mut SqliteConnection,
    site_id: i64,
) -> Result<Option<Site>, PersistenceError> {
    debug!("Looking up site by ID: {}", site_id);

    let result: Result<SiteRow, diesel::result::Error> = sites::table
        .filter(sites::site_id.eq(site_id))
        .select(SiteRow::as_select())
        .first(conn);

    match result {
        Ok(row) => {
            let roster: Vec<i64> = get_site_roster(conn, site_id)?;
            Ok(Some(site_from_row(row, roster)))
        }
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

fn filtered<'a>(pattern: Option<&str>) -> sites::BoxedQuery<'a, Sqlite> {
    let mut query = sites::table.into_boxed();
    if let Some(pattern) = pattern {
        query = query.filter(
            matches_pattern!(sites::name, pattern)
                .or(matches_pattern!(sites::location, pattern))
                .or(matches_pattern!(sites::description, pattern)),
        );
    }
    query
}

/// Lists sites matching the search term, each with its roster.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_sites(
    conn: &mut SqliteConnection,
    options: &ListOptions<SiteSortKey>,
) -> Result<Page<Site>, PersistenceError> {
    let pattern: Option<String> = options.search_pattern();
    debug!(?pattern, sort = options.sort.as_str(), "Listing sites");

    let total: i64 = filtered(pattern.as_deref()).count().get_result(conn)?;

    let query = filtered(pattern.as_deref()).select(SiteRow::as_select());
    let query = match options.sort {
        SiteSortKey::Name => apply_order!(query, sites::name, options.order, sites::site_id),
        SiteSortKey::CreatedAt => {
            apply_order!(query, sites::created_at, options.order, sites::site_id)
        }
    };

    let rows: Vec<SiteRow> = query
        .limit(options.page.limit())
        .offset(options.page.offset())
        .load(conn)?;

    let site_ids: Vec<i64> = rows.iter().map(|r| r.site_id).collect();
    let pairs: Vec<(i64, i64)> = site_employees::table
        .filter(site_employees::site_id.eq_any(&site_ids))
        .order_by((site_employees::site_id, site_employees::employee_id))
        .select((site_employees::site_id, site_employees::employee_id))
        .load(conn)?;

    let mut rosters: HashMap<i64, Vec<i64>> = HashMap::new();
    for (site_id, employee_id) in pairs {
        rosters.entry(site_id).or_default().push(employee_id);
    }

    let items: Vec<Site> = rows
        .into_iter()
        .map(|row| {
            let roster: Vec<i64> = rosters.remove(&row.site_id).unwrap_or_default();
            site_from_row(row, roster)
        })
        .collect();

    Ok(Page::new(items, total, options.page))
}

/// Returns the IDs of sites whose roster, manager or supervisor slot
/// includes the employee.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn sites_for_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    let mut ids: Vec<i64> = site_employees::table
        .filter(site_employees::employee_id.eq(employee_id))
        .select(site_employees::site_id)
        .load(conn)?;
    let led: Vec<i64> = sites::table
        .filter(
            sites::manager_id
                .eq(employee_id)
                .or(sites::supervisor_id.eq(employee_id)),
        )
        .select(sites::site_id)
        .load(conn)?;
    ids.extend(led);
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}
