// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hatchery operation queries: fish pools, lab boxes and parent egg
//! migrations between them.

use aquahr_domain::{EggMigrationSortKey, FishPool, LabBox, Page, ParentEggMigration};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use tracing::debug;

use crate::data_models::{EggMigrationFilter, EggMigrationRow, FishPoolRow, LabBoxRow, ListOptions};
use crate::diesel_schema::{fish_pools, lab_boxes, parent_egg_migrations};
use crate::error::PersistenceError;

/// Retrieves a fish pool by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the fish pool is not found.
pub fn get_fish_pool(
    conn: &mut SqliteConnection,
    fish_pool_id: i64,
) -> Result<Option<FishPool>, PersistenceError> {
    Ok(fish_pools::table
        .filter(fish_pools::fish_pool_id.eq(fish_pool_id))
        .select(FishPoolRow::as_select())
        .first::<FishPoolRow>(conn)
        .optional()?
        .map(FishPool::from))
}

/// Lists all fish pools by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_fish_pools(conn: &mut SqliteConnection) -> Result<Vec<FishPool>, PersistenceError> {
    let rows: Vec<FishPoolRow> = fish_pools::table
        .order_by(fish_pools::name.asc())
        .select(FishPoolRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(FishPool::from).collect())
}

/// Retrieves a lab box by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the lab box is not found.
pub fn get_lab_box(
    conn: &mut SqliteConnection,
    lab_box_id: i64,
) -> Result<Option<LabBox>, PersistenceError> {
    Ok(lab_boxes::table
        .filter(lab_boxes::lab_box_id.eq(lab_box_id))
        .select(LabBoxRow::as_select())
        .first::<LabBoxRow>(conn)
        .optional()?
        .map(LabBox::from))
}

/// Lists all lab boxes by code.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_lab_boxes(conn: &mut SqliteConnection) -> Result<Vec<LabBox>, PersistenceError> {
    let rows: Vec<LabBoxRow> = lab_boxes::table
        .order_by(lab_boxes::code.asc())
        .select(LabBoxRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(LabBox::from).collect())
}

/// Counts egg migrations that use a fish pool.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_migrations_for_fish_pool(
    conn: &mut SqliteConnection,
    fish_pool_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(parent_egg_migrations::table
        .filter(parent_egg_migrations::fish_pool_id.eq(fish_pool_id))
        .count()
        .get_result(conn)?)
}

/// Counts egg migrations that use a lab box.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_migrations_for_lab_box(
    conn: &mut SqliteConnection,
    lab_box_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(parent_egg_migrations::table
        .filter(parent_egg_migrations::lab_box_id.eq(lab_box_id))
        .count()
        .get_result(conn)?)
}

/// Retrieves a parent egg migration by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored row cannot
/// be reconstructed.
/// Returns `Ok(None)` if the migration is not found.
pub fn get_egg_migration(
    conn: &mut SqliteConnection,
    migration_id: i64,
) -> Result<Option<ParentEggMigration>, PersistenceError> {
    debug!("Looking up egg migration by ID: {}", migration_id);

    let row: Option<EggMigrationRow> = parent_egg_migrations::table
        .filter(parent_egg_migrations::migration_id.eq(migration_id))
        .select(EggMigrationRow::as_select())
        .first(conn)
        .optional()?;

    row.map(ParentEggMigration::try_from).transpose()
}

fn filtered<'a>(
    filter: EggMigrationFilter,
    pattern: Option<&str>,
) -> parent_egg_migrations::BoxedQuery<'a, Sqlite> {
    let mut query = parent_egg_migrations::table.into_boxed();
    if let Some(fish_pool_id) = filter.fish_pool_id {
        query = query.filter(parent_egg_migrations::fish_pool_id.eq(fish_pool_id));
    }
    if let Some(lab_box_id) = filter.lab_box_id {
        query = query.filter(parent_egg_migrations::lab_box_id.eq(lab_box_id));
    }
    if let Some(employee_id) = filter.employee_id {
        query = query.filter(parent_egg_migrations::employee_id.eq(employee_id));
    }
    if let Some(pattern) = pattern {
        query = query.filter(matches_pattern!(parent_egg_migrations::notes, pattern));
    }
    query
}

/// Lists parent egg migrations matching the filter.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_egg_migrations(
    conn: &mut SqliteConnection,
    filter: EggMigrationFilter,
    options: &ListOptions<EggMigrationSortKey>,
) -> Result<Page<ParentEggMigration>, PersistenceError> {
    let pattern: Option<String> = options.search_pattern();
    debug!(?filter, ?pattern, sort = options.sort.as_str(), "Listing egg migrations");

    let total: i64 = filtered(filter, pattern.as_deref())
        .count()
        .get_result(conn)?;

    let query = filtered(filter, pattern.as_deref()).select(EggMigrationRow::as_select());
    let tiebreak = parent_egg_migrations::migration_id;
    let query = match options.sort {
        EggMigrationSortKey::MigrationDate => apply_order!(
            query,
            parent_egg_migrations::migration_date,
            options.order,
            tiebreak
        ),
        EggMigrationSortKey::EggCount => apply_order!(
            query,
            parent_egg_migrations::egg_count,
            options.order,
            tiebreak
        ),
    };

    let rows: Vec<EggMigrationRow> = query
        .limit(options.page.limit())
        .offset(options.page.offset())
        .load(conn)?;

    let items: Vec<ParentEggMigration> = rows
        .into_iter()
        .map(ParentEggMigration::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Page::new(items, total, options.page))
}
