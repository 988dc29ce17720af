// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hatchery operation mutations.

use aquahr_domain::{FishPool, LabBox, ParentEggMigration, format_date};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::sqlite::last_insert_id;
use crate::diesel_schema::{fish_pools, lab_boxes, parent_egg_migrations};
use crate::error::PersistenceError;
use crate::mutations::{ensure_affected, require_id};

/// Inserts a fish pool and returns its ID.
///
/// # Errors
///
/// Returns `UniqueViolation` if the name is taken.
pub fn insert_fish_pool(
    conn: &mut SqliteConnection,
    pool: &FishPool,
) -> Result<i64, PersistenceError> {
    info!("Creating fish pool: {}", pool.name);

    diesel::insert_into(fish_pools::table)
        .values((
            fish_pools::name.eq(&pool.name),
            fish_pools::capacity_liters.eq(pool.capacity_liters),
        ))
        .execute(conn)?;

    last_insert_id(conn)
}

/// Writes every column of a stored fish pool.
///
/// # Errors
///
/// Returns `NotFound` if the pool does not exist, or `UniqueViolation` if
/// the new name is taken.
pub fn update_fish_pool(
    conn: &mut SqliteConnection,
    pool: &FishPool,
) -> Result<(), PersistenceError> {
    let fish_pool_id: i64 = require_id(pool.fish_pool_id, "Fish pool")?;
    info!(fish_pool_id, "Updating fish pool");

    let rows: usize = diesel::update(fish_pools::table)
        .filter(fish_pools::fish_pool_id.eq(fish_pool_id))
        .set((
            fish_pools::name.eq(&pool.name),
            fish_pools::capacity_liters.eq(pool.capacity_liters),
        ))
        .execute(conn)?;

    ensure_affected(rows, "Fish pool", fish_pool_id)
}

/// Deletes a fish pool.
///
/// # Errors
///
/// Returns `NotFound` if the pool does not exist, or `ForeignKeyViolation`
/// while egg migrations reference it.
pub fn delete_fish_pool(
    conn: &mut SqliteConnection,
    fish_pool_id: i64,
) -> Result<(), PersistenceError> {
    info!(fish_pool_id, "Deleting fish pool");

    let rows: usize = diesel::delete(fish_pools::table)
        .filter(fish_pools::fish_pool_id.eq(fish_pool_id))
        .execute(conn)?;

    ensure_affected(rows, "Fish pool", fish_pool_id)
}

/// Inserts a lab box and returns its ID.
///
/// # Errors
///
/// Returns `UniqueViolation` if the code is taken.
pub fn insert_lab_box(
    conn: &mut SqliteConnection,
    lab_box: &LabBox,
) -> Result<i64, PersistenceError> {
    info!("Creating lab box: {}", lab_box.code);

    diesel::insert_into(lab_boxes::table)
        .values((
            lab_boxes::code.eq(&lab_box.code),
            lab_boxes::description.eq(&lab_box.description),
        ))
        .execute(conn)?;

    last_insert_id(conn)
}

/// Writes every column of a stored lab box.
///
/// # Errors
///
/// Returns `NotFound` if the box does not exist, or `UniqueViolation` if
/// the new code is taken.
pub fn update_lab_box(
    conn: &mut SqliteConnection,
    lab_box: &LabBox,
) -> Result<(), PersistenceError> {
    let lab_box_id: i64 = require_id(lab_box.lab_box_id, "Lab box")?;
    info!(lab_box_id, "Updating lab box");

    let rows: usize = diesel::update(lab_boxes::table)
        .filter(lab_boxes::lab_box_id.eq(lab_box_id))
        .set((
            lab_boxes::code.eq(&lab_box.code),
            lab_boxes::description.eq(&lab_box.description),
        ))
        .execute(conn)?;

    ensure_affected(rows, "Lab box", lab_box_id)
}

/// Deletes a lab box.
///
/// # Errors
///
/// Returns `NotFound` if the box does not exist, or `ForeignKeyViolation`
/// while egg migrations reference it.
pub fn delete_lab_box(
    conn: &mut SqliteConnection,
    lab_box_id: i64,
) -> Result<(), PersistenceError> {
    info!(lab_box_id, "Deleting lab box");

    let rows: usize = diesel::delete(lab_boxes::table)
        .filter(lab_boxes::lab_box_id.eq(lab_box_id))
        .execute(conn)?;

    ensure_affected(rows, "Lab box", lab_box_id)
}

/// Inserts a parent egg migration and returns its ID.
///
/// # Errors
///
/// Returns `ForeignKeyViolation` if the pool, box or employee does not
/// exist, or `CheckViolation` for a non-positive egg count.
pub fn insert_egg_migration(
    conn: &mut SqliteConnection,
    migration: &ParentEggMigration,
) -> Result<i64, PersistenceError> {
    info!(
        fish_pool_id = migration.fish_pool_id,
        lab_box_id = migration.lab_box_id,
        egg_count = migration.egg_count,
        "Recording parent egg migration"
    );

    diesel::insert_into(parent_egg_migrations::table)
        .values((
            parent_egg_migrations::fish_pool_id.eq(migration.fish_pool_id),
            parent_egg_migrations::lab_box_id.eq(migration.lab_box_id),
            parent_egg_migrations::employee_id.eq(migration.employee_id),
            parent_egg_migrations::migration_date.eq(format_date(migration.migration_date)),
            parent_egg_migrations::egg_count.eq(migration.egg_count),
            parent_egg_migrations::notes.eq(&migration.notes),
        ))
        .execute(conn)?;

    let migration_id: i64 = last_insert_id(conn)?;
    info!(migration_id, "Parent egg migration recorded");
    Ok(migration_id)
}

/// Writes every column of a stored parent egg migration.
///
/// # Errors
///
/// Returns `NotFound` if the migration does not exist, or a constraint
/// error if the new values are rejected.
pub fn update_egg_migration(
    conn: &mut SqliteConnection,
    migration: &ParentEggMigration,
) -> Result<(), PersistenceError> {
    let migration_id: i64 = require_id(migration.migration_id, "Parent egg migration")?;
    info!(migration_id, "Updating parent egg migration");

    let rows: usize = diesel::update(parent_egg_migrations::table)
        .filter(parent_egg_migrations::migration_id.eq(migration_id))
        .set((
            parent_egg_migrations::fish_pool_id.eq(migration.fish_pool_id),
            parent_egg_migrations::lab_box_id.eq(migration.lab_box_id),
            parent_egg_migrations::employee_id.eq(migration.employee_id),
            parent_egg_migrations::migration_date.eq(format_date(migration.migration_date)),
            parent_egg_migrations::egg_count.eq(migration.egg_count),
            parent_egg_migrations::notes.eq(&migration.notes),
        ))
        .execute(conn)?;

    ensure_affected(rows, "Parent egg migration", migration_id)
}

/// Deletes a parent egg migration.
///
/// # Errors
///
/// Returns `NotFound` if the migration does not exist.
pub fn delete_egg_migration(
    conn: &mut SqliteConnection,
    migration_id: i64,
) -> Result<(), PersistenceError> {
    info!(migration_id, "Deleting parent egg migration");

    let rows: usize = diesel::delete(parent_egg_migrations::table)
        .filter(parent_egg_migrations::migration_id.eq(migration_id))
        .execute(conn)?;

    ensure_affected(rows, "Parent egg migration", migration_id)
}
