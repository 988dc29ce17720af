// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hatchery operation handlers: fish pools, lab boxes and parent egg
//! migrations between them.

use aquahr_domain::{
    EggMigrationSortKey, FishPool, LabBox, Page, ParentEggMigration, normalize_optional,
    parse_date, validate_egg_migration, validate_fish_pool, validate_lab_box,
};
use aquahr_persistence::{EggMigrationFilter, ListOptions, Persistence};
use time::Date;
use tracing::{debug, info};

use super::{list_options, map_unique, require_employee};
use crate::error::ApiError;
use crate::request_response::{
    CreateEggMigrationRequest, CreateFishPoolRequest, CreateLabBoxRequest, DeleteResponse,
    EggMigrationListQuery, UpdateEggMigrationRequest, UpdateFishPoolRequest, UpdateLabBoxRequest,
};

// ============================================================================
// Fish pools
// ============================================================================

/// Creates a fish pool.
///
/// # Errors
///
/// Returns an error if a field is invalid or the name is taken.
pub fn create_fish_pool(
    persistence: &mut Persistence,
    request: &CreateFishPoolRequest,
) -> Result<FishPool, ApiError> {
    let pool: FishPool = FishPool {
        fish_pool_id: None,
        name: request.name.trim().to_string(),
        capacity_liters: request.capacity_liters,
    };
    validate_fish_pool(&pool)?;

    let fish_pool_id: i64 = persistence.create_fish_pool(&pool).map_err(|e| {
        map_unique(
            e,
            "unique_fish_pool_name",
            format!("Fish pool '{}' already exists", pool.name),
        )
    })?;

    info!(fish_pool_id, name = %pool.name, "Created fish pool");
    get_fish_pool(persistence, fish_pool_id)
}

/// Retrieves a fish pool.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the pool does not exist.
pub fn get_fish_pool(
    persistence: &mut Persistence,
    fish_pool_id: i64,
) -> Result<FishPool, ApiError> {
    persistence
        .get_fish_pool(fish_pool_id)?
        .ok_or_else(|| ApiError::not_found("Fish pool", fish_pool_id))
}

/// Lists all fish pools by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_fish_pools(persistence: &mut Persistence) -> Result<Vec<FishPool>, ApiError> {
    Ok(persistence.list_fish_pools()?)
}

/// Updates a fish pool. Fields absent from the request are preserved.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the pool does not exist, or an error if
/// the patched pool is invalid or its name is taken.
pub fn update_fish_pool(
    persistence: &mut Persistence,
    fish_pool_id: i64,
    request: &UpdateFishPoolRequest,
) -> Result<FishPool, ApiError> {
    let mut pool: FishPool = get_fish_pool(persistence, fish_pool_id)?;

    if let Some(name) = &request.name {
        pool.name = name.trim().to_string();
    }
    if let Some(capacity_liters) = request.capacity_liters {
        pool.capacity_liters = capacity_liters;
    }
    validate_fish_pool(&pool)?;

    persistence.update_fish_pool(&pool).map_err(|e| {
        map_unique(
            e,
            "unique_fish_pool_name",
            format!("Fish pool '{}' already exists", pool.name),
        )
    })?;

    info!(fish_pool_id, "Updated fish pool");
    get_fish_pool(persistence, fish_pool_id)
}

/// Deletes a fish pool.
///
/// # Errors
///
/// Returns `Conflict` while egg migrations reference the pool.
pub fn delete_fish_pool(
    persistence: &mut Persistence,
    fish_pool_id: i64,
) -> Result<DeleteResponse, ApiError> {
    get_fish_pool(persistence, fish_pool_id)?;

    let migrations: i64 = persistence.count_migrations_for_fish_pool(fish_pool_id)?;
    if migrations > 0 {
        return Err(ApiError::Conflict {
            rule: String::from("fish_pool_in_use"),
            message: format!(
                "Fish pool {fish_pool_id} is referenced by {migrations} egg migration(s)"
            ),
        });
    }

    persistence.delete_fish_pool(fish_pool_id)?;
    info!(fish_pool_id, "Deleted fish pool");
    Ok(DeleteResponse {
        id: fish_pool_id,
        message: format!("Fish pool {fish_pool_id} deleted"),
    })
}

// ============================================================================
// Lab boxes
// ============================================================================

/// Creates a lab box.
///
/// # Errors
///
/// Returns an error if the code is invalid or taken.
pub fn create_lab_box(
    persistence: &mut Persistence,
    request: &CreateLabBoxRequest,
) -> Result<LabBox, ApiError> {
    let lab_box: LabBox = LabBox {
        lab_box_id: None,
        code: request.code.trim().to_string(),
        description: normalize_optional(request.description.clone()),
    };
    validate_lab_box(&lab_box)?;

    let lab_box_id: i64 = persistence.create_lab_box(&lab_box).map_err(|e| {
        map_unique(
            e,
            "unique_lab_box_code",
            format!("Lab box '{}' already exists", lab_box.code),
        )
    })?;

    info!(lab_box_id, code = %lab_box.code, "Created lab box");
    get_lab_box(persistence, lab_box_id)
}

/// Retrieves a lab box.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the box does not exist.
pub fn get_lab_box(persistence: &mut Persistence, lab_box_id: i64) -> Result<LabBox, ApiError> {
    persistence
        .get_lab_box(lab_box_id)?
        .ok_or_else(|| ApiError::not_found("Lab box", lab_box_id))
}

/// Lists all lab boxes by code.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_lab_boxes(persistence: &mut Persistence) -> Result<Vec<LabBox>, ApiError> {
    Ok(persistence.list_lab_boxes()?)
}

/// Updates a lab box. Fields absent from the request are preserved.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the box does not exist, or an error if
/// the patched code is invalid or taken.
pub fn update_lab_box(
    persistence: &mut Persistence,
    lab_box_id: i64,
    request: &UpdateLabBoxRequest,
) -> Result<LabBox, ApiError> {
    let mut lab_box: LabBox = get_lab_box(persistence, lab_box_id)?;

    if let Some(code) = &request.code {
        lab_box.code = code.trim().to_string();
    }
    if let Some(description) = &request.description {
        lab_box.description = normalize_optional(description.clone());
    }
    validate_lab_box(&lab_box)?;

    persistence.update_lab_box(&lab_box).map_err(|e| {
        map_unique(
            e,
            "unique_lab_box_code",
            format!("Lab box '{}' already exists", lab_box.code),
        )
    })?;

    info!(lab_box_id, "Updated lab box");
    get_lab_box(persistence, lab_box_id)
}

/// Deletes a lab box.
///
/// # Errors
///
/// Returns `Conflict` while egg migrations reference the box.
pub fn delete_lab_box(
    persistence: &mut Persistence,
    lab_box_id: i64,
) -> Result<DeleteResponse, ApiError> {
    get_lab_box(persistence, lab_box_id)?;

    let migrations: i64 = persistence.count_migrations_for_lab_box(lab_box_id)?;
    if migrations > 0 {
        return Err(ApiError::Conflict {
            rule: String::from("lab_box_in_use"),
            message: format!("Lab box {lab_box_id} is referenced by {migrations} egg migration(s)"),
        });
    }

    persistence.delete_lab_box(lab_box_id)?;
    info!(lab_box_id, "Deleted lab box");
    Ok(DeleteResponse {
        id: lab_box_id,
        message: format!("Lab box {lab_box_id} deleted"),
    })
}

// ============================================================================
// Parent egg migrations
// ============================================================================

fn require_migration_references(
    persistence: &mut Persistence,
    migration: &ParentEggMigration,
) -> Result<(), ApiError> {
    if persistence.get_fish_pool(migration.fish_pool_id)?.is_none() {
        return Err(ApiError::unknown_reference(
            "fish_pool_id",
            "Fish pool",
            migration.fish_pool_id,
        ));
    }
    if persistence.get_lab_box(migration.lab_box_id)?.is_none() {
        return Err(ApiError::unknown_reference(
            "lab_box_id",
            "Lab box",
            migration.lab_box_id,
        ));
    }
    require_employee(persistence, "employee_id", migration.employee_id)
}

/// Records a parent egg migration.
///
/// # Errors
///
/// Returns an error if a field is invalid, the date is in the future, or
/// the pool, box or employee does not exist.
pub fn create_egg_migration(
    persistence: &mut Persistence,
    request: &CreateEggMigrationRequest,
    today: Date,
) -> Result<ParentEggMigration, ApiError> {
    let migration: ParentEggMigration = ParentEggMigration {
        migration_id: None,
        fish_pool_id: request.fish_pool_id,
        lab_box_id: request.lab_box_id,
        employee_id: request.employee_id,
        migration_date: parse_date("migration_date", &request.migration_date)?,
        egg_count: request.egg_count,
        notes: normalize_optional(request.notes.clone()),
        created_at: None,
    };
    validate_egg_migration(&migration, today)?;
    require_migration_references(persistence, &migration)?;

    let migration_id: i64 = persistence.create_egg_migration(&migration)?;
    info!(
        migration_id,
        fish_pool_id = migration.fish_pool_id,
        lab_box_id = migration.lab_box_id,
        egg_count = migration.egg_count,
        "Recorded egg migration"
    );
    get_egg_migration(persistence, migration_id)
}

/// Retrieves a parent egg migration.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the record does not exist.
pub fn get_egg_migration(
    persistence: &mut Persistence,
    migration_id: i64,
) -> Result<ParentEggMigration, ApiError> {
    persistence
        .get_egg_migration(migration_id)?
        .ok_or_else(|| ApiError::not_found("Egg migration", migration_id))
}

/// Lists parent egg migrations.
///
/// # Errors
///
/// Returns an error if the query parameters are invalid.
pub fn list_egg_migrations(
    persistence: &mut Persistence,
    query: &EggMigrationListQuery,
) -> Result<Page<ParentEggMigration>, ApiError> {
    let options: ListOptions<EggMigrationSortKey> = list_options(
        query.search.as_deref(),
        query.sort.as_deref(),
        query.order.as_deref(),
        query.page,
        query.per_page,
    )?;
    let filter: EggMigrationFilter = EggMigrationFilter {
        fish_pool_id: query.fish_pool_id,
        lab_box_id: query.lab_box_id,
        employee_id: query.employee_id,
    };

    let page: Page<ParentEggMigration> = persistence.list_egg_migrations(filter, &options)?;
    debug!(total = page.total, "Listed egg migrations");
    Ok(page)
}

/// Applies a partial update to a parent egg migration.
///
/// # Errors
///
/// Returns an error if the record does not exist, a field is invalid, or a
/// new reference does not exist.
pub fn update_egg_migration(
    persistence: &mut Persistence,
    migration_id: i64,
    request: &UpdateEggMigrationRequest,
    today: Date,
) -> Result<ParentEggMigration, ApiError> {
    let mut migration: ParentEggMigration = get_egg_migration(persistence, migration_id)?;

    if let Some(fish_pool_id) = request.fish_pool_id {
        migration.fish_pool_id = fish_pool_id;
    }
    if let Some(lab_box_id) = request.lab_box_id {
        migration.lab_box_id = lab_box_id;
    }
    if let Some(employee_id) = request.employee_id {
        migration.employee_id = employee_id;
    }
    if let Some(migration_date) = &request.migration_date {
        migration.migration_date = parse_date("migration_date", migration_date)?;
    }
    if let Some(egg_count) = request.egg_count {
        migration.egg_count = egg_count;
    }
    if let Some(notes) = &request.notes {
        migration.notes = normalize_optional(notes.clone());
    }
    validate_egg_migration(&migration, today)?;
    require_migration_references(persistence, &migration)?;

    persistence.update_egg_migration(&migration)?;
    info!(migration_id, "Updated egg migration");
    get_egg_migration(persistence, migration_id)
}

/// Deletes a parent egg migration.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the record does not exist.
pub fn delete_egg_migration(
    persistence: &mut Persistence,
    migration_id: i64,
) -> Result<DeleteResponse, ApiError> {
    get_egg_migration(persistence, migration_id)?;
    persistence.delete_egg_migration(migration_id)?;

    info!(migration_id, "Deleted egg migration");
    Ok(DeleteResponse {
        id: migration_id,
        message: format!("Egg migration {migration_id} deleted"),
    })
}
