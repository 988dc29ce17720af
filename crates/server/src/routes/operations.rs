// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hatchery catalog and parent egg migration endpoints.

use aquahr_api::{
    CreateEggMigrationRequest, CreateFishPoolRequest, CreateLabBoxRequest, DeleteResponse,
    EggMigrationListQuery, UpdateEggMigrationRequest, UpdateFishPoolRequest, UpdateLabBoxRequest,
    create_egg_migration, create_fish_pool, create_lab_box, delete_egg_migration,
    delete_fish_pool, delete_lab_box, get_egg_migration, get_fish_pool, get_lab_box,
    list_egg_migrations, list_fish_pools, list_lab_boxes, update_egg_migration, update_fish_pool,
    update_lab_box,
};
use aquahr_domain::{FishPool, LabBox, Page, ParentEggMigration};
use axum::{
    Json,
    extract::{Path, State as AxumState},
    http::StatusCode,
};
use tracing::{debug, info};

use super::{AppState, today};
use crate::error::{HttpError, JsonBody, QueryParams};

// ============================================================================
// Fish pools
// ============================================================================

/// Handler for POST `/fish-pools`.
pub(super) async fn handle_create_fish_pool(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<CreateFishPoolRequest>,
) -> Result<(StatusCode, Json<FishPool>), HttpError> {
    info!(name = %req.name, "Handling create_fish_pool request");

    let mut persistence = app_state.persistence.lock().await;
    let pool: FishPool = create_fish_pool(&mut persistence, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(pool)))
}

/// Handler for GET `/fish-pools`.
pub(super) async fn handle_list_fish_pools(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<FishPool>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let pools: Vec<FishPool> = list_fish_pools(&mut persistence)?;
    drop(persistence);

    Ok(Json(pools))
}

/// Handler for GET `/fish-pools/{id}`.
pub(super) async fn handle_get_fish_pool(
    AxumState(app_state): AxumState<AppState>,
    Path(fish_pool_id): Path<i64>,
) -> Result<Json<FishPool>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let pool: FishPool = get_fish_pool(&mut persistence, fish_pool_id)?;
    drop(persistence);

    Ok(Json(pool))
}

/// Handler for PUT/PATCH `/fish-pools/{id}`.
pub(super) async fn handle_update_fish_pool(
    AxumState(app_state): AxumState<AppState>,
    Path(fish_pool_id): Path<i64>,
    JsonBody(req): JsonBody<UpdateFishPoolRequest>,
) -> Result<Json<FishPool>, HttpError> {
    info!(fish_pool_id, "Handling update_fish_pool request");

    let mut persistence = app_state.persistence.lock().await;
    let pool: FishPool = update_fish_pool(&mut persistence, fish_pool_id, &req)?;
    drop(persistence);

    Ok(Json(pool))
}

/// Handler for DELETE `/fish-pools/{id}`.
pub(super) async fn handle_delete_fish_pool(
    AxumState(app_state): AxumState<AppState>,
    Path(fish_pool_id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(fish_pool_id, "Handling delete_fish_pool request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse = delete_fish_pool(&mut persistence, fish_pool_id)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Lab boxes
// ============================================================================

/// Handler for POST `/lab-boxes`.
pub(super) async fn handle_create_lab_box(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<CreateLabBoxRequest>,
) -> Result<(StatusCode, Json<LabBox>), HttpError> {
    info!(code = %req.code, "Handling create_lab_box request");

    let mut persistence = app_state.persistence.lock().await;
    let lab_box: LabBox = create_lab_box(&mut persistence, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(lab_box)))
}

/// Handler for GET `/lab-boxes`.
pub(super) async fn handle_list_lab_boxes(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<LabBox>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let boxes: Vec<LabBox> = list_lab_boxes(&mut persistence)?;
    drop(persistence);

    Ok(Json(boxes))
}

/// Handler for GET `/lab-boxes/{id}`.
pub(super) async fn handle_get_lab_box(
    AxumState(app_state): AxumState<AppState>,
    Path(lab_box_id): Path<i64>,
) -> Result<Json<LabBox>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let lab_box: LabBox = get_lab_box(&mut persistence, lab_box_id)?;
    drop(persistence);

    Ok(Json(lab_box))
}

/// Handler for PUT/PATCH `/lab-boxes/{id}`.
pub(super) async fn handle_update_lab_box(
    AxumState(app_state): AxumState<AppState>,
    Path(lab_box_id): Path<i64>,
    JsonBody(req): JsonBody<UpdateLabBoxRequest>,
) -> Result<Json<LabBox>, HttpError> {
    info!(lab_box_id, "Handling update_lab_box request");

    let mut persistence = app_state.persistence.lock().await;
    let lab_box: LabBox = update_lab_box(&mut persistence, lab_box_id, &req)?;
    drop(persistence);

    Ok(Json(lab_box))
}

/// Handler for DELETE `/lab-boxes/{id}`.
pub(super) async fn handle_delete_lab_box(
    AxumState(app_state): AxumState<AppState>,
    Path(lab_box_id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(lab_box_id, "Handling delete_lab_box request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse = delete_lab_box(&mut persistence, lab_box_id)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Parent egg migrations
// ============================================================================

/// Handler for POST `/parent-egg-migrations`.
pub(super) async fn handle_create_egg_migration(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<CreateEggMigrationRequest>,
) -> Result<(StatusCode, Json<ParentEggMigration>), HttpError> {
    info!(
        fish_pool_id = req.fish_pool_id,
        lab_box_id = req.lab_box_id,
        egg_count = req.egg_count,
        "Handling create_egg_migration request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let migration: ParentEggMigration = create_egg_migration(&mut persistence, &req, today())?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(migration)))
}

/// Handler for GET `/parent-egg-migrations`.
pub(super) async fn handle_list_egg_migrations(
    AxumState(app_state): AxumState<AppState>,
    QueryParams(query): QueryParams<EggMigrationListQuery>,
) -> Result<Json<Page<ParentEggMigration>>, HttpError> {
    debug!(?query, "Handling list_egg_migrations request");

    let mut persistence = app_state.persistence.lock().await;
    let page: Page<ParentEggMigration> = list_egg_migrations(&mut persistence, &query)?;
    drop(persistence);

    Ok(Json(page))
}

/// Handler for GET `/parent-egg-migrations/{id}`.
pub(super) async fn handle_get_egg_migration(
    AxumState(app_state): AxumState<AppState>,
    Path(migration_id): Path<i64>,
) -> Result<Json<ParentEggMigration>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let migration: ParentEggMigration = get_egg_migration(&mut persistence, migration_id)?;
    drop(persistence);

    Ok(Json(migration))
}

/// Handler for PUT/PATCH `/parent-egg-migrations/{id}`.
pub(super) async fn handle_update_egg_migration(
    AxumState(app_state): AxumState<AppState>,
    Path(migration_id): Path<i64>,
    JsonBody(req): JsonBody<UpdateEggMigrationRequest>,
) -> Result<Json<ParentEggMigration>, HttpError> {
    info!(migration_id, "Handling update_egg_migration request");

    let mut persistence = app_state.persistence.lock().await;
    let migration: ParentEggMigration =
        update_egg_migration(&mut persistence, migration_id, &req, today())?;
    drop(persistence);

    Ok(Json(migration))
}

/// Handler for DELETE `/parent-egg-migrations/{id}`.
pub(super) async fn handle_delete_egg_migration(
    AxumState(app_state): AxumState<AppState>,
    Path(migration_id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(migration_id, "Handling delete_egg_migration request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse = delete_egg_migration(&mut persistence, migration_id)?;
    drop(persistence);

    Ok(Json(response))
}
