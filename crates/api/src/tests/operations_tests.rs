// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use aquahr_domain::{FishPool, LabBox, Page, ParentEggMigration};
use aquahr_persistence::Persistence;

use super::helpers::{seed_employee, setup, today};
use crate::{
    ApiError, CreateEggMigrationRequest, CreateFishPoolRequest, CreateLabBoxRequest,
    EggMigrationListQuery, UpdateEggMigrationRequest, UpdateFishPoolRequest, UpdateLabBoxRequest,
    create_egg_migration, create_fish_pool, create_lab_box, delete_egg_migration, delete_employee,
    delete_fish_pool, delete_lab_box, get_egg_migration, get_fish_pool, list_egg_migrations,
    list_fish_pools, list_lab_boxes, update_egg_migration, update_fish_pool, update_lab_box,
};

/// Seeds a pool, a box and an employee, returning their IDs.
fn seed_references(persistence: &mut Persistence) -> (i64, i64, i64) {
    let pool: FishPool = create_fish_pool(
        persistence,
        &CreateFishPoolRequest {
            name: String::from("Pool 1"),
            capacity_liters: Some(12_000),
        },
    )
    .unwrap();
    let lab_box: LabBox = create_lab_box(
        persistence,
        &CreateLabBoxRequest {
            code: String::from("BX-01"),
            description: None,
        },
    )
    .unwrap();
    let employee_id: i64 = seed_employee(persistence, "tech@example.com");
    (
        pool.fish_pool_id.unwrap(),
        lab_box.lab_box_id.unwrap(),
        employee_id,
    )
}

fn migration_request(pool: i64, lab_box: i64, employee: i64) -> CreateEggMigrationRequest {
    CreateEggMigrationRequest {
        fish_pool_id: pool,
        lab_box_id: lab_box,
        employee_id: employee,
        migration_date: String::from("2026-05-20"),
        egg_count: 25_000,
        notes: Some(String::from("Morning transfer")),
    }
}

#[test]
fn test_fish_pool_catalog() {
    let mut persistence = setup();
    create_fish_pool(
        &mut persistence,
        &CreateFishPoolRequest {
            name: String::from("Pool B"),
            capacity_liters: None,
        },
    )
    .unwrap();
    let pool_a: FishPool = create_fish_pool(
        &mut persistence,
        &CreateFishPoolRequest {
            name: String::from("Pool A"),
            capacity_liters: Some(8_000),
        },
    )
    .unwrap();

    let pools: Vec<FishPool> = list_fish_pools(&mut persistence).unwrap();
    assert_eq!(pools.len(), 2);
    assert_eq!(pools[0].name, "Pool A");
    assert_eq!(
        get_fish_pool(&mut persistence, pool_a.fish_pool_id.unwrap()).unwrap(),
        pool_a
    );

    let err: ApiError = create_fish_pool(
        &mut persistence,
        &CreateFishPoolRequest {
            name: String::from("pool a"),
            capacity_liters: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Conflict { .. }));

    let err: ApiError = create_fish_pool(
        &mut persistence,
        &CreateFishPoolRequest {
            name: String::from("Pool C"),
            capacity_liters: Some(0),
        },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "capacity_liters"));
}

#[test]
fn test_lab_box_catalog() {
    let mut persistence = setup();
    for code in ["BX-02", "BX-01"] {
        create_lab_box(
            &mut persistence,
            &CreateLabBoxRequest {
                code: code.to_string(),
                description: None,
            },
        )
        .unwrap();
    }

    let boxes: Vec<LabBox> = list_lab_boxes(&mut persistence).unwrap();
    assert_eq!(
        boxes.iter().map(|b| b.code.as_str()).collect::<Vec<_>>(),
        vec!["BX-01", "BX-02"]
    );
}

#[test]
fn test_update_catalog_entries_preserve_unspecified_fields() {
    let mut persistence = setup();
    let (pool, lab_box, _) = seed_references(&mut persistence);

    let renamed: FishPool = update_fish_pool(
        &mut persistence,
        pool,
        &UpdateFishPoolRequest {
            name: Some(String::from("  Broodstock Pool ")),
            ..UpdateFishPoolRequest::default()
        },
    )
    .unwrap();
    assert_eq!(renamed.name, "Broodstock Pool");
    assert_eq!(renamed.capacity_liters, Some(12_000));

    let described: LabBox = update_lab_box(
        &mut persistence,
        lab_box,
        &UpdateLabBoxRequest {
            description: Some(Some(String::from("Incubator shelf 2"))),
            ..UpdateLabBoxRequest::default()
        },
    )
    .unwrap();
    assert_eq!(described.code, "BX-01");
    assert_eq!(described.description.as_deref(), Some("Incubator shelf 2"));

    let err: ApiError = update_lab_box(
        &mut persistence,
        9_999,
        &UpdateLabBoxRequest::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_create_migration_then_get_returns_same_fields() {
    let mut persistence = setup();
    let (pool, lab_box, employee) = seed_references(&mut persistence);

    let created: ParentEggMigration = create_egg_migration(
        &mut persistence,
        &migration_request(pool, lab_box, employee),
        today(),
    )
    .unwrap();
    let fetched: ParentEggMigration =
        get_egg_migration(&mut persistence, created.migration_id.unwrap()).unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.egg_count, 25_000);
    assert_eq!(fetched.notes.as_deref(), Some("Morning transfer"));
}

#[test]
fn test_create_migration_checks_each_reference() {
    let mut persistence = setup();
    let (pool, lab_box, employee) = seed_references(&mut persistence);

    for (request, field) in [
        (migration_request(77, lab_box, employee), "fish_pool_id"),
        (migration_request(pool, 77, employee), "lab_box_id"),
        (migration_request(pool, lab_box, 77), "employee_id"),
    ] {
        let err: ApiError = create_egg_migration(&mut persistence, &request, today()).unwrap_err();
        assert!(
            matches!(err, ApiError::InvalidInput { field: ref f, .. } if f == field),
            "expected {field} to be rejected, got {err:?}"
        );
    }
}

#[test]
fn test_create_migration_rejects_future_date_and_zero_eggs() {
    let mut persistence = setup();
    let (pool, lab_box, employee) = seed_references(&mut persistence);

    let mut request: CreateEggMigrationRequest = migration_request(pool, lab_box, employee);
    request.migration_date = String::from("2026-06-02");
    let err: ApiError = create_egg_migration(&mut persistence, &request, today()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "migration_date"));

    let mut request: CreateEggMigrationRequest = migration_request(pool, lab_box, employee);
    request.egg_count = 0;
    let err: ApiError = create_egg_migration(&mut persistence, &request, today()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "egg_count"));
}

#[test]
fn test_update_migration_preserves_unspecified_fields() {
    let mut persistence = setup();
    let (pool, lab_box, employee) = seed_references(&mut persistence);
    let created: ParentEggMigration = create_egg_migration(
        &mut persistence,
        &migration_request(pool, lab_box, employee),
        today(),
    )
    .unwrap();

    let updated: ParentEggMigration = update_egg_migration(
        &mut persistence,
        created.migration_id.unwrap(),
        &UpdateEggMigrationRequest {
            egg_count: Some(30_000),
            notes: Some(None),
            ..UpdateEggMigrationRequest::default()
        },
        today(),
    )
    .unwrap();

    assert_eq!(updated.egg_count, 30_000);
    assert_eq!(updated.notes, None);
    assert_eq!(updated.migration_date, created.migration_date);
    assert_eq!(updated.fish_pool_id, pool);
}

#[test]
fn test_referenced_catalog_entries_and_employee_cannot_be_deleted() {
    let mut persistence = setup();
    let (pool, lab_box, employee) = seed_references(&mut persistence);
    let migration: ParentEggMigration = create_egg_migration(
        &mut persistence,
        &migration_request(pool, lab_box, employee),
        today(),
    )
    .unwrap();

    assert!(matches!(
        delete_fish_pool(&mut persistence, pool),
        Err(ApiError::Conflict { .. })
    ));
    assert!(matches!(
        delete_lab_box(&mut persistence, lab_box),
        Err(ApiError::Conflict { .. })
    ));
    assert!(matches!(
        delete_employee(&mut persistence, employee),
        Err(ApiError::Conflict { .. })
    ));

    delete_egg_migration(&mut persistence, migration.migration_id.unwrap()).unwrap();
    delete_fish_pool(&mut persistence, pool).unwrap();
    delete_lab_box(&mut persistence, lab_box).unwrap();
    assert!(list_fish_pools(&mut persistence).unwrap().is_empty());
}

#[test]
fn test_list_migrations_filters_by_pool() {
    let mut persistence = setup();
    let (pool, lab_box, employee) = seed_references(&mut persistence);
    let other_pool: i64 = create_fish_pool(
        &mut persistence,
        &CreateFishPoolRequest {
            name: String::from("Pool 2"),
            capacity_liters: None,
        },
    )
    .unwrap()
    .fish_pool_id
    .unwrap();
    create_egg_migration(
        &mut persistence,
        &migration_request(pool, lab_box, employee),
        today(),
    )
    .unwrap();
    create_egg_migration(
        &mut persistence,
        &migration_request(other_pool, lab_box, employee),
        today(),
    )
    .unwrap();

    let page: Page<ParentEggMigration> = list_egg_migrations(
        &mut persistence,
        &EggMigrationListQuery {
            fish_pool_id: Some(other_pool),
            ..EggMigrationListQuery::default()
        },
    )
    .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].fish_pool_id, other_pool);

    let page: Page<ParentEggMigration> = list_egg_migrations(
        &mut persistence,
        &EggMigrationListQuery {
            lab_box_id: Some(lab_box),
            ..EggMigrationListQuery::default()
        },
    )
    .unwrap();
    assert_eq!(page.total, 2);
}
