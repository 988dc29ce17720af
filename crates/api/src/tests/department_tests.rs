// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use aquahr_domain::{Department, Page};

use super::helpers::{
    contract_request, department_request, seed_department, seed_employee, setup, today,
};
use crate::{
    ApiError, CreateDepartmentRequest, DepartmentListQuery, UpdateDepartmentRequest,
    UpdateEmployeeRequest, create_contract, create_department, delete_department,
    get_department, get_employee, list_departments, update_department, update_employee,
};

#[test]
fn test_create_then_get_returns_same_fields() {
    let mut persistence = setup();
    let request: CreateDepartmentRequest = CreateDepartmentRequest {
        name: String::from("  Hatchery  "),
        description: Some(String::from("Egg incubation and larval rearing")),
    };

    let created: Department = create_department(&mut persistence, &request).unwrap();
    let fetched: Department =
        get_department(&mut persistence, created.department_id.unwrap()).unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "Hatchery");
    assert_eq!(
        fetched.description.as_deref(),
        Some("Egg incubation and larval rearing")
    );
    assert!(fetched.created_at.is_some());
}

#[test]
fn test_create_rejects_blank_name() {
    let mut persistence = setup();
    let err: ApiError =
        create_department(&mut persistence, &department_request("   ")).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "name"));
}

#[test]
fn test_create_rejects_duplicate_name_ignoring_case() {
    let mut persistence = setup();
    seed_department(&mut persistence, "Feed Mill");

    let err: ApiError =
        create_department(&mut persistence, &department_request("FEED MILL")).unwrap_err();
    assert!(matches!(err, ApiError::Conflict { ref rule, .. } if rule == "unique_department_name"));
}

#[test]
fn test_get_unknown_department_is_not_found() {
    let mut persistence = setup();
    let err: ApiError = get_department(&mut persistence, 404).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_update_preserves_unspecified_fields() {
    let mut persistence = setup();
    let created: Department = create_department(
        &mut persistence,
        &CreateDepartmentRequest {
            name: String::from("Grow-out"),
            description: Some(String::from("Pond operations")),
        },
    )
    .unwrap();
    let id: i64 = created.department_id.unwrap();

    let updated: Department = update_department(
        &mut persistence,
        id,
        &UpdateDepartmentRequest {
            name: Some(String::from("Grow-out Ponds")),
            ..UpdateDepartmentRequest::default()
        },
    )
    .unwrap();

    assert_eq!(updated.name, "Grow-out Ponds");
    assert_eq!(updated.description.as_deref(), Some("Pond operations"));
}

#[test]
fn test_update_with_explicit_null_clears_description() {
    let mut persistence = setup();
    let created: Department = create_department(
        &mut persistence,
        &CreateDepartmentRequest {
            name: String::from("Quality"),
            description: Some(String::from("Water testing")),
        },
    )
    .unwrap();

    let updated: Department = update_department(
        &mut persistence,
        created.department_id.unwrap(),
        &UpdateDepartmentRequest {
            name: None,
            description: Some(None),
        },
    )
    .unwrap();

    assert_eq!(updated.name, "Quality");
    assert_eq!(updated.description, None);
}

#[test]
fn test_delete_unknown_department_is_not_found() {
    let mut persistence = setup();
    let err: ApiError = delete_department(&mut persistence, 99).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_delete_rejected_while_contracts_reference_department() {
    let mut persistence = setup();
    let department_id: i64 = seed_department(&mut persistence, "Processing");
    let employee_id: i64 = seed_employee(&mut persistence, "worker@example.com");
    create_contract(
        &mut persistence,
        &contract_request(employee_id, department_id, "2025-01-01"),
        today(),
    )
    .unwrap();

    let err: ApiError = delete_department(&mut persistence, department_id).unwrap_err();
    assert!(matches!(err, ApiError::Conflict { ref rule, .. } if rule == "department_in_use"));
    assert!(get_department(&mut persistence, department_id).is_ok());
}

#[test]
fn test_delete_unassigns_employees() {
    let mut persistence = setup();
    let department_id: i64 = seed_department(&mut persistence, "Logistics");
    let employee_id: i64 = seed_employee(&mut persistence, "driver@example.com");
    update_employee(
        &mut persistence,
        employee_id,
        &UpdateEmployeeRequest {
            department_id: Some(Some(department_id)),
            ..UpdateEmployeeRequest::default()
        },
        today(),
    )
    .unwrap();

    let response = delete_department(&mut persistence, department_id).unwrap();
    assert_eq!(response.id, department_id);

    let employee = get_employee(&mut persistence, employee_id).unwrap();
    assert_eq!(employee.department_id, None);
}

#[test]
fn test_list_searches_and_pages() {
    let mut persistence = setup();
    for name in ["Hatchery", "Hatchery Lab", "Feed Mill", "Finance"] {
        seed_department(&mut persistence, name);
    }

    let page: Page<Department> = list_departments(
        &mut persistence,
        &DepartmentListQuery {
            search: Some(String::from("hatch")),
            ..DepartmentListQuery::default()
        },
    )
    .unwrap();
    assert_eq!(page.total, 2);

    let page: Page<Department> = list_departments(
        &mut persistence,
        &DepartmentListQuery {
            sort: Some(String::from("name")),
            order: Some(String::from("desc")),
            page: Some(2),
            per_page: Some(3),
            ..DepartmentListQuery::default()
        },
    )
    .unwrap();
    assert_eq!(page.total, 4);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Feed Mill");
}

#[test]
fn test_list_rejects_unknown_sort_key() {
    let mut persistence = setup();
    let err: ApiError = list_departments(
        &mut persistence,
        &DepartmentListQuery {
            sort: Some(String::from("budget")),
            ..DepartmentListQuery::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "sort"));
}
