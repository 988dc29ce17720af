// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use aquahr_domain::{Contract, ContractStatus, EmploymentType, Page};
use aquahr_persistence::Persistence;
use time::{Date, Month};

use super::helpers::{contract_request, seed_department, seed_employee, setup, today};
use crate::{
    ApiError, ContractListQuery, CreateContractRequest, CreateContractResponse,
    TerminateContractRequest, UpdateContractRequest, create_contract, delete_contract,
    get_contract, list_contracts, list_employee_contracts, terminate_contract, update_contract,
};

fn setup_with_employee() -> (Persistence, i64, i64) {
    let mut persistence = setup();
    let department_id: i64 = seed_department(&mut persistence, "Hatchery");
    let employee_id: i64 = seed_employee(&mut persistence, "holder@example.com");
    (persistence, department_id, employee_id)
}

fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

#[test]
fn test_create_then_get_returns_same_fields() {
    let (mut persistence, department_id, employee_id) = setup_with_employee();
    let mut request: CreateContractRequest =
        contract_request(employee_id, department_id, "2025-02-01");
    request.contract_type = String::from("part_time");
    request.end_date = Some(String::from("2026-12-31"));
    request.notes = Some(String::from("Night shift"));

    let response: CreateContractResponse =
        create_contract(&mut persistence, &request, today()).unwrap();
    let fetched: Contract =
        get_contract(&mut persistence, response.contract.contract_id.unwrap()).unwrap();

    assert_eq!(fetched, response.contract);
    assert_eq!(fetched.contract_type, EmploymentType::PartTime);
    assert_eq!(fetched.start_date, date(2025, Month::February, 1));
    assert_eq!(fetched.end_date, Some(date(2026, Month::December, 31)));
    assert_eq!(fetched.salary, 36_000);
    assert_eq!(fetched.status, ContractStatus::Active);
    assert_eq!(fetched.notes.as_deref(), Some("Night shift"));
    assert!(response.terminated_contract.is_none());
}

#[test]
fn test_future_start_defaults_to_pending() {
    let (mut persistence, department_id, employee_id) = setup_with_employee();
    let response: CreateContractResponse = create_contract(
        &mut persistence,
        &contract_request(employee_id, department_id, "2026-09-01"),
        today(),
    )
    .unwrap();
    assert_eq!(response.contract.status, ContractStatus::Pending);
}

#[test]
fn test_create_with_unknown_employee_is_rejected() {
    let (mut persistence, department_id, _) = setup_with_employee();
    let err: ApiError = create_contract(
        &mut persistence,
        &contract_request(999, department_id, "2025-01-01"),
        today(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "employee_id"));
}

#[test]
fn test_create_with_unknown_department_is_rejected() {
    let (mut persistence, _, employee_id) = setup_with_employee();
    let err: ApiError = create_contract(
        &mut persistence,
        &contract_request(employee_id, 999, "2025-01-01"),
        today(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "department_id"));
}

#[test]
fn test_create_rejects_end_before_start_and_non_positive_salary() {
    let (mut persistence, department_id, employee_id) = setup_with_employee();

    let mut request: CreateContractRequest =
        contract_request(employee_id, department_id, "2025-06-01");
    request.end_date = Some(String::from("2025-05-31"));
    let err: ApiError = create_contract(&mut persistence, &request, today()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "end_date"));

    let mut request: CreateContractRequest =
        contract_request(employee_id, department_id, "2025-06-01");
    request.salary = 0;
    let err: ApiError = create_contract(&mut persistence, &request, today()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "salary"));
}

#[test]
fn test_second_active_contract_is_rejected_without_opt_in() {
    let (mut persistence, department_id, employee_id) = setup_with_employee();
    let first: Contract = create_contract(
        &mut persistence,
        &contract_request(employee_id, department_id, "2025-01-01"),
        today(),
    )
    .unwrap()
    .contract;

    let err: ApiError = create_contract(
        &mut persistence,
        &contract_request(employee_id, department_id, "2026-01-01"),
        today(),
    )
    .unwrap_err();
    assert!(
        matches!(err, ApiError::Conflict { ref rule, .. } if rule == "single_active_contract")
    );

    let unchanged: Contract = get_contract(&mut persistence, first.contract_id.unwrap()).unwrap();
    assert_eq!(unchanged.status, ContractStatus::Active);
    assert_eq!(
        list_employee_contracts(&mut persistence, employee_id)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_terminate_active_supersedes_prior_contract() {
    let (mut persistence, department_id, employee_id) = setup_with_employee();
    let first: Contract = create_contract(
        &mut persistence,
        &contract_request(employee_id, department_id, "2025-01-01"),
        today(),
    )
    .unwrap()
    .contract;

    let mut request: CreateContractRequest =
        contract_request(employee_id, department_id, "2026-03-01");
    request.salary = 48_000;
    request.terminate_active = true;
    let response: CreateContractResponse =
        create_contract(&mut persistence, &request, today()).unwrap();

    let terminated: Contract = response.terminated_contract.unwrap();
    assert_eq!(terminated.contract_id, first.contract_id);
    assert_eq!(terminated.status, ContractStatus::Terminated);
    assert_eq!(terminated.end_date, Some(date(2026, Month::March, 1)));
    assert_eq!(response.contract.status, ContractStatus::Active);
    assert_eq!(response.contract.salary, 48_000);

    let active: Page<Contract> = list_contracts(
        &mut persistence,
        &ContractListQuery {
            employee_id: Some(employee_id),
            status: Some(String::from("ACTIVE")),
            ..ContractListQuery::default()
        },
    )
    .unwrap();
    assert_eq!(active.total, 1);
    assert_eq!(active.items[0].contract_id, response.contract.contract_id);
}

#[test]
fn test_pending_contract_does_not_conflict_with_active_one() {
    let (mut persistence, department_id, employee_id) = setup_with_employee();
    create_contract(
        &mut persistence,
        &contract_request(employee_id, department_id, "2025-01-01"),
        today(),
    )
    .unwrap();

    let response: CreateContractResponse = create_contract(
        &mut persistence,
        &contract_request(employee_id, department_id, "2027-01-01"),
        today(),
    )
    .unwrap();
    assert_eq!(response.contract.status, ContractStatus::Pending);
    assert!(response.terminated_contract.is_none());
}

#[test]
fn test_activating_pending_contract_conflicts_with_active_one() {
    let (mut persistence, department_id, employee_id) = setup_with_employee();
    create_contract(
        &mut persistence,
        &contract_request(employee_id, department_id, "2025-01-01"),
        today(),
    )
    .unwrap();
    let pending: Contract = create_contract(
        &mut persistence,
        &contract_request(employee_id, department_id, "2027-01-01"),
        today(),
    )
    .unwrap()
    .contract;

    let err: ApiError = update_contract(
        &mut persistence,
        pending.contract_id.unwrap(),
        &UpdateContractRequest {
            status: Some(String::from("ACTIVE")),
            ..UpdateContractRequest::default()
        },
        today(),
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::Conflict { .. }));
}

#[test]
fn test_invalid_status_transition_is_rejected() {
    let (mut persistence, department_id, employee_id) = setup_with_employee();
    let contract: Contract = create_contract(
        &mut persistence,
        &contract_request(employee_id, department_id, "2025-01-01"),
        today(),
    )
    .unwrap()
    .contract;
    let id: i64 = contract.contract_id.unwrap();

    update_contract(
        &mut persistence,
        id,
        &UpdateContractRequest {
            status: Some(String::from("EXPIRED")),
            ..UpdateContractRequest::default()
        },
        today(),
    )
    .unwrap();

    let err: ApiError = update_contract(
        &mut persistence,
        id,
        &UpdateContractRequest {
            status: Some(String::from("ACTIVE")),
            ..UpdateContractRequest::default()
        },
        today(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "contract_status_transition"
    ));
}

#[test]
fn test_terminating_with_null_end_date_records_today() {
    let (mut persistence, department_id, employee_id) = setup_with_employee();
    let id: i64 = create_contract(
        &mut persistence,
        &contract_request(employee_id, department_id, "2025-01-01"),
        today(),
    )
    .unwrap()
    .contract
    .contract_id
    .unwrap();

    let terminated: Contract = update_contract(
        &mut persistence,
        id,
        &UpdateContractRequest {
            status: Some(String::from("TERMINATED")),
            end_date: Some(None),
            ..UpdateContractRequest::default()
        },
        today(),
    )
    .unwrap();

    assert_eq!(terminated.status, ContractStatus::Terminated);
    assert_eq!(terminated.end_date, Some(today()));
}

#[test]
fn test_update_preserves_unspecified_fields() {
    let (mut persistence, department_id, employee_id) = setup_with_employee();
    let mut request: CreateContractRequest =
        contract_request(employee_id, department_id, "2025-01-01");
    request.notes = Some(String::from("Probation"));
    let contract: Contract = create_contract(&mut persistence, &request, today())
        .unwrap()
        .contract;

    let updated: Contract = update_contract(
        &mut persistence,
        contract.contract_id.unwrap(),
        &UpdateContractRequest {
            salary: Some(40_000),
            ..UpdateContractRequest::default()
        },
        today(),
    )
    .unwrap();

    assert_eq!(updated.salary, 40_000);
    assert_eq!(updated.notes.as_deref(), Some("Probation"));
    assert_eq!(updated.status, ContractStatus::Active);
    assert_eq!(updated.start_date, contract.start_date);
}

#[test]
fn test_terminate_defaults_end_date_to_today() {
    let (mut persistence, department_id, employee_id) = setup_with_employee();
    let contract: Contract = create_contract(
        &mut persistence,
        &contract_request(employee_id, department_id, "2025-01-01"),
        today(),
    )
    .unwrap()
    .contract;

    let terminated: Contract = terminate_contract(
        &mut persistence,
        contract.contract_id.unwrap(),
        &TerminateContractRequest::default(),
        today(),
    )
    .unwrap();
    assert_eq!(terminated.status, ContractStatus::Terminated);
    assert_eq!(terminated.end_date, Some(today()));
}

#[test]
fn test_terminate_twice_is_rejected() {
    let (mut persistence, department_id, employee_id) = setup_with_employee();
    let contract: Contract = create_contract(
        &mut persistence,
        &contract_request(employee_id, department_id, "2025-01-01"),
        today(),
    )
    .unwrap()
    .contract;
    let id: i64 = contract.contract_id.unwrap();
    let request: TerminateContractRequest = TerminateContractRequest {
        end_date: Some(String::from("2026-05-15")),
    };

    let terminated: Contract = terminate_contract(&mut persistence, id, &request, today()).unwrap();
    assert_eq!(terminated.end_date, Some(date(2026, Month::May, 15)));

    let err: ApiError = terminate_contract(&mut persistence, id, &request, today()).unwrap_err();
    assert!(matches!(err, ApiError::DomainRuleViolation { .. }));
}

#[test]
fn test_delete_contract_and_missing_id() {
    let (mut persistence, department_id, employee_id) = setup_with_employee();
    let contract: Contract = create_contract(
        &mut persistence,
        &contract_request(employee_id, department_id, "2025-01-01"),
        today(),
    )
    .unwrap()
    .contract;
    let id: i64 = contract.contract_id.unwrap();

    delete_contract(&mut persistence, id).unwrap();
    assert!(matches!(
        delete_contract(&mut persistence, id),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_list_employee_contracts_for_unknown_employee_is_not_found() {
    let mut persistence = setup();
    let err: ApiError = list_employee_contracts(&mut persistence, 31).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}
