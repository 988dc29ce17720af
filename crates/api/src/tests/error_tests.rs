// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use aquahr_domain::{ContractStatus, DomainError};
use aquahr_persistence::PersistenceError;

use crate::{
    ApiError, CreateContractRequest, UpdateEmployeeRequest, UpdateSiteRequest,
    translate_domain_error,
};

// ============================================================================
// Error translation
// ============================================================================

#[test]
fn test_field_errors_become_invalid_input_naming_the_field() {
    let err: ApiError = translate_domain_error(DomainError::MissingField { field: "title" });
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "title"));

    let err: ApiError = translate_domain_error(DomainError::InvalidExperience {
        index: 3,
        reason: String::from("role is required"),
    });
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "experience[3]"));
}

#[test]
fn test_lifecycle_errors_become_rule_violations() {
    let err: ApiError = translate_domain_error(DomainError::InvalidContractTransition {
        from: ContractStatus::Expired,
        to: ContractStatus::Active,
    });
    assert!(matches!(err, ApiError::DomainRuleViolation { .. }));
    assert!(err.to_string().contains("EXPIRED"));
}

#[test]
fn test_active_contract_conflict_is_conflict() {
    let err: ApiError = ApiError::from(DomainError::ActiveContractExists {
        employee_id: 4,
        contract_id: 9,
    });
    assert!(
        matches!(err, ApiError::Conflict { ref rule, .. } if rule == "single_active_contract")
    );
}

#[test]
fn test_persistence_errors_map_to_api_errors() {
    assert!(matches!(
        ApiError::from(PersistenceError::NotFound(String::from("gone"))),
        ApiError::ResourceNotFound { .. }
    ));
    assert!(matches!(
        ApiError::from(PersistenceError::UniqueViolation(String::from("dup"))),
        ApiError::Conflict { .. }
    ));
    assert!(matches!(
        ApiError::from(PersistenceError::ForeignKeyViolation(String::from("fk"))),
        ApiError::Conflict { .. }
    ));
    assert!(matches!(
        ApiError::from(PersistenceError::QueryFailed(String::from("boom"))),
        ApiError::Internal { .. }
    ));
}

// ============================================================================
// Request deserialization
// ============================================================================

#[test]
fn test_patch_distinguishes_absent_from_null() {
    let absent: UpdateEmployeeRequest = serde_json::from_str(r#"{"position":"Diver"}"#).unwrap();
    assert_eq!(absent.phone, None);
    assert_eq!(absent.department_id, None);
    assert_eq!(absent.position.as_deref(), Some("Diver"));

    let cleared: UpdateEmployeeRequest =
        serde_json::from_str(r#"{"phone":null,"department_id":null}"#).unwrap();
    assert_eq!(cleared.phone, Some(None));
    assert_eq!(cleared.department_id, Some(None));

    let set: UpdateSiteRequest = serde_json::from_str(r#"{"manager_id":7}"#).unwrap();
    assert_eq!(set.manager_id, Some(Some(7)));
    assert_eq!(set.employee_ids, None);
}

#[test]
fn test_contract_request_defaults_terminate_active_to_false() {
    let request: CreateContractRequest = serde_json::from_str(
        r#"{
            "employee_id": 1,
            "department_id": 2,
            "contract_type": "FULL_TIME",
            "start_date": "2026-01-01",
            "salary": 30000
        }"#,
    )
    .unwrap();
    assert!(!request.terminate_active);
    assert_eq!(request.status, None);
    assert_eq!(request.end_date, None);
}
