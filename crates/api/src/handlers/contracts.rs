// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contract handlers.
//!
//! Contract creation and status changes go through the cross-contract
//! rules in `aquahr_domain`: an employee holds at most one active contract.

use aquahr_domain::{
    Contract, ContractSortKey, ContractStatus, DomainError, EmploymentType, Page,
    default_contract_status, normalize_optional, parse_date, parse_optional_date,
    plan_contract_creation, termination_end_date, validate_contract, validate_status_change,
};
use aquahr_persistence::{ContractFilter, ListOptions, Persistence, Supersede};
use time::Date;
use tracing::{debug, info};

use super::{list_options, parse_optional_enum, require_department, require_employee};
use crate::error::ApiError;
use crate::request_response::{
    ContractListQuery, CreateContractRequest, CreateContractResponse, DeleteResponse,
    TerminateContractRequest, UpdateContractRequest,
};

/// Creates a contract.
///
/// When the new contract is active and the employee already holds an active
/// contract, the request must set `terminate_active`. The prior contract is
/// then terminated in the same transaction as the insert, ending the day the
/// new contract starts (or earlier if it was already scheduled to end).
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The contract to create
/// * `today` - The current date, used to choose the default status
///
/// # Errors
///
/// Returns an error if:
/// - A field is invalid
/// - The employee or department does not exist
/// - Another active contract exists and `terminate_active` is not set
pub fn create_contract(
    persistence: &mut Persistence,
    request: &CreateContractRequest,
    today: Date,
) -> Result<CreateContractResponse, ApiError> {
    let start_date: Date = parse_date("start_date", &request.start_date)?;
    let status: ContractStatus = parse_optional_enum(request.status.as_deref())?
        .unwrap_or_else(|| default_contract_status(start_date, today));

    let contract: Contract = Contract {
        contract_id: None,
        employee_id: request.employee_id,
        department_id: request.department_id,
        contract_type: request.contract_type.parse::<EmploymentType>()?,
        start_date,
        end_date: parse_optional_date("end_date", request.end_date.as_deref())?,
        salary: request.salary,
        status,
        notes: normalize_optional(request.notes.clone()),
        created_at: None,
        updated_at: None,
    };
    validate_contract(&contract)?;

    require_employee(persistence, "employee_id", contract.employee_id)?;
    require_department(persistence, "department_id", contract.department_id)?;

    let existing: Vec<Contract> = persistence.list_contracts_for_employee(contract.employee_id)?;
    let supersede: Option<Supersede> =
        match plan_contract_creation(&existing, &contract, request.terminate_active)? {
            Some(prior_id) => {
                let prior: &Contract = existing
                    .iter()
                    .find(|c| c.contract_id == Some(prior_id))
                    .ok_or_else(|| ApiError::Internal {
                        message: format!("Active contract {prior_id} vanished during planning"),
                    })?;
                Some(Supersede {
                    contract_id: prior_id,
                    end_date: termination_end_date(prior, contract.start_date),
                })
            }
            None => None,
        };

    let contract_id: i64 = persistence.create_contract(&contract, supersede)?;
    info!(
        contract_id,
        employee_id = contract.employee_id,
        status = %contract.status,
        superseded = ?supersede.map(|s| s.contract_id),
        "Created contract"
    );

    let terminated_contract: Option<Contract> = match supersede {
        Some(s) => persistence.get_contract(s.contract_id)?,
        None => None,
    };

    Ok(CreateContractResponse {
        contract: get_contract(persistence, contract_id)?,
        terminated_contract,
    })
}

/// Retrieves a contract.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the contract does not exist.
pub fn get_contract(persistence: &mut Persistence, contract_id: i64) -> Result<Contract, ApiError> {
    persistence
        .get_contract(contract_id)?
        .ok_or_else(|| ApiError::not_found("Contract", contract_id))
}

/// Lists contracts.
///
/// # Errors
///
/// Returns an error if the query parameters are invalid.
pub fn list_contracts(
    persistence: &mut Persistence,
    query: &ContractListQuery,
) -> Result<Page<Contract>, ApiError> {
    let options: ListOptions<ContractSortKey> = list_options(
        query.search.as_deref(),
        query.sort.as_deref(),
        query.order.as_deref(),
        query.page,
        query.per_page,
    )?;
    let filter: ContractFilter = ContractFilter {
        employee_id: query.employee_id,
        department_id: query.department_id,
        status: parse_optional_enum(query.status.as_deref())?,
    };

    let page: Page<Contract> = persistence.list_contracts(filter, &options)?;
    debug!(total = page.total, "Listed contracts");
    Ok(page)
}

/// Lists every contract held by one employee, oldest first.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the employee does not exist.
pub fn list_employee_contracts(
    persistence: &mut Persistence,
    employee_id: i64,
) -> Result<Vec<Contract>, ApiError> {
    if !persistence.employee_exists(employee_id)? {
        return Err(ApiError::not_found("Employee", employee_id));
    }
    Ok(persistence.list_contracts_for_employee(employee_id)?)
}

/// Applies a partial update to a contract.
///
/// A status change must follow the contract lifecycle. Moving to
/// `TERMINATED` without an explicit end date records the termination date
/// derived from `today`.
///
/// # Errors
///
/// Returns an error if the contract does not exist, a field is invalid, the
/// status change is not permitted, or the department does not exist.
pub fn update_contract(
    persistence: &mut Persistence,
    contract_id: i64,
    request: &UpdateContractRequest,
    today: Date,
) -> Result<Contract, ApiError> {
    let current: Contract = get_contract(persistence, contract_id)?;
    let mut contract: Contract = current.clone();

    if let Some(department_id) = request.department_id {
        contract.department_id = department_id;
    }
    if let Some(contract_type) = &request.contract_type {
        contract.contract_type = contract_type.parse::<EmploymentType>()?;
    }
    if let Some(start_date) = &request.start_date {
        contract.start_date = parse_date("start_date", start_date)?;
    }
    if let Some(end_date) = &request.end_date {
        contract.end_date = parse_optional_date("end_date", end_date.as_deref())?;
    }
    if let Some(salary) = request.salary {
        contract.salary = salary;
    }
    if let Some(notes) = &request.notes {
        contract.notes = normalize_optional(notes.clone());
    }
    if let Some(status) = &request.status {
        let target: ContractStatus = status.parse::<ContractStatus>()?;
        if target != current.status {
            let existing: Vec<Contract> =
                persistence.list_contracts_for_employee(current.employee_id)?;
            validate_status_change(&current, target, &existing)?;
            let explicit_end: bool = matches!(request.end_date, Some(Some(_)));
            if target == ContractStatus::Terminated && !explicit_end {
                contract.end_date = Some(termination_end_date(&contract, today));
            }
            contract.status = target;
        }
    }
    validate_contract(&contract)?;

    if request.department_id.is_some() {
        require_department(persistence, "department_id", contract.department_id)?;
    }

    persistence.update_contract(&contract)?;
    info!(contract_id, status = %contract.status, "Updated contract");
    get_contract(persistence, contract_id)
}

/// Terminates a contract.
///
/// # Errors
///
/// Returns an error if the contract does not exist, is already expired or
/// terminated, or the end date is invalid.
pub fn terminate_contract(
    persistence: &mut Persistence,
    contract_id: i64,
    request: &TerminateContractRequest,
    today: Date,
) -> Result<Contract, ApiError> {
    let mut contract: Contract = get_contract(persistence, contract_id)?;

    if contract.status.is_terminal() {
        return Err(DomainError::InvalidContractTransition {
            from: contract.status,
            to: ContractStatus::Terminated,
        }
        .into());
    }
    validate_status_change(&contract, ContractStatus::Terminated, &[])?;

    let end_date: Date = match parse_optional_date("end_date", request.end_date.as_deref())? {
        Some(date) => date,
        None => termination_end_date(&contract, today),
    };
    contract.end_date = Some(end_date);
    contract.status = ContractStatus::Terminated;
    validate_contract(&contract)?;

    persistence.update_contract(&contract)?;
    info!(contract_id, end_date = %end_date, "Terminated contract");
    get_contract(persistence, contract_id)
}

/// Deletes a contract.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the contract does not exist.
pub fn delete_contract(
    persistence: &mut Persistence,
    contract_id: i64,
) -> Result<DeleteResponse, ApiError> {
    get_contract(persistence, contract_id)?;
    persistence.delete_contract(contract_id)?;

    info!(contract_id, "Deleted contract");
    Ok(DeleteResponse {
        id: contract_id,
        message: format!("Contract {contract_id} deleted"),
    })
}
