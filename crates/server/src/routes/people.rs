// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Department, employee and contract endpoints.

use aquahr_api::{
    ContractListQuery, CreateContractRequest, CreateContractResponse, CreateDepartmentRequest,
    CreateEmployeeRequest, DeleteEmployeeResponse, DeleteResponse, DepartmentListQuery,
    EmployeeListQuery, TerminateContractRequest, UpdateContractRequest, UpdateDepartmentRequest,
    UpdateEmployeeRequest, create_contract, create_department, create_employee, delete_contract,
    delete_department, delete_employee, get_contract, get_department, get_employee, get_site,
    list_contracts, list_departments, list_employee_contracts, list_employees, terminate_contract,
    update_contract, update_department, update_employee,
};
use aquahr_domain::{Contract, Department, Employee, Page, Site};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State as AxumState},
    http::StatusCode,
};
use tracing::{debug, info, warn};

use super::{AppState, today};
use crate::error::{HttpError, JsonBody, QueryParams};
use crate::live::LiveEvent;

// ============================================================================
// Departments
// ============================================================================

/// Handler for POST `/departments`.
pub(super) async fn handle_create_department(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<CreateDepartmentRequest>,
) -> Result<(StatusCode, Json<Department>), HttpError> {
    info!(name = %req.name, "Handling create_department request");

    let mut persistence = app_state.persistence.lock().await;
    let department: Department = create_department(&mut persistence, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(department)))
}

/// Handler for GET `/departments`.
pub(super) async fn handle_list_departments(
    AxumState(app_state): AxumState<AppState>,
    QueryParams(query): QueryParams<DepartmentListQuery>,
) -> Result<Json<Page<Department>>, HttpError> {
    debug!(?query, "Handling list_departments request");

    let mut persistence = app_state.persistence.lock().await;
    let page: Page<Department> = list_departments(&mut persistence, &query)?;
    drop(persistence);

    Ok(Json(page))
}

/// Handler for GET `/departments/{id}`.
pub(super) async fn handle_get_department(
    AxumState(app_state): AxumState<AppState>,
    Path(department_id): Path<i64>,
) -> Result<Json<Department>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let department: Department = get_department(&mut persistence, department_id)?;
    drop(persistence);

    Ok(Json(department))
}

/// Handler for PUT/PATCH `/departments/{id}`.
pub(super) async fn handle_update_department(
    AxumState(app_state): AxumState<AppState>,
    Path(department_id): Path<i64>,
    JsonBody(req): JsonBody<UpdateDepartmentRequest>,
) -> Result<Json<Department>, HttpError> {
    info!(department_id, "Handling update_department request");

    let mut persistence = app_state.persistence.lock().await;
    let department: Department = update_department(&mut persistence, department_id, &req)?;
    drop(persistence);

    Ok(Json(department))
}

/// Handler for DELETE `/departments/{id}`.
pub(super) async fn handle_delete_department(
    AxumState(app_state): AxumState<AppState>,
    Path(department_id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(department_id, "Handling delete_department request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse = delete_department(&mut persistence, department_id)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Employees
// ============================================================================

/// Handler for POST `/employees`.
pub(super) async fn handle_create_employee(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<Employee>), HttpError> {
    info!(email = %req.email, "Handling create_employee request");

    let mut persistence = app_state.persistence.lock().await;
    let employee: Employee = create_employee(&mut persistence, &req, today())?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::EmployeeCreated {
        employee: employee.clone(),
    });

    Ok((StatusCode::CREATED, Json(employee)))
}

/// Handler for GET `/employees`.
pub(super) async fn handle_list_employees(
    AxumState(app_state): AxumState<AppState>,
    QueryParams(query): QueryParams<EmployeeListQuery>,
) -> Result<Json<Page<Employee>>, HttpError> {
    debug!(?query, "Handling list_employees request");

    let mut persistence = app_state.persistence.lock().await;
    let page: Page<Employee> = list_employees(&mut persistence, &query)?;
    drop(persistence);

    Ok(Json(page))
}

/// Handler for GET `/employees/{id}`.
pub(super) async fn handle_get_employee(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<Employee>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let employee: Employee = get_employee(&mut persistence, employee_id)?;
    drop(persistence);

    Ok(Json(employee))
}

/// Handler for PUT/PATCH `/employees/{id}`.
pub(super) async fn handle_update_employee(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
    JsonBody(req): JsonBody<UpdateEmployeeRequest>,
) -> Result<Json<Employee>, HttpError> {
    info!(employee_id, "Handling update_employee request");

    let mut persistence = app_state.persistence.lock().await;
    let employee: Employee = update_employee(&mut persistence, employee_id, &req, today())?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::EmployeeUpdated {
        employee: employee.clone(),
    });

    Ok(Json(employee))
}

/// Handler for DELETE `/employees/{id}`.
///
/// Also announces the contracts removed with the employee and every site
/// whose leadership or roster lost the employee.
pub(super) async fn handle_delete_employee(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<DeleteEmployeeResponse>, HttpError> {
    info!(employee_id, "Handling delete_employee request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteEmployeeResponse = delete_employee(&mut persistence, employee_id)?;
    let mut sites: Vec<Site> = Vec::with_capacity(response.affected_site_ids.len());
    for site_id in &response.affected_site_ids {
        match get_site(&mut persistence, *site_id) {
            Ok(site) => sites.push(site),
            Err(err) => warn!(
                site_id,
                error = %err,
                "Could not reload site after employee deletion"
            ),
        }
    }
    drop(persistence);

    app_state
        .broadcaster
        .broadcast(&LiveEvent::EmployeeDeleted { employee_id });
    for contract_id in &response.removed_contract_ids {
        app_state.broadcaster.broadcast(&LiveEvent::ContractDeleted {
            contract_id: *contract_id,
        });
    }
    for site in sites {
        app_state.broadcaster.broadcast(&LiveEvent::SiteUpdated { site });
    }

    Ok(Json(response))
}

/// Handler for GET `/employees/{id}/contracts`.
pub(super) async fn handle_list_employee_contracts(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<Vec<Contract>>, HttpError> {
    debug!(employee_id, "Handling list_employee_contracts request");

    let mut persistence = app_state.persistence.lock().await;
    let contracts: Vec<Contract> = list_employee_contracts(&mut persistence, employee_id)?;
    drop(persistence);

    Ok(Json(contracts))
}

// ============================================================================
// Contracts
// ============================================================================

/// Handler for POST `/contracts`.
pub(super) async fn handle_create_contract(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<CreateContractRequest>,
) -> Result<(StatusCode, Json<CreateContractResponse>), HttpError> {
    info!(
        employee_id = req.employee_id,
        department_id = req.department_id,
        terminate_active = req.terminate_active,
        "Handling create_contract request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateContractResponse = create_contract(&mut persistence, &req, today())?;
    drop(persistence);

    if let Some(terminated) = &response.terminated_contract {
        app_state.broadcaster.broadcast(&LiveEvent::ContractUpdated {
            contract: terminated.clone(),
        });
    }
    app_state.broadcaster.broadcast(&LiveEvent::ContractCreated {
        contract: response.contract.clone(),
    });

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/contracts`.
pub(super) async fn handle_list_contracts(
    AxumState(app_state): AxumState<AppState>,
    QueryParams(query): QueryParams<ContractListQuery>,
) -> Result<Json<Page<Contract>>, HttpError> {
    debug!(?query, "Handling list_contracts request");

    let mut persistence = app_state.persistence.lock().await;
    let page: Page<Contract> = list_contracts(&mut persistence, &query)?;
    drop(persistence);

    Ok(Json(page))
}

/// Handler for GET `/contracts/{id}`.
pub(super) async fn handle_get_contract(
    AxumState(app_state): AxumState<AppState>,
    Path(contract_id): Path<i64>,
) -> Result<Json<Contract>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let contract: Contract = get_contract(&mut persistence, contract_id)?;
    drop(persistence);

    Ok(Json(contract))
}

/// Handler for PUT/PATCH `/contracts/{id}`.
pub(super) async fn handle_update_contract(
    AxumState(app_state): AxumState<AppState>,
    Path(contract_id): Path<i64>,
    JsonBody(req): JsonBody<UpdateContractRequest>,
) -> Result<Json<Contract>, HttpError> {
    info!(contract_id, "Handling update_contract request");

    let mut persistence = app_state.persistence.lock().await;
    let contract: Contract = update_contract(&mut persistence, contract_id, &req, today())?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::ContractUpdated {
        contract: contract.clone(),
    });

    Ok(Json(contract))
}

/// Handler for POST `/contracts/{id}/terminate`.
///
/// The body is optional; without one the contract ends today.
pub(super) async fn handle_terminate_contract(
    AxumState(app_state): AxumState<AppState>,
    Path(contract_id): Path<i64>,
    body: Bytes,
) -> Result<Json<Contract>, HttpError> {
    info!(contract_id, "Handling terminate_contract request");

    let req: TerminateContractRequest = if body.iter().all(u8::is_ascii_whitespace) {
        TerminateContractRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| HttpError::bad_request(e.to_string()))?
    };

    let mut persistence = app_state.persistence.lock().await;
    let contract: Contract = terminate_contract(&mut persistence, contract_id, &req, today())?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::ContractUpdated {
        contract: contract.clone(),
    });

    Ok(Json(contract))
}

/// Handler for DELETE `/contracts/{id}`.
pub(super) async fn handle_delete_contract(
    AxumState(app_state): AxumState<AppState>,
    Path(contract_id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(contract_id, "Handling delete_contract request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse = delete_contract(&mut persistence, contract_id)?;
    drop(persistence);

    app_state
        .broadcaster
        .broadcast(&LiveEvent::ContractDeleted { contract_id });

    Ok(Json(response))
}
