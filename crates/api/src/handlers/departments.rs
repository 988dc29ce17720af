// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Department handlers.

use aquahr_domain::{Department, DepartmentSortKey, Page, normalize_optional, validate_department};
use aquahr_persistence::{ListOptions, Persistence};
use tracing::{debug, info};

use super::{list_options, map_unique};
use crate::error::ApiError;
use crate::request_response::{
    CreateDepartmentRequest, DeleteResponse, DepartmentListQuery, UpdateDepartmentRequest,
};

/// Creates a department.
///
/// # Errors
///
/// Returns an error if the name is invalid or already taken.
pub fn create_department(
    persistence: &mut Persistence,
    request: &CreateDepartmentRequest,
) -> Result<Department, ApiError> {
    let department: Department = Department {
        department_id: None,
        name: request.name.trim().to_string(),
        description: normalize_optional(request.description.clone()),
        created_at: None,
    };
    validate_department(&department)?;

    let department_id: i64 = persistence
        .create_department(&department)
        .map_err(|e| {
            map_unique(
                e,
                "unique_department_name",
                format!("Department '{}' already exists", department.name),
            )
        })?;

    info!(department_id, name = %department.name, "Created department");
    get_department(persistence, department_id)
}

/// Retrieves a department.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the department does not exist.
pub fn get_department(
    persistence: &mut Persistence,
    department_id: i64,
) -> Result<Department, ApiError> {
    persistence
        .get_department(department_id)?
        .ok_or_else(|| ApiError::not_found("Department", department_id))
}

/// Lists departments.
///
/// # Errors
///
/// Returns an error if the query parameters are invalid.
pub fn list_departments(
    persistence: &mut Persistence,
    query: &DepartmentListQuery,
) -> Result<Page<Department>, ApiError> {
    let options: ListOptions<DepartmentSortKey> = list_options(
        query.search.as_deref(),
        query.sort.as_deref(),
        query.order.as_deref(),
        query.page,
        query.per_page,
    )?;
    let page: Page<Department> = persistence.list_departments(&options)?;
    debug!(total = page.total, "Listed departments");
    Ok(page)
}

/// Applies a partial update to a department.
///
/// # Errors
///
/// Returns an error if the department does not exist, the new name is
/// invalid, or the name is taken.
pub fn update_department(
    persistence: &mut Persistence,
    department_id: i64,
    request: &UpdateDepartmentRequest,
) -> Result<Department, ApiError> {
    let mut department: Department = get_department(persistence, department_id)?;

    if let Some(name) = &request.name {
        department.name = name.trim().to_string();
    }
    if let Some(description) = &request.description {
        department.description = normalize_optional(description.clone());
    }
    validate_department(&department)?;

    persistence.update_department(&department).map_err(|e| {
        map_unique(
            e,
            "unique_department_name",
            format!("Department '{}' already exists", department.name),
        )
    })?;

    info!(department_id, "Updated department");
    get_department(persistence, department_id)
}

/// Deletes a department.
///
/// Employees and jobs assigned to the department are left unassigned.
///
/// # Errors
///
/// Returns `Conflict` while any contract references the department.
pub fn delete_department(
    persistence: &mut Persistence,
    department_id: i64,
) -> Result<DeleteResponse, ApiError> {
    get_department(persistence, department_id)?;

    let contracts: i64 = persistence.count_contracts_for_department(department_id)?;
    if contracts > 0 {
        return Err(ApiError::Conflict {
            rule: String::from("department_in_use"),
            message: format!(
                "Department {department_id} is referenced by {contracts} contract(s)"
            ),
        });
    }

    let unassigned: i64 = persistence.count_soft_references_to_department(department_id)?;
    persistence.delete_department(department_id)?;

    info!(department_id, unassigned, "Deleted department");
    Ok(DeleteResponse {
        id: department_id,
        message: format!(
            "Department {department_id} deleted; {unassigned} employee(s) and job(s) unassigned"
        ),
    })
}
