// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee handlers.

use aquahr_domain::{
    Employee, EmployeeSortKey, EmploymentStatus, Gender, Page, normalize_email,
    normalize_optional, parse_date, parse_optional_date, validate_employee,
};
use aquahr_persistence::{EmployeeFilter, ListOptions, Persistence};
use time::Date;
use tracing::{debug, info};

use super::{experience_from_inputs, list_options, parse_optional_enum, require_department};
use crate::error::ApiError;
use crate::request_response::{
    AttachDocumentsRequest, CreateEmployeeRequest, DeleteEmployeeResponse, EmployeeListQuery,
    UpdateEmployeeRequest,
};

fn ensure_email_available(
    persistence: &mut Persistence,
    email: &str,
    exclude: Option<i64>,
) -> Result<(), ApiError> {
    match persistence.find_employee_id_by_email(email, exclude)? {
        Some(holder) => Err(ApiError::Conflict {
            rule: String::from("unique_employee_email"),
            message: format!("Email '{email}' is already used by employee {holder}"),
        }),
        None => Ok(()),
    }
}

/// Creates an employee.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The onboarding data, including the experience step
/// * `today` - The current date, used for age and experience checks
///
/// # Errors
///
/// Returns an error if:
/// - Any field fails validation (experience errors name the entry index)
/// - The department does not exist
/// - The email address is already in use
pub fn create_employee(
    persistence: &mut Persistence,
    request: &CreateEmployeeRequest,
    today: Date,
) -> Result<Employee, ApiError> {
    let employee: Employee = Employee {
        employee_id: None,
        first_name: request.first_name.trim().to_string(),
        last_name: request.last_name.trim().to_string(),
        email: normalize_email(&request.email),
        phone: normalize_optional(request.phone.clone()),
        gender: parse_optional_enum::<Gender>(request.gender.as_deref())?,
        date_of_birth: parse_optional_date("date_of_birth", request.date_of_birth.as_deref())?,
        address: normalize_optional(request.address.clone()),
        position: request.position.trim().to_string(),
        department_id: request.department_id,
        hire_date: parse_date("hire_date", &request.hire_date)?,
        employment_status: parse_optional_enum::<EmploymentStatus>(
            request.employment_status.as_deref(),
        )?
        .unwrap_or_default(),
        cv_url: None,
        id_document_url: None,
        photo_url: None,
        experience: experience_from_inputs(&request.experience)?,
        created_at: None,
        updated_at: None,
    };
    validate_employee(&employee, today)?;

    if let Some(department_id) = employee.department_id {
        require_department(persistence, "department_id", department_id)?;
    }
    ensure_email_available(persistence, &employee.email, None)?;

    let employee_id: i64 = persistence.create_employee(&employee)?;
    info!(employee_id, email = %employee.email, "Created employee");
    get_employee(persistence, employee_id)
}

/// Retrieves an employee.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the employee does not exist.
pub fn get_employee(persistence: &mut Persistence, employee_id: i64) -> Result<Employee, ApiError> {
    persistence
        .get_employee(employee_id)?
        .ok_or_else(|| ApiError::not_found("Employee", employee_id))
}

/// Lists employees.
///
/// # Errors
///
/// Returns an error if the query parameters are invalid.
pub fn list_employees(
    persistence: &mut Persistence,
    query: &EmployeeListQuery,
) -> Result<Page<Employee>, ApiError> {
    let options: ListOptions<EmployeeSortKey> = list_options(
        query.search.as_deref(),
        query.sort.as_deref(),
        query.order.as_deref(),
        query.page,
        query.per_page,
    )?;
    let filter: EmployeeFilter = EmployeeFilter {
        department_id: query.department_id,
        employment_status: parse_optional_enum(query.employment_status.as_deref())?,
    };

    let page: Page<Employee> = persistence.list_employees(filter, &options)?;
    debug!(total = page.total, "Listed employees");
    Ok(page)
}

/// Applies a partial update to an employee.
///
/// The patched record is validated as a whole, so a new hire date is
/// checked against the stored date of birth and vice versa.
///
/// # Errors
///
/// Returns an error if the employee does not exist, the patched record is
/// invalid, the department does not exist, or the email is taken.
pub fn update_employee(
    persistence: &mut Persistence,
    employee_id: i64,
    request: &UpdateEmployeeRequest,
    today: Date,
) -> Result<Employee, ApiError> {
    let mut employee: Employee = get_employee(persistence, employee_id)?;

    if let Some(first_name) = &request.first_name {
        employee.first_name = first_name.trim().to_string();
    }
    if let Some(last_name) = &request.last_name {
        employee.last_name = last_name.trim().to_string();
    }
    if let Some(email) = &request.email {
        employee.email = normalize_email(email);
    }
    if let Some(phone) = &request.phone {
        employee.phone = normalize_optional(phone.clone());
    }
    if let Some(gender) = &request.gender {
        employee.gender = parse_optional_enum::<Gender>(gender.as_deref())?;
    }
    if let Some(date_of_birth) = &request.date_of_birth {
        employee.date_of_birth = parse_optional_date("date_of_birth", date_of_birth.as_deref())?;
    }
    if let Some(address) = &request.address {
        employee.address = normalize_optional(address.clone());
    }
    if let Some(position) = &request.position {
        employee.position = position.trim().to_string();
    }
    if let Some(department_id) = request.department_id {
        employee.department_id = department_id;
    }
    if let Some(hire_date) = &request.hire_date {
        employee.hire_date = parse_date("hire_date", hire_date)?;
    }
    if let Some(status) = &request.employment_status {
        employee.employment_status = status.parse::<EmploymentStatus>()?;
    }
    if let Some(experience) = &request.experience {
        employee.experience = experience_from_inputs(experience)?;
    }
    validate_employee(&employee, today)?;

    if let Some(Some(department_id)) = request.department_id {
        require_department(persistence, "department_id", department_id)?;
    }
    if request.email.is_some() {
        ensure_email_available(persistence, &employee.email, Some(employee_id))?;
    }

    persistence.update_employee(&employee)?;
    info!(employee_id, "Updated employee");
    get_employee(persistence, employee_id)
}

/// Records stored document locations on an employee.
///
/// # Errors
///
/// Returns an error if the employee does not exist or no document is given.
pub fn attach_employee_documents(
    persistence: &mut Persistence,
    employee_id: i64,
    request: &AttachDocumentsRequest,
) -> Result<Employee, ApiError> {
    if request.cv_url.is_none() && request.id_document_url.is_none() && request.photo_url.is_none()
    {
        return Err(ApiError::InvalidInput {
            field: String::from("documents"),
            message: String::from("At least one of cv, id_document or photo is required"),
        });
    }

    let mut employee: Employee = get_employee(persistence, employee_id)?;
    if let Some(url) = &request.cv_url {
        employee.cv_url = Some(url.clone());
    }
    if let Some(url) = &request.id_document_url {
        employee.id_document_url = Some(url.clone());
    }
    if let Some(url) = &request.photo_url {
        employee.photo_url = Some(url.clone());
    }

    persistence.update_employee(&employee)?;
    info!(employee_id, "Attached employee documents");
    get_employee(persistence, employee_id)
}

/// Deletes an employee.
///
/// The employee's contracts are deleted with it and reported in the
/// response. Any site that listed the employee as manager, supervisor or
/// roster member is updated.
///
/// # Errors
///
/// Returns `Conflict` while egg migration records name the employee.
pub fn delete_employee(
    persistence: &mut Persistence,
    employee_id: i64,
) -> Result<DeleteEmployeeResponse, ApiError> {
    let employee: Employee = get_employee(persistence, employee_id)?;

    let migrations: i64 = persistence.count_egg_migrations_for_employee(employee_id)?;
    if migrations > 0 {
        return Err(ApiError::Conflict {
            rule: String::from("employee_in_use"),
            message: format!(
                "Employee {employee_id} performed {migrations} egg migration(s) and cannot be deleted"
            ),
        });
    }

    let affected_site_ids: Vec<i64> = persistence.sites_for_employee(employee_id)?;
    let removed_contract_ids: Vec<i64> = persistence
        .list_contracts_for_employee(employee_id)?
        .into_iter()
        .filter_map(|contract| contract.contract_id)
        .collect();
    persistence.delete_employee(employee_id)?;

    info!(
        employee_id,
        affected_sites = affected_site_ids.len(),
        removed_contracts = removed_contract_ids.len(),
        "Deleted employee"
    );
    Ok(DeleteEmployeeResponse {
        employee_id,
        affected_site_ids,
        removed_contract_ids,
        message: format!("Employee {} deleted", employee.full_name()),
    })
}
