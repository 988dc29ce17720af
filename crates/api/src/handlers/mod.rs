// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions, one module per resource.
//!
//! Every handler takes the persistence adapter explicitly. Handlers whose
//! rules depend on the current date take `today` as an argument so that
//! callers (and tests) decide what "today" is.

pub mod applicants;
pub mod contracts;
pub mod departments;
pub mod employees;
pub mod jobs;
pub mod operations;
pub mod sites;

use std::str::FromStr;

use aquahr_domain::{
    DomainError, Experience, PageRequest, normalize_optional, parse_date, parse_optional_date,
    parse_sort_key, parse_sort_order,
};
use aquahr_persistence::{ListOptions, Persistence, PersistenceError};

use crate::error::ApiError;
use crate::request_response::ExperienceInput;

/// Builds list options from raw query parameters.
///
/// # Errors
///
/// Returns an error if the sort key, order or paging values are invalid.
pub(crate) fn list_options<K>(
    search: Option<&str>,
    sort: Option<&str>,
    order: Option<&str>,
    page: Option<u32>,
    per_page: Option<u32>,
) -> Result<ListOptions<K>, ApiError>
where
    K: FromStr<Err = DomainError> + Default,
{
    Ok(ListOptions {
        search: normalize_optional(search.map(String::from)),
        sort: parse_sort_key::<K>(sort)?,
        order: parse_sort_order(order)?,
        page: PageRequest::new(page, per_page)?,
    })
}

/// Parses an optional enum value, treating blank strings as absent.
///
/// # Errors
///
/// Returns an error if a non-blank value is not a known variant.
pub(crate) fn parse_optional_enum<T>(value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr<Err = DomainError>,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => Ok(Some(v.parse::<T>()?)),
    }
}

/// Converts experience inputs, reporting date errors against the entry.
///
/// # Errors
///
/// Returns `InvalidInput` naming `experience[i].<field>` for unparseable dates.
pub(crate) fn experience_from_inputs(
    inputs: &[ExperienceInput],
) -> Result<Vec<Experience>, ApiError> {
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            let entry_error = |name: &str, err: DomainError| ApiError::InvalidInput {
                field: format!("experience[{index}].{name}"),
                message: err.to_string(),
            };

            let start_date = parse_date("start_date", &input.start_date)
                .map_err(|e| entry_error("start_date", e))?;
            let end_date = parse_optional_date("end_date", input.end_date.as_deref())
                .map_err(|e| entry_error("end_date", e))?;

            Ok(Experience {
                company: input.company.trim().to_string(),
                role: input.role.trim().to_string(),
                start_date,
                end_date,
                description: normalize_optional(input.description.clone()),
            })
        })
        .collect()
}

/// Rewrites a unique-constraint failure as a readable conflict.
pub(crate) fn map_unique(err: PersistenceError, rule: &str, message: String) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(_) => ApiError::Conflict {
            rule: rule.to_string(),
            message,
        },
        other => ApiError::from(other),
    }
}

/// Fails with `InvalidInput` if a referenced department does not exist.
pub(crate) fn require_department(
    persistence: &mut Persistence,
    field: &str,
    department_id: i64,
) -> Result<(), ApiError> {
    if persistence.department_exists(department_id)? {
        Ok(())
    } else {
        Err(ApiError::unknown_reference(
            field,
            "Department",
            department_id,
        ))
    }
}

/// Fails with `InvalidInput` if a referenced employee does not exist.
pub(crate) fn require_employee(
    persistence: &mut Persistence,
    field: &str,
    employee_id: i64,
) -> Result<(), ApiError> {
    if persistence.employee_exists(employee_id)? {
        Ok(())
    } else {
        Err(ApiError::unknown_reference(field, "Employee", employee_id))
    }
}
