// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{
    Applicant, Contract, Department, Employee, Experience, FishPool, Job, LabBox,
    ParentEggMigration,
};
use std::collections::HashSet;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Minimum age, in years, of an employee on their hire date.
pub const MINIMUM_HIRING_AGE: u8 = 16;

/// Maximum number of experience entries on a record.
pub const MAX_EXPERIENCE_ENTRIES: usize = 50;

/// Maximum number of skills on a job posting.
pub const MAX_SKILLS: usize = 30;

const NAME_MAX_LEN: usize = 100;
const EMAIL_MAX_LEN: usize = 254;
const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` naming `field` if the value is not a
/// valid calendar date.
pub fn parse_date(field: &'static str, value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), ISO_DATE).map_err(|_| DomainError::DateParseError {
        field,
        value: value.to_string(),
    })
}

/// Parses an optional date, treating blank strings as absent.
///
/// # Errors
///
/// Returns an error if a non-blank value is not a valid date.
pub fn parse_optional_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<Date>, DomainError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_date(field, v).map(Some),
    }
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Trims a required text field, rejecting blank or overlong values.
///
/// # Errors
///
/// Returns an error if the trimmed value is empty or longer than `max`.
pub fn validate_required(field: &'static str, value: &str, max: usize) -> Result<(), DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::MissingField { field });
    }
    if trimmed.chars().count() > max {
        return Err(DomainError::FieldTooLong { field, max });
    }
    Ok(())
}

/// Normalizes optional free text: trims, and maps blank to `None`.
#[must_use]
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Normalizes an email address for storage and comparison.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates the shape of an email address.
///
/// This is a structural check: exactly one `@`, a non-empty local part,
/// and a dotted domain with no empty labels.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address is malformed.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let invalid = || DomainError::InvalidEmail(email.to_string());

    if email.is_empty() || email.len() > EMAIL_MAX_LEN || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(())
}

/// Validates that `end` is not before `start`.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if the range is inverted.
pub fn validate_date_range(
    start_field: &'static str,
    start: Date,
    end_field: &'static str,
    end: Option<Date>,
) -> Result<(), DomainError> {
    match end {
        Some(end) if end < start => Err(DomainError::InvalidDateRange {
            start_field,
            start,
            end_field,
            end,
        }),
        _ => Ok(()),
    }
}

/// Validates a list of experience entries.
///
/// Each entry needs a company and role, must not start in the future,
/// and must not end before it starts.
///
/// # Errors
///
/// Returns `DomainError::InvalidExperience` carrying the index of the first
/// offending entry, or `DomainError::TooManyEntries`.
pub fn validate_experience(entries: &[Experience], today: Date) -> Result<(), DomainError> {
    if entries.len() > MAX_EXPERIENCE_ENTRIES {
        return Err(DomainError::TooManyEntries {
            field: "experience",
            max: MAX_EXPERIENCE_ENTRIES,
            count: entries.len(),
        });
    }

    for (index, entry) in entries.iter().enumerate() {
        let fail = |reason: String| DomainError::InvalidExperience { index, reason };

        if entry.company.trim().is_empty() {
            return Err(fail(String::from("company is required")));
        }
        if entry.role.trim().is_empty() {
            return Err(fail(String::from("role is required")));
        }
        if entry.start_date > today {
            return Err(fail(format!(
                "start_date {} is in the future",
                format_date(entry.start_date)
            )));
        }
        if let Some(end) = entry.end_date
            && end < entry.start_date
        {
            return Err(fail(format!(
                "end_date {} is before start_date {}",
                format_date(end),
                format_date(entry.start_date)
            )));
        }
    }

    Ok(())
}

/// Normalizes and validates a skill list.
///
/// Skills are trimmed and de-duplicated case-insensitively, keeping the
/// first spelling seen.
///
/// # Errors
///
/// Returns an error if a skill is blank or there are too many skills.
pub fn normalize_skills(skills: &[String]) -> Result<Vec<String>, DomainError> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut normalized: Vec<String> = Vec::with_capacity(skills.len());

    for (index, skill) in skills.iter().enumerate() {
        let trimmed: &str = skill.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptySkill { index });
        }
        if seen.insert(trimmed.to_lowercase()) {
            normalized.push(trimmed.to_string());
        }
    }

    if normalized.len() > MAX_SKILLS {
        return Err(DomainError::TooManyEntries {
            field: "skills",
            max: MAX_SKILLS,
            count: normalized.len(),
        });
    }

    Ok(normalized)
}

/// Validates an optional salary band.
///
/// # Errors
///
/// Returns an error if either bound is non-positive or `min > max`.
pub fn validate_salary_range(min: Option<i64>, max: Option<i64>) -> Result<(), DomainError> {
    if let Some(value) = min
        && value <= 0
    {
        return Err(DomainError::NonPositiveAmount {
            field: "salary_min",
            value,
        });
    }
    if let Some(value) = max
        && value <= 0
    {
        return Err(DomainError::NonPositiveAmount {
            field: "salary_max",
            value,
        });
    }
    if let (Some(min), Some(max)) = (min, max)
        && min > max
    {
        return Err(DomainError::InvalidSalaryRange { min, max });
    }
    Ok(())
}

/// Validates site leadership and roster assignment.
///
/// Rules:
/// - manager and supervisor must be different employees
/// - neither may also appear as a plain assigned employee
/// - the roster may not list an employee twice
///
/// # Errors
///
/// Returns the first rule violation found.
pub fn validate_site_assignment(
    manager_id: Option<i64>,
    supervisor_id: Option<i64>,
    employee_ids: &[i64],
) -> Result<(), DomainError> {
    if let (Some(manager), Some(supervisor)) = (manager_id, supervisor_id)
        && manager == supervisor
    {
        return Err(DomainError::ManagerIsSupervisor {
            employee_id: manager,
        });
    }

    let mut seen: HashSet<i64> = HashSet::new();
    for &employee_id in employee_ids {
        if !seen.insert(employee_id) {
            return Err(DomainError::DuplicateRosterEntry { employee_id });
        }
        if manager_id == Some(employee_id) {
            return Err(DomainError::LeaderInRoster {
                employee_id,
                role: "manager",
            });
        }
        if supervisor_id == Some(employee_id) {
            return Err(DomainError::LeaderInRoster {
                employee_id,
                role: "supervisor",
            });
        }
    }

    Ok(())
}

/// Validates a department's fields.
///
/// # Errors
///
/// Returns an error if the name is blank or too long.
pub fn validate_department(department: &Department) -> Result<(), DomainError> {
    validate_required("name", &department.name, NAME_MAX_LEN)
}

/// Validates an employee record.
///
/// # Errors
///
/// Returns the first field or rule violation found.
pub fn validate_employee(employee: &Employee, today: Date) -> Result<(), DomainError> {
    validate_required("first_name", &employee.first_name, NAME_MAX_LEN)?;
    validate_required("last_name", &employee.last_name, NAME_MAX_LEN)?;
    validate_required("position", &employee.position, NAME_MAX_LEN)?;
    validate_email(&employee.email)?;

    if let Some(dob) = employee.date_of_birth {
        if dob > today {
            return Err(DomainError::DateInFuture {
                field: "date_of_birth",
                date: dob,
            });
        }
        if age_on(dob, employee.hire_date) < i32::from(MINIMUM_HIRING_AGE) {
            return Err(DomainError::BelowMinimumAge {
                min_age: MINIMUM_HIRING_AGE,
            });
        }
    }

    validate_experience(&employee.experience, today)
}

/// Validates a contract's own fields.
///
/// Cross-record rules (one active contract per employee) live in
/// `contract_rules`.
///
/// # Errors
///
/// Returns the first field violation found.
pub fn validate_contract(contract: &Contract) -> Result<(), DomainError> {
    if contract.salary <= 0 {
        return Err(DomainError::NonPositiveAmount {
            field: "salary",
            value: contract.salary,
        });
    }
    validate_date_range("start_date", contract.start_date, "end_date", contract.end_date)
}

/// Validates and normalizes a job posting in place.
///
/// # Errors
///
/// Returns the first field violation found.
pub fn validate_job(job: &mut Job) -> Result<(), DomainError> {
    validate_required("title", &job.title, NAME_MAX_LEN)?;
    validate_required("description", &job.description, 10_000)?;
    validate_salary_range(job.salary_min, job.salary_max)?;
    job.skills = normalize_skills(&job.skills)?;
    Ok(())
}

/// Validates an application.
///
/// # Errors
///
/// Returns the first field violation found.
pub fn validate_applicant(applicant: &Applicant, today: Date) -> Result<(), DomainError> {
    validate_required("first_name", &applicant.first_name, NAME_MAX_LEN)?;
    validate_required("last_name", &applicant.last_name, NAME_MAX_LEN)?;
    validate_email(&applicant.email)?;
    validate_experience(&applicant.experience, today)
}

/// Validates a fish pool.
///
/// # Errors
///
/// Returns an error if the name is blank or the capacity is non-positive.
pub fn validate_fish_pool(pool: &FishPool) -> Result<(), DomainError> {
    validate_required("name", &pool.name, NAME_MAX_LEN)?;
    if let Some(value) = pool.capacity_liters
        && value <= 0
    {
        return Err(DomainError::NonPositiveAmount {
            field: "capacity_liters",
            value,
        });
    }
    Ok(())
}

/// Validates a lab box.
///
/// # Errors
///
/// Returns an error if the code is blank or too long.
pub fn validate_lab_box(lab_box: &LabBox) -> Result<(), DomainError> {
    validate_required("code", &lab_box.code, 50)
}

/// Validates an egg migration record.
///
/// # Errors
///
/// Returns an error if the egg count is non-positive or the date is in the future.
pub fn validate_egg_migration(
    migration: &ParentEggMigration,
    today: Date,
) -> Result<(), DomainError> {
    if migration.egg_count <= 0 {
        return Err(DomainError::NonPositiveAmount {
            field: "egg_count",
            value: migration.egg_count,
        });
    }
    if migration.migration_date > today {
        return Err(DomainError::DateInFuture {
            field: "migration_date",
            date: migration.migration_date,
        });
    }
    Ok(())
}

/// Whole years between `birth` and `on`.
fn age_on(birth: Date, on: Date) -> i32 {
    let mut years: i32 = on.year() - birth.year();
    if (u8::from(on.month()), on.day()) < (u8::from(birth.month()), birth.day()) {
        years -= 1;
    }
    years
}
