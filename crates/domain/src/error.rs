// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{ApplicantStage, ContractStatus, JobStatus};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A required field was missing or blank.
    #[error("Field '{field}' is required")]
    MissingField {
        /// The field name.
        field: &'static str,
    },
    /// A field exceeded its maximum length.
    #[error("Field '{field}' must be at most {max} characters")]
    FieldTooLong {
        /// The field name.
        field: &'static str,
        /// The maximum permitted length.
        max: usize,
    },
    /// An email address is syntactically invalid.
    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),
    /// Failed to parse a date from a string.
    #[error("Failed to parse date '{value}' for field '{field}': expected YYYY-MM-DD")]
    DateParseError {
        /// The field name.
        field: &'static str,
        /// The invalid date string.
        value: String,
    },
    /// A date range ends before it starts.
    #[error("Field '{end_field}' ({end}) must not be before '{start_field}' ({start})")]
    InvalidDateRange {
        /// The start field name.
        start_field: &'static str,
        /// The start date.
        start: time::Date,
        /// The end field name.
        end_field: &'static str,
        /// The end date.
        end: time::Date,
    },
    /// A date that must lie in the past is in the future.
    #[error("Field '{field}' ({date}) must not be in the future")]
    DateInFuture {
        /// The field name.
        field: &'static str,
        /// The offending date.
        date: time::Date,
    },
    /// An employee would be younger than the minimum hiring age.
    #[error("Employee must be at least {min_age} years old at hire date")]
    BelowMinimumAge {
        /// The minimum age in years.
        min_age: u8,
    },
    /// An enum field held an unknown value.
    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidEnumValue {
        /// The field name.
        field: &'static str,
        /// The unknown value.
        value: String,
    },
    /// A numeric amount must be strictly positive.
    #[error("Field '{field}' must be greater than 0, got {value}")]
    NonPositiveAmount {
        /// The field name.
        field: &'static str,
        /// The offending value.
        value: i64,
    },
    /// Minimum salary exceeds maximum salary.
    #[error("salary_min ({min}) must not exceed salary_max ({max})")]
    InvalidSalaryRange {
        /// The minimum salary.
        min: i64,
        /// The maximum salary.
        max: i64,
    },
    /// An experience entry failed validation.
    #[error("Experience entry {index}: {reason}")]
    InvalidExperience {
        /// Zero-based position of the entry.
        index: usize,
        /// Description of the failure.
        reason: String,
    },
    /// Too many items were supplied for a list field.
    #[error("Field '{field}' accepts at most {max} entries, got {count}")]
    TooManyEntries {
        /// The field name.
        field: &'static str,
        /// The maximum permitted count.
        max: usize,
        /// The supplied count.
        count: usize,
    },
    /// A skill entry was blank.
    #[error("Skill entry {index} is empty")]
    EmptySkill {
        /// Zero-based position of the entry.
        index: usize,
    },
    /// Contract status transition is not permitted.
    #[error("Cannot change contract status from {from} to {to}")]
    InvalidContractTransition {
        /// The current status.
        from: ContractStatus,
        /// The requested status.
        to: ContractStatus,
    },
    /// Employee already holds an active contract.
    #[error("Employee {employee_id} already has active contract {contract_id}")]
    ActiveContractExists {
        /// The employee.
        employee_id: i64,
        /// The existing active contract.
        contract_id: i64,
    },
    /// Job status transition is not permitted.
    #[error("Cannot change job status from {from} to {to}")]
    InvalidJobTransition {
        /// The current status.
        from: JobStatus,
        /// The requested status.
        to: JobStatus,
    },
    /// The job does not accept applications.
    #[error("Job {job_id} is not open for applications (status {status})")]
    JobNotOpen {
        /// The job.
        job_id: i64,
        /// The job's current status.
        status: JobStatus,
    },
    /// Applicant stage transition is not permitted.
    #[error("Cannot move applicant from stage {from} to {to}")]
    InvalidStageTransition {
        /// The current stage.
        from: ApplicantStage,
        /// The requested stage.
        to: ApplicantStage,
    },
    /// Site manager and supervisor are the same employee.
    #[error("Employee {employee_id} cannot be both manager and supervisor of a site")]
    ManagerIsSupervisor {
        /// The employee.
        employee_id: i64,
    },
    /// A site manager or supervisor also appears in the roster.
    #[error("Employee {employee_id} is the site {role} and cannot also be an assigned employee")]
    LeaderInRoster {
        /// The employee.
        employee_id: i64,
        /// Either "manager" or "supervisor".
        role: &'static str,
    },
    /// The same employee appears twice in a roster.
    #[error("Employee {employee_id} appears more than once in the site roster")]
    DuplicateRosterEntry {
        /// The employee.
        employee_id: i64,
    },
    /// Page request parameters are out of range.
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),
    /// A sort key is not supported for the listed resource.
    #[error("Unsupported sort key '{0}'")]
    InvalidSortKey(String),
}
