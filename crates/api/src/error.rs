// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use aquahr_domain::DomainError;
use aquahr_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request conflicts with stored state.
    #[error("Conflict ({rule}): {message}")]
    Conflict {
        /// The rule that the request would break.
        rule: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Builds a `ResourceNotFound` error for an entity ID.
    #[must_use]
    pub fn not_found(resource_type: &str, id: i64) -> Self {
        Self::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message: format!("{resource_type} {id} does not exist"),
        }
    }

    /// Builds an `InvalidInput` error for a reference to a missing entity.
    #[must_use]
    pub fn unknown_reference(field: &str, resource_type: &str, id: i64) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: format!("{resource_type} {id} does not exist"),
        }
    }
}

fn invalid(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

fn rule(rule: &str, err: &DomainError) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::MissingField { field }
        | DomainError::FieldTooLong { field, .. }
        | DomainError::DateParseError { field, .. }
        | DomainError::DateInFuture { field, .. }
        | DomainError::InvalidEnumValue { field, .. }
        | DomainError::NonPositiveAmount { field, .. }
        | DomainError::TooManyEntries { field, .. } => invalid(field, &err),
        DomainError::InvalidEmail(_) => invalid("email", &err),
        DomainError::InvalidDateRange { end_field, .. } => invalid(end_field, &err),
        DomainError::InvalidSalaryRange { .. } => invalid("salary_min", &err),
        DomainError::InvalidExperience { index, .. } => {
            invalid(&format!("experience[{index}]"), &err)
        }
        DomainError::EmptySkill { index } => invalid(&format!("skills[{index}]"), &err),
        DomainError::DuplicateRosterEntry { .. } => invalid("employee_ids", &err),
        DomainError::InvalidPagination(_) => invalid("page", &err),
        DomainError::InvalidSortKey(_) => invalid("sort", &err),
        DomainError::BelowMinimumAge { .. } => rule("minimum_hiring_age", &err),
        DomainError::InvalidContractTransition { .. } => rule("contract_status_transition", &err),
        DomainError::InvalidJobTransition { .. } => rule("job_status_transition", &err),
        DomainError::InvalidStageTransition { .. } => rule("applicant_stage_transition", &err),
        DomainError::JobNotOpen { .. } => rule("job_open_for_applications", &err),
        DomainError::ManagerIsSupervisor { .. } => rule("distinct_site_leaders", &err),
        DomainError::LeaderInRoster { .. } => rule("leaders_not_in_roster", &err),
        DomainError::ActiveContractExists { .. } => ApiError::Conflict {
            rule: String::from("single_active_contract"),
            message: err.to_string(),
        },
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(message) => Self::ResourceNotFound {
                resource_type: String::from("Record"),
                message,
            },
            PersistenceError::UniqueViolation(message) => Self::Conflict {
                rule: String::from("unique"),
                message,
            },
            PersistenceError::ForeignKeyViolation(message) => Self::Conflict {
                rule: String::from("referential_integrity"),
                message,
            },
            PersistenceError::CheckViolation(message) => Self::DomainRuleViolation {
                rule: String::from("check_constraint"),
                message,
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}
