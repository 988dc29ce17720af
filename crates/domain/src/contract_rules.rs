// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cross-contract lifecycle rules.
//!
//! An employee holds at most one `ACTIVE` contract. Creating or activating
//! another one either supersedes the current contract (when the caller asks
//! for it) or is rejected.

use crate::error::DomainError;
use crate::types::{Contract, ContractStatus};
use time::Date;

/// Chooses the initial status of a contract when the caller gives none.
///
/// Contracts starting after `today` are `Pending`; all others are `Active`.
#[must_use]
pub fn default_contract_status(start_date: Date, today: Date) -> ContractStatus {
    if start_date > today {
        ContractStatus::Pending
    } else {
        ContractStatus::Active
    }
}

/// Returns the employee's current active contract, if any.
///
/// `exclude` skips one contract id, used when the contract being changed
/// is itself in `existing`.
#[must_use]
pub fn find_active_contract(
    existing: &[Contract],
    employee_id: i64,
    exclude: Option<i64>,
) -> Option<&Contract> {
    existing.iter().find(|c| {
        c.employee_id == employee_id
            && c.status == ContractStatus::Active
            && (exclude.is_none() || c.contract_id != exclude)
    })
}

/// Decides what must happen to existing contracts before a new one is stored.
///
/// # Arguments
///
/// * `existing` - The employee's current contracts
/// * `new_contract` - The contract about to be created
/// * `terminate_active` - Whether the caller agreed to terminate the current
///   active contract
///
/// # Returns
///
/// * `Ok(None)` if the contract can be inserted as-is
/// * `Ok(Some(contract_id))` if that contract must be terminated first
///
/// # Errors
///
/// Returns `DomainError::ActiveContractExists` if the new contract is active,
/// another active contract exists, and `terminate_active` is false.
pub fn plan_contract_creation(
    existing: &[Contract],
    new_contract: &Contract,
    terminate_active: bool,
) -> Result<Option<i64>, DomainError> {
    if new_contract.status != ContractStatus::Active {
        return Ok(None);
    }

    let Some(active) = find_active_contract(existing, new_contract.employee_id, None) else {
        return Ok(None);
    };
    let active_id: i64 = active.contract_id.unwrap_or_default();

    if terminate_active {
        Ok(Some(active_id))
    } else {
        Err(DomainError::ActiveContractExists {
            employee_id: new_contract.employee_id,
            contract_id: active_id,
        })
    }
}

/// Validates a status change on an existing contract.
///
/// # Errors
///
/// Returns an error if the transition is not permitted, or if the contract
/// would become active while the employee already has another active one.
pub fn validate_status_change(
    current: &Contract,
    target: ContractStatus,
    existing: &[Contract],
) -> Result<(), DomainError> {
    if current.status == target {
        return Ok(());
    }

    if !current.status.can_transition_to(target) {
        return Err(DomainError::InvalidContractTransition {
            from: current.status,
            to: target,
        });
    }

    if target == ContractStatus::Active
        && let Some(active) =
            find_active_contract(existing, current.employee_id, current.contract_id)
    {
        return Err(DomainError::ActiveContractExists {
            employee_id: current.employee_id,
            contract_id: active.contract_id.unwrap_or_default(),
        });
    }

    Ok(())
}

/// The end date to record when terminating a contract on `today`.
///
/// A contract whose scheduled end is already earlier keeps it; otherwise
/// the end is pulled forward to `today`, but never before the start.
#[must_use]
pub fn termination_end_date(contract: &Contract, today: Date) -> Date {
    let effective: Date = match contract.end_date {
        Some(end) if end < today => end,
        _ => today,
    };
    effective.max(contract.start_date)
}
