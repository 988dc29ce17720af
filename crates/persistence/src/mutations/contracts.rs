// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contract mutations.

use aquahr_domain::{Contract, ContractStatus, format_date};
use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use time::Date;
use tracing::info;

use crate::backend::sqlite::last_insert_id;
use crate::diesel_schema::contracts;
use crate::error::PersistenceError;
use crate::mutations::{ensure_affected, require_id};

/// A prior contract to terminate before a new one is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Supersede {
    pub contract_id: i64,
    pub end_date: Date,
}

fn terminate(
    conn: &mut SqliteConnection,
    contract_id: i64,
    end_date: Date,
) -> Result<(), PersistenceError> {
    info!(contract_id, %end_date, "Terminating contract");

    let rows: usize = diesel::update(contracts::table)
        .filter(contracts::contract_id.eq(contract_id))
        .set((
            contracts::status.eq(ContractStatus::Terminated.as_str()),
            contracts::end_date.eq(Some(format_date(end_date))),
            contracts::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    ensure_affected(rows, "Contract", contract_id)
}

/// Inserts a contract and returns its ID.
///
/// When `supersede` is given, that contract is terminated first in the
/// same transaction; the one-active-contract index never sees two active
/// rows for the employee.
///
/// # Errors
///
/// Returns `UniqueViolation` if the employee would hold two active
/// contracts, `ForeignKeyViolation` for a missing employee or department,
/// or another error if a statement fails. Nothing is written on error.
pub fn insert_contract(
    conn: &mut SqliteConnection,
    contract: &Contract,
    supersede: Option<Supersede>,
) -> Result<i64, PersistenceError> {
    info!(
        employee_id = contract.employee_id,
        status = contract.status.as_str(),
        "Creating contract"
    );

    conn.transaction::<_, PersistenceError, _>(|conn| {
        if let Some(prior) = supersede {
            terminate(conn, prior.contract_id, prior.end_date)?;
        }

        diesel::insert_into(contracts::table)
            .values((
                contracts::employee_id.eq(contract.employee_id),
                contracts::department_id.eq(contract.department_id),
                contracts::contract_type.eq(contract.contract_type.as_str()),
                contracts::start_date.eq(format_date(contract.start_date)),
                contracts::end_date.eq(contract.end_date.map(format_date)),
                contracts::salary.eq(contract.salary),
                contracts::status.eq(contract.status.as_str()),
                contracts::notes.eq(&contract.notes),
            ))
            .execute(conn)?;

        let contract_id: i64 = last_insert_id(conn)?;
        info!(contract_id, "Contract created");
        Ok(contract_id)
    })
}

/// Writes every column of a stored contract.
///
/// # Errors
///
/// Returns `NotFound` if the contract does not exist, or a constraint
/// error if the new values are rejected.
pub fn update_contract(
    conn: &mut SqliteConnection,
    contract: &Contract,
) -> Result<(), PersistenceError> {
    let contract_id: i64 = require_id(contract.contract_id, "Contract")?;
    info!(contract_id, status = contract.status.as_str(), "Updating contract");

    let rows: usize = diesel::update(contracts::table)
        .filter(contracts::contract_id.eq(contract_id))
        .set((
            contracts::department_id.eq(contract.department_id),
            contracts::contract_type.eq(contract.contract_type.as_str()),
            contracts::start_date.eq(format_date(contract.start_date)),
            contracts::end_date.eq(contract.end_date.map(format_date)),
            contracts::salary.eq(contract.salary),
            contracts::status.eq(contract.status.as_str()),
            contracts::notes.eq(&contract.notes),
            contracts::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    ensure_affected(rows, "Contract", contract_id)
}

/// Deletes a contract.
///
/// # Errors
///
/// Returns `NotFound` if the contract does not exist.
pub fn delete_contract(
    conn: &mut SqliteConnection,
    contract_id: i64,
) -> Result<(), PersistenceError> {
    info!(contract_id, "Deleting contract");

    let rows: usize = diesel::delete(contracts::table)
        .filter(contracts::contract_id.eq(contract_id))
        .execute(conn)?;

    ensure_affected(rows, "Contract", contract_id)
}
