// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contract queries.

use aquahr_domain::{Contract, ContractSortKey, Page};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use tracing::debug;

use crate::data_models::{ContractFilter, ContractRow, ListOptions};
use crate::diesel_schema::{contracts, employees};
use crate::error::PersistenceError;

/// Retrieves a contract by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored row cannot
/// be reconstructed.
/// Returns `Ok(None)` if the contract is not found.
pub fn get_contract(
    conn: &mut SqliteConnection,
    contract_id: i64,
) -> Result<Option<Contract>, PersistenceError> {
    debug!("Looking up contract by ID: {}", contract_id);

    let result: Result<ContractRow, diesel::result::Error> = contracts::table
        .filter(contracts::contract_id.eq(contract_id))
        .select(ContractRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Contract::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves every contract held by an employee, oldest start first.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row cannot be
/// reconstructed.
pub fn list_contracts_for_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<Contract>, PersistenceError> {
    debug!("Loading contracts for employee {}", employee_id);

    let rows: Vec<ContractRow> = contracts::table
        .filter(contracts::employee_id.eq(employee_id))
        .order_by((contracts::start_date.asc(), contracts::contract_id.asc()))
        .select(ContractRow::as_select())
        .load(conn)?;

    rows.into_iter().map(Contract::try_from).collect()
}

fn filtered<'a>(
    filter: ContractFilter,
    pattern: Option<&str>,
) -> contracts::BoxedQuery<'a, Sqlite> {
    let mut query = contracts::table.into_boxed();
    if let Some(employee_id) = filter.employee_id {
        query = query.filter(contracts::employee_id.eq(employee_id));
    }
    if let Some(department_id) = filter.department_id {
        query = query.filter(contracts::department_id.eq(department_id));
    }
    if let Some(status) = filter.status {
        query = query.filter(contracts::status.eq(status.as_str()));
    }
    if let Some(pattern) = pattern {
        let matching_employees = employees::table
            .filter(
                matches_pattern!(employees::first_name, pattern)
                    .or(matches_pattern!(employees::last_name, pattern))
                    .or(matches_pattern!(employees::email, pattern)),
            )
            .select(employees::employee_id);
        query = query.filter(
            contracts::employee_id
                .eq_any(matching_employees)
                .or(matches_pattern!(contracts::notes, pattern)),
        );
    }
    query
}

/// Lists contracts matching the filter.
///
/// The search term matches the holder's name or email and the contract
/// notes.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_contracts(
    conn: &mut SqliteConnection,
    filter: ContractFilter,
    options: &ListOptions<ContractSortKey>,
) -> Result<Page<Contract>, PersistenceError> {
    let pattern: Option<String> = options.search_pattern();
    debug!(?filter, ?pattern, sort = options.sort.as_str(), "Listing contracts");

    let total: i64 = filtered(filter, pattern.as_deref())
        .count()
        .get_result(conn)?;

    let query = filtered(filter, pattern.as_deref()).select(ContractRow::as_select());
    let tiebreak = contracts::contract_id;
    let query = match options.sort {
        ContractSortKey::StartDate => {
            apply_order!(query, contracts::start_date, options.order, tiebreak)
        }
        ContractSortKey::EndDate => {
            apply_order!(query, contracts::end_date, options.order, tiebreak)
        }
        ContractSortKey::Salary => apply_order!(query, contracts::salary, options.order, tiebreak),
        ContractSortKey::Status => apply_order!(query, contracts::status, options.order, tiebreak),
        ContractSortKey::CreatedAt => {
            apply_order!(query, contracts::created_at, options.order, tiebreak)
        }
    };

    let rows: Vec<ContractRow> = query
        .limit(options.page.limit())
        .offset(options.page.offset())
        .load(conn)?;

    let items: Vec<Contract> = rows
        .into_iter()
        .map(Contract::try_from)
        .collect::<Result<_, _>>()?;

    Ok(Page::new(items, total, options.page))
}
