// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening AquaHR's `SQLite` database.
//!
//! A connection is configured for how it will be used (scratch in-memory
//! database or the long-lived server file), migrated, and then checked
//! before any query or mutation runs on it.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// The HR schema: departments, people, recruitment, sites and hatchery.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Milliseconds a file connection waits on a locked database.
const FILE_BUSY_TIMEOUT_MS: u32 = 5_000;

/// How a connection will be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// A private shared-cache database that disappears with the connection.
    InMemory,
    /// The on-disk database the server keeps between runs.
    File,
}

impl ConnectionMode {
    /// Statements run on a fresh connection before migrating.
    fn pragmas(self) -> Vec<String> {
        let mut pragmas: Vec<String> = vec![String::from("PRAGMA foreign_keys = ON")];
        if self == Self::File {
            pragmas.push(String::from("PRAGMA journal_mode = WAL"));
            pragmas.push(String::from("PRAGMA synchronous = NORMAL"));
            pragmas.push(format!("PRAGMA busy_timeout = {FILE_BUSY_TIMEOUT_MS}"));
        }
        pragmas
    }
}

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Opens, configures and migrates the database at `database_url`.
///
/// # Errors
///
/// Returns an error if the connection cannot be made, a pragma or
/// migration fails, or foreign keys end up disabled.
pub fn open(
    database_url: &str,
    mode: ConnectionMode,
) -> Result<SqliteConnection, PersistenceError> {
    info!(url = database_url, ?mode, "Opening AquaHR database");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;

    for pragma in mode.pragmas() {
        debug!(%pragma, "Configuring connection");
        diesel::sql_query(&pragma)
            .execute(&mut conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("{pragma}: {e}")))?;
    }

    let applied: usize = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?
        .len();
    info!(applied, "Schema migrations up to date");

    verify_foreign_key_enforcement(&mut conn)?;
    Ok(conn)
}

/// Fails unless the connection enforces foreign keys.
///
/// Contracts, rosters and egg migrations all depend on it; `SQLite`
/// leaves it off per connection unless asked.
///
/// # Errors
///
/// Returns `ForeignKeyEnforcementNotEnabled` if enforcement is off, or a
/// query error if the pragma cannot be read.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let pragma: ForeignKeysPragma = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    if pragma.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }
    Ok(())
}

/// ID of the row most recently inserted on this connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_id(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}
