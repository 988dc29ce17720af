// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for the persistence layer.
//!
//! ## Module Organization
//!
//! - `departments`: Department writes
//! - `employees`: Employee writes and deletion with site cleanup
//! - `contracts`: Contract writes, including supersession of the active one
//! - `jobs`: Job posting writes
//! - `applicants`: Applicant writes
//! - `sites`: Site writes and roster maintenance
//! - `operations`: Fish pool, lab box and egg migration writes
//!
//! Updates write every column of the stored record; callers load, patch and
//! validate before calling them. Multi-statement writes run in a single
//! transaction.

pub mod applicants;
pub mod contracts;
pub mod departments;
pub mod employees;
pub mod jobs;
pub mod operations;
pub mod sites;

use crate::error::PersistenceError;

/// Maps a zero-row update or delete to `NotFound`.
pub(crate) fn ensure_affected(
    rows_affected: usize,
    entity: &str,
    id: i64,
) -> Result<(), PersistenceError> {
    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("{entity} {id} not found")));
    }
    Ok(())
}

/// Returns the ID of a record that must already be persisted.
pub(crate) fn require_id(id: Option<i64>, entity: &str) -> Result<i64, PersistenceError> {
    id.ok_or_else(|| PersistenceError::QueryFailed(format!("{entity} has no ID")))
}
