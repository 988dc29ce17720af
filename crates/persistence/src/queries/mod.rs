// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `departments`: Department lookups and reference counts
//! - `employees`: Employee lookups, listing and existence checks
//! - `contracts`: Contract lookups and per-employee history
//! - `jobs`: Job postings
//! - `applicants`: Applicants and per-job email checks
//! - `sites`: Sites with their rosters
//! - `operations`: Fish pools, lab boxes and parent egg migrations
//!
//! List queries build the same boxed, filtered query twice: once for the
//! total count and once for the requested page.

/// Orders a boxed query by `$column` in the requested direction, breaking
/// ties on `$tiebreak` so paging is stable.
macro_rules! apply_order {
    ($query:expr, $column:expr, $order:expr, $tiebreak:expr) => {
        match $order {
            aquahr_domain::SortOrder::Asc => $query
                .order_by($column.asc())
                .then_order_by($tiebreak.asc()),
            aquahr_domain::SortOrder::Desc => $query
                .order_by($column.desc())
                .then_order_by($tiebreak.asc()),
        }
    };
}

/// `$column LIKE $pattern ESCAPE '\'`, for patterns from
/// `ListOptions::search_pattern`.
macro_rules! matches_pattern {
    ($column:expr, $pattern:expr) => {
        $column.like($pattern.to_string()).escape('\\')
    };
}

pub mod applicants;
pub mod contracts;
pub mod departments;
pub mod employees;
pub mod jobs;
pub mod operations;
pub mod sites;
