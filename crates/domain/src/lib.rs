// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and business rules for AquaHR.
//!
//! Everything in this crate is pure: no I/O, no clocks. Callers pass
//! "today" explicitly where a rule depends on the current date.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod contract_rules;
mod error;
mod listing;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use contract_rules::{
    default_contract_status, find_active_contract, plan_contract_creation, termination_end_date,
    validate_status_change,
};
pub use error::DomainError;
pub use listing::{
    ApplicantSortKey, ContractSortKey, DEFAULT_PER_PAGE, DepartmentSortKey, EggMigrationSortKey,
    EmployeeSortKey, JobSortKey, MAX_PER_PAGE, Page, PageRequest, SiteSortKey, SortOrder,
    parse_sort_key, parse_sort_order,
};
pub use types::{
    Applicant, ApplicantStage, Contract, ContractStatus, Department, Employee, EmploymentStatus,
    EmploymentType, Experience, ExperienceLevel, FishPool, Gender, Job, JobStatus, LabBox,
    ParentEggMigration, Site,
};
pub use validation::{
    MAX_EXPERIENCE_ENTRIES, MAX_SKILLS, MINIMUM_HIRING_AGE, format_date, normalize_email,
    normalize_optional, normalize_skills, parse_date, parse_optional_date, validate_applicant,
    validate_contract, validate_date_range, validate_department, validate_egg_migration,
    validate_email, validate_employee, validate_experience, validate_fish_pool, validate_job,
    validate_lab_box, validate_required, validate_salary_range, validate_site_assignment,
};
