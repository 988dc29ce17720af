// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for AquaHR.
//!
//! Handlers here turn request DTOs into domain values, run the domain
//! rules, check references against persistence and return response
//! values. Transport concerns (HTTP, uploads, live events) live in the
//! server crate.

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

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_domain_error};
pub use handlers::applicants::{
    change_applicant_stage, create_applicant, delete_applicant, get_applicant, list_applicants,
    update_applicant,
};
pub use handlers::contracts::{
    create_contract, delete_contract, get_contract, list_contracts, list_employee_contracts,
    terminate_contract, update_contract,
};
pub use handlers::departments::{
    create_department, delete_department, get_department, list_departments, update_department,
};
pub use handlers::employees::{
    attach_employee_documents, create_employee, delete_employee, get_employee, list_employees,
    update_employee,
};
pub use handlers::jobs::{create_job, delete_job, get_job, list_jobs, update_job};
pub use handlers::operations::{
    create_egg_migration, create_fish_pool, create_lab_box, delete_egg_migration,
    delete_fish_pool, delete_lab_box, get_egg_migration, get_fish_pool, get_lab_box,
    list_egg_migrations, list_fish_pools, list_lab_boxes, update_egg_migration, update_fish_pool,
    update_lab_box,
};
pub use handlers::sites::{
    assign_site_employee, create_site, delete_site, get_site, list_sites, replace_site_roster,
    set_site_image, unassign_site_employee, update_site,
};
pub use request_response::{
    ApplicantListQuery, AttachDocumentsRequest, ChangeStageRequest, ChangeStageResponse,
    ContractListQuery, CreateApplicantRequest, CreateContractRequest, CreateContractResponse,
    CreateDepartmentRequest, CreateEggMigrationRequest, CreateEmployeeRequest,
    CreateFishPoolRequest, CreateJobRequest, CreateLabBoxRequest, CreateSiteRequest,
    DeleteEmployeeResponse, DeleteJobResponse, DeleteResponse, DepartmentListQuery,
    EggMigrationListQuery, EmployeeListQuery, ExperienceInput, JobListQuery,
    ReplaceRosterRequest, SiteListQuery, TerminateContractRequest, UpdateApplicantRequest,
    UpdateContractRequest, UpdateDepartmentRequest, UpdateEggMigrationRequest,
    UpdateEmployeeRequest, UpdateFishPoolRequest, UpdateJobRequest, UpdateLabBoxRequest,
    UpdateSiteRequest,
};

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
