// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry dates and enum values as strings so that a bad value is
//! reported against its field instead of failing the whole body.
//!
//! Update requests are patches: an absent field leaves the stored value
//! alone. Nullable fields are `Option<Option<T>>`, where `Some(None)` (an
//! explicit JSON `null`) clears the stored value.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes a present field into `Some`, so `null` becomes `Some(None)`.
///
/// Combined with `#[serde(default)]`, an absent field stays `None`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// One prior position in an employee's or applicant's work history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceInput {
    pub company: String,
    pub role: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

// ============================================================================
// Departments
// ============================================================================

/// API request to create a department.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateDepartmentRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// API request to update a department.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateDepartmentRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

/// Query parameters for listing departments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DepartmentListQuery {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

// ============================================================================
// Employees
// ============================================================================

/// API request to create an employee.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub position: String,
    #[serde(default)]
    pub department_id: Option<i64>,
    pub hire_date: String,
    #[serde(default)]
    pub employment_status: Option<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceInput>,
}

/// API request to update an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateEmployeeRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub date_of_birth: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub address: Option<Option<String>>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub department_id: Option<Option<i64>>,
    #[serde(default)]
    pub hire_date: Option<String>,
    #[serde(default)]
    pub employment_status: Option<String>,
    #[serde(default)]
    pub experience: Option<Vec<ExperienceInput>>,
}

/// Stored document locations to attach to an employee.
///
/// Only the documents present are replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AttachDocumentsRequest {
    pub cv_url: Option<String>,
    pub id_document_url: Option<String>,
    pub photo_url: Option<String>,
}

/// Query parameters for listing employees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EmployeeListQuery {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub department_id: Option<i64>,
    pub employment_status: Option<String>,
}

/// API response for a deleted employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEmployeeResponse {
    pub employee_id: i64,
    /// Sites whose leadership or roster changed with the deletion.
    pub affected_site_ids: Vec<i64>,
    /// Contracts removed together with the employee.
    pub removed_contract_ids: Vec<i64>,
    pub message: String,
}

// ============================================================================
// Contracts
// ============================================================================

/// API request to create a contract.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateContractRequest {
    pub employee_id: i64,
    pub department_id: i64,
    pub contract_type: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    pub salary: i64,
    /// Defaults from the start date when omitted.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Terminate the employee's current active contract instead of
    /// rejecting the new one.
    #[serde(default)]
    pub terminate_active: bool,
}

/// API response for a created contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateContractResponse {
    pub contract: aquahr_domain::Contract,
    /// The previously active contract, if it was terminated.
    pub terminated_contract: Option<aquahr_domain::Contract>,
}

/// API request to update a contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateContractRequest {
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub contract_type: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<String>>,
    #[serde(default)]
    pub salary: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// API request to terminate a contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TerminateContractRequest {
    /// Effective end date; derived from today when omitted.
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Query parameters for listing contracts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContractListQuery {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub employee_id: Option<i64>,
    pub department_id: Option<i64>,
    pub status: Option<String>,
}

// ============================================================================
// Jobs
// ============================================================================

/// API request to create a job posting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    #[serde(default)]
    pub department_id: Option<i64>,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    pub employment_type: String,
    pub experience_level: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub salary_min: Option<i64>,
    #[serde(default)]
    pub salary_max: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub closing_date: Option<String>,
}

/// API request to update a job posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateJobRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub department_id: Option<Option<i64>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub salary_min: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub salary_max: Option<Option<i64>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub closing_date: Option<Option<String>>,
}

/// Query parameters for listing jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobListQuery {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<String>,
    pub department_id: Option<i64>,
    pub employment_type: Option<String>,
    pub experience_level: Option<String>,
}

/// API response for a deleted job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteJobResponse {
    pub job_id: i64,
    pub removed_applicants: usize,
    pub message: String,
}

// ============================================================================
// Applicants
// ============================================================================

/// API request to apply to a job.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateApplicantRequest {
    pub job_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceInput>,
}

/// API request to update an applicant's details.
///
/// The stage is changed through its own request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateApplicantRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub resume_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub cover_letter: Option<Option<String>>,
    #[serde(default)]
    pub experience: Option<Vec<ExperienceInput>>,
}

/// API request to move an applicant to another stage.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangeStageRequest {
    pub stage: String,
}

/// API response for a stage change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeStageResponse {
    pub applicant: aquahr_domain::Applicant,
    pub previous_stage: aquahr_domain::ApplicantStage,
}

/// Query parameters for listing applicants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApplicantListQuery {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub job_id: Option<i64>,
    pub stage: Option<String>,
}

// ============================================================================
// Sites
// ============================================================================

/// API request to create a site.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateSiteRequest {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub manager_id: Option<i64>,
    #[serde(default)]
    pub supervisor_id: Option<i64>,
    #[serde(default)]
    pub employee_ids: Vec<i64>,
}

/// API request to update a site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateSiteRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub manager_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub supervisor_id: Option<Option<i64>>,
    #[serde(default)]
    pub employee_ids: Option<Vec<i64>>,
}

/// API request to replace a site roster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplaceRosterRequest {
    pub employee_ids: Vec<i64>,
}

/// Query parameters for listing sites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SiteListQuery {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

// ============================================================================
// Hatchery operations
// ============================================================================

/// API request to create a fish pool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateFishPoolRequest {
    pub name: String,
    #[serde(default)]
    pub capacity_liters: Option<i64>,
}

/// API request to create a lab box.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateLabBoxRequest {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// API request to update a fish pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateFishPoolRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub capacity_liters: Option<Option<i64>>,
}

/// API request to update a lab box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateLabBoxRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

/// API request to record a parent egg migration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateEggMigrationRequest {
    pub fish_pool_id: i64,
    pub lab_box_id: i64,
    pub employee_id: i64,
    pub migration_date: String,
    pub egg_count: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// API request to update a parent egg migration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateEggMigrationRequest {
    #[serde(default)]
    pub fish_pool_id: Option<i64>,
    #[serde(default)]
    pub lab_box_id: Option<i64>,
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub migration_date: Option<String>,
    #[serde(default)]
    pub egg_count: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// Query parameters for listing parent egg migrations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EggMigrationListQuery {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub fish_pool_id: Option<i64>,
    pub lab_box_id: Option<i64>,
    pub employee_id: Option<i64>,
}

// ============================================================================
// Shared
// ============================================================================

/// API response for a deleted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: i64,
    pub message: String,
}
