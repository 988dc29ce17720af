// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row shapes and their conversion into domain values.
//!
//! Dates are stored as `YYYY-MM-DD` text, enums as their wire spelling and
//! list-valued fields (experience, skills) as JSON text. Reading a row back
//! re-parses all of them, so a corrupt row surfaces as a
//! `ReconstructionError` instead of a panic.

use aquahr_domain::{
    Applicant, ApplicantStage, Contract, ContractStatus, Department, Employee, EmploymentStatus,
    EmploymentType, Experience, ExperienceLevel, FishPool, Gender, Job, JobStatus, LabBox,
    PageRequest, ParentEggMigration, SortOrder, parse_date,
};
use diesel::prelude::*;

use crate::diesel_schema::{
    applicants, contracts, departments, employees, fish_pools, jobs, lab_boxes,
    parent_egg_migrations, sites,
};
use crate::error::PersistenceError;

/// Diesel Queryable struct for department rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = departments)]
pub struct DepartmentRow {
    pub department_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Self {
            department_id: Some(row.department_id),
            name: row.name,
            description: row.description,
            created_at: Some(row.created_at),
        }
    }
}

/// Diesel Queryable struct for employee rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = employees)]
pub struct EmployeeRow {
    pub employee_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub position: String,
    pub department_id: Option<i64>,
    pub hire_date: String,
    pub employment_status: String,
    pub cv_url: Option<String>,
    pub id_document_url: Option<String>,
    pub photo_url: Option<String>,
    pub experience_json: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = PersistenceError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let gender: Option<Gender> = row.gender.as_deref().map(str::parse::<Gender>).transpose()?;
        let date_of_birth = row
            .date_of_birth
            .as_deref()
            .map(|d| parse_date("date_of_birth", d))
            .transpose()?;
        let experience: Vec<Experience> = serde_json::from_str(&row.experience_json)?;

        Ok(Self {
            employee_id: Some(row.employee_id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            gender,
            date_of_birth,
            address: row.address,
            position: row.position,
            department_id: row.department_id,
            hire_date: parse_date("hire_date", &row.hire_date)?,
            employment_status: row.employment_status.parse::<EmploymentStatus>()?,
            cv_url: row.cv_url,
            id_document_url: row.id_document_url,
            photo_url: row.photo_url,
            experience,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        })
    }
}

/// Diesel Queryable struct for contract rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = contracts)]
pub struct ContractRow {
    pub contract_id: i64,
    pub employee_id: i64,
    pub department_id: i64,
    pub contract_type: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub salary: i64,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<ContractRow> for Contract {
    type Error = PersistenceError;

    fn try_from(row: ContractRow) -> Result<Self, Self::Error> {
        Ok(Self {
            contract_id: Some(row.contract_id),
            employee_id: row.employee_id,
            department_id: row.department_id,
            contract_type: row.contract_type.parse::<EmploymentType>()?,
            start_date: parse_date("start_date", &row.start_date)?,
            end_date: row
                .end_date
                .as_deref()
                .map(|d| parse_date("end_date", d))
                .transpose()?,
            salary: row.salary,
            status: row.status.parse::<ContractStatus>()?,
            notes: row.notes,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        })
    }
}

/// Diesel Queryable struct for job rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = jobs)]
pub struct JobRow {
    pub job_id: i64,
    pub title: String,
    pub department_id: Option<i64>,
    pub description: String,
    pub location: Option<String>,
    pub employment_type: String,
    pub experience_level: String,
    pub skills_json: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub status: String,
    pub closing_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<JobRow> for Job {
    type Error = PersistenceError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        Ok(Self {
            job_id: Some(row.job_id),
            title: row.title,
            department_id: row.department_id,
            description: row.description,
            location: row.location,
            employment_type: row.employment_type.parse::<EmploymentType>()?,
            experience_level: row.experience_level.parse::<ExperienceLevel>()?,
            skills: serde_json::from_str(&row.skills_json)?,
            salary_min: row.salary_min,
            salary_max: row.salary_max,
            status: row.status.parse::<JobStatus>()?,
            closing_date: row
                .closing_date
                .as_deref()
                .map(|d| parse_date("closing_date", d))
                .transpose()?,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        })
    }
}

/// Diesel Queryable struct for applicant rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = applicants)]
pub struct ApplicantRow {
    pub applicant_id: i64,
    pub job_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume_url: Option<String>,
    pub cover_letter: Option<String>,
    pub experience_json: String,
    pub stage: String,
    pub applied_at: String,
    pub updated_at: String,
}

impl TryFrom<ApplicantRow> for Applicant {
    type Error = PersistenceError;

    fn try_from(row: ApplicantRow) -> Result<Self, Self::Error> {
        Ok(Self {
            applicant_id: Some(row.applicant_id),
            job_id: row.job_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            resume_url: row.resume_url,
            cover_letter: row.cover_letter,
            experience: serde_json::from_str(&row.experience_json)?,
            stage: row.stage.parse::<ApplicantStage>()?,
            applied_at: Some(row.applied_at),
            updated_at: Some(row.updated_at),
        })
    }
}

/// Diesel Queryable struct for site rows.
///
/// The roster lives in `site_employees` and is attached separately.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = sites)]
pub struct SiteRow {
    pub site_id: i64,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub manager_id: Option<i64>,
    pub supervisor_id: Option<i64>,
    pub created_at: String,
}

/// Diesel Queryable struct for fish pool rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = fish_pools)]
pub struct FishPoolRow {
    pub fish_pool_id: i64,
    pub name: String,
    pub capacity_liters: Option<i64>,
}

impl From<FishPoolRow> for FishPool {
    fn from(row: FishPoolRow) -> Self {
        Self {
            fish_pool_id: Some(row.fish_pool_id),
            name: row.name,
            capacity_liters: row.capacity_liters,
        }
    }
}

/// Diesel Queryable struct for lab box rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = lab_boxes)]
pub struct LabBoxRow {
    pub lab_box_id: i64,
    pub code: String,
    pub description: Option<String>,
}

impl From<LabBoxRow> for LabBox {
    fn from(row: LabBoxRow) -> Self {
        Self {
            lab_box_id: Some(row.lab_box_id),
            code: row.code,
            description: row.description,
        }
    }
}

/// Diesel Queryable struct for parent egg migration rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = parent_egg_migrations)]
pub struct EggMigrationRow {
    pub migration_id: i64,
    pub fish_pool_id: i64,
    pub lab_box_id: i64,
    pub employee_id: i64,
    pub migration_date: String,
    pub egg_count: i64,
    pub notes: Option<String>,
    pub created_at: String,
}

impl TryFrom<EggMigrationRow> for ParentEggMigration {
    type Error = PersistenceError;

    fn try_from(row: EggMigrationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            migration_id: Some(row.migration_id),
            fish_pool_id: row.fish_pool_id,
            lab_box_id: row.lab_box_id,
            employee_id: row.employee_id,
            migration_date: parse_date("migration_date", &row.migration_date)?,
            egg_count: row.egg_count,
            notes: row.notes,
            created_at: Some(row.created_at),
        })
    }
}

/// Search, sort and paging shared by every list query.
#[derive(Debug, Clone, Default)]
pub struct ListOptions<K> {
    /// Case-insensitive substring matched against the entity's text columns.
    pub search: Option<String>,
    pub sort: K,
    pub order: SortOrder,
    pub page: PageRequest,
}

impl<K> ListOptions<K> {
    /// Returns the `LIKE` pattern for the search term, if one was given.
    ///
    /// `%`, `_` and `\` in the term are escaped with `\`, so callers must
    /// pair the pattern with an `ESCAPE '\'` clause.
    #[must_use]
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)))
    }
}

/// Escapes `LIKE` wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped: String = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Employee list filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmployeeFilter {
    pub department_id: Option<i64>,
    pub employment_status: Option<EmploymentStatus>,
}

/// Contract list filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContractFilter {
    pub employee_id: Option<i64>,
    pub department_id: Option<i64>,
    pub status: Option<ContractStatus>,
}

/// Job list filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct JobFilter {
    pub status: Option<JobStatus>,
    pub department_id: Option<i64>,
    pub employment_type: Option<EmploymentType>,
    pub experience_level: Option<ExperienceLevel>,
}

/// Applicant list filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplicantFilter {
    pub job_id: Option<i64>,
    pub stage: Option<ApplicantStage>,
}

/// Parent egg migration list filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct EggMigrationFilter {
    pub fish_pool_id: Option<i64>,
    pub lab_box_id: Option<i64>,
    pub employee_id: Option<i64>,
}
