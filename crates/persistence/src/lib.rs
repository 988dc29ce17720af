// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for AquaHR.
//!
//! This crate stores departments, employees, contracts, job postings,
//! applicants, sites and hatchery operation records in `SQLite` through
//! Diesel.
//!
//! ## Storage
//!
//! - Schema migrations are embedded and applied when a connection opens.
//! - Foreign keys are switched on per connection and verified before the
//!   adapter is handed out.
//! - File databases run in WAL mode.
//! - Tests use a uniquely named shared-cache in-memory database each.
//!
//! ## Layout
//!
//! Reads live in `queries/`, writes in `mutations/`. The `Persistence`
//! adapter owns the connection and delegates to both; callers never see a
//! Diesel type.

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
#![allow(clippy::multiple_crate_versions)]

use aquahr_domain::{
    Applicant, ApplicantSortKey, Contract, ContractSortKey, Department, DepartmentSortKey,
    EggMigrationSortKey, Employee, EmployeeSortKey, FishPool, Job, JobSortKey, LabBox, Page,
    ParentEggMigration, Site, SiteSortKey,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::backend::sqlite::ConnectionMode;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    ApplicantFilter, ContractFilter, EggMigrationFilter, EmployeeFilter, JobFilter, ListOptions,
};
pub use error::PersistenceError;
pub use mutations::contracts::Supersede;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:aquahr_mem_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection =
            backend::sqlite::open(&shared_memory_url, ConnectionMode::InMemory)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection = backend::sqlite::open(path_str, ConnectionMode::File)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Runs a trivial query to confirm the connection is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the database does not answer.
    pub fn health_check(&mut self) -> Result<(), PersistenceError> {
        diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>("1"))
            .get_result::<i32>(&mut self.conn)?;
        Ok(())
    }

    // ========================================================================
    // Departments
    // ========================================================================

    /// Stores a new department and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the name is taken.
    pub fn create_department(&mut self, department: &Department) -> Result<i64, PersistenceError> {
        mutations::departments::insert_department(&mut self.conn, department)
    }

    /// Retrieves a department by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_department(
        &mut self,
        department_id: i64,
    ) -> Result<Option<Department>, PersistenceError> {
        queries::departments::get_department(&mut self.conn, department_id)
    }

    /// Checks whether a department exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn department_exists(&mut self, department_id: i64) -> Result<bool, PersistenceError> {
        queries::departments::department_exists(&mut self.conn, department_id)
    }

    /// Lists departments.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_departments(
        &mut self,
        options: &ListOptions<DepartmentSortKey>,
    ) -> Result<Page<Department>, PersistenceError> {
        queries::departments::list_departments(&mut self.conn, options)
    }

    /// Counts contracts referencing a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_contracts_for_department(
        &mut self,
        department_id: i64,
    ) -> Result<i64, PersistenceError> {
        queries::departments::count_contracts_for_department(&mut self.conn, department_id)
    }

    /// Counts employees and jobs assigned to a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_soft_references_to_department(
        &mut self,
        department_id: i64,
    ) -> Result<i64, PersistenceError> {
        queries::departments::count_soft_references_to_department(&mut self.conn, department_id)
    }

    /// Writes a stored department.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the department does not exist.
    pub fn update_department(&mut self, department: &Department) -> Result<(), PersistenceError> {
        mutations::departments::update_department(&mut self.conn, department)
    }

    /// Deletes a department.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the department does not exist.
    pub fn delete_department(&mut self, department_id: i64) -> Result<(), PersistenceError> {
        mutations::departments::delete_department(&mut self.conn, department_id)
    }

    // ========================================================================
    // Employees
    // ========================================================================

    /// Stores a new employee and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the email is taken.
    pub fn create_employee(&mut self, employee: &Employee) -> Result<i64, PersistenceError> {
        mutations::employees::insert_employee(&mut self.conn, employee)
    }

    /// Retrieves an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_employee(&mut self, employee_id: i64) -> Result<Option<Employee>, PersistenceError> {
        queries::employees::get_employee(&mut self.conn, employee_id)
    }

    /// Checks whether an employee exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn employee_exists(&mut self, employee_id: i64) -> Result<bool, PersistenceError> {
        queries::employees::employee_exists(&mut self.conn, employee_id)
    }

    /// Returns the subset of the given employee IDs that exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn existing_employee_ids(
        &mut self,
        employee_ids: &[i64],
    ) -> Result<Vec<i64>, PersistenceError> {
        queries::employees::existing_employee_ids(&mut self.conn, employee_ids)
    }

    /// Finds which employee, other than `exclude`, holds an email address.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_employee_id_by_email(
        &mut self,
        email: &str,
        exclude: Option<i64>,
    ) -> Result<Option<i64>, PersistenceError> {
        queries::employees::find_employee_id_by_email(&mut self.conn, email, exclude)
    }

    /// Lists employees.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_employees(
        &mut self,
        filter: EmployeeFilter,
        options: &ListOptions<EmployeeSortKey>,
    ) -> Result<Page<Employee>, PersistenceError> {
        queries::employees::list_employees(&mut self.conn, filter, options)
    }

    /// Counts egg migrations performed by an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_egg_migrations_for_employee(
        &mut self,
        employee_id: i64,
    ) -> Result<i64, PersistenceError> {
        queries::employees::count_egg_migrations_for_employee(&mut self.conn, employee_id)
    }

    /// Writes a stored employee.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not exist.
    pub fn update_employee(&mut self, employee: &Employee) -> Result<(), PersistenceError> {
        mutations::employees::update_employee(&mut self.conn, employee)
    }

    /// Deletes an employee and clears its site references.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not exist.
    pub fn delete_employee(&mut self, employee_id: i64) -> Result<(), PersistenceError> {
        mutations::employees::delete_employee(&mut self.conn, employee_id)
    }

    // ========================================================================
    // Contracts
    // ========================================================================

    /// Stores a new contract, terminating `supersede` first if given.
    ///
    /// # Errors
    ///
    /// Returns an error if either write fails; nothing is written then.
    pub fn create_contract(
        &mut self,
        contract: &Contract,
        supersede: Option<Supersede>,
    ) -> Result<i64, PersistenceError> {
        mutations::contracts::insert_contract(&mut self.conn, contract, supersede)
    }

    /// Retrieves a contract by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_contract(&mut self, contract_id: i64) -> Result<Option<Contract>, PersistenceError> {
        queries::contracts::get_contract(&mut self.conn, contract_id)
    }

    /// Lists contracts.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_contracts(
        &mut self,
        filter: ContractFilter,
        options: &ListOptions<ContractSortKey>,
    ) -> Result<Page<Contract>, PersistenceError> {
        queries::contracts::list_contracts(&mut self.conn, filter, options)
    }

    /// Retrieves every contract held by an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_contracts_for_employee(
        &mut self,
        employee_id: i64,
    ) -> Result<Vec<Contract>, PersistenceError> {
        queries::contracts::list_contracts_for_employee(&mut self.conn, employee_id)
    }

    /// Writes a stored contract.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the contract does not exist.
    pub fn update_contract(&mut self, contract: &Contract) -> Result<(), PersistenceError> {
        mutations::contracts::update_contract(&mut self.conn, contract)
    }

    /// Deletes a contract.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the contract does not exist.
    pub fn delete_contract(&mut self, contract_id: i64) -> Result<(), PersistenceError> {
        mutations::contracts::delete_contract(&mut self.conn, contract_id)
    }

    // ========================================================================
    // Jobs
    // ========================================================================

    /// Stores a new job and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_job(&mut self, job: &Job) -> Result<i64, PersistenceError> {
        mutations::jobs::insert_job(&mut self.conn, job)
    }

    /// Retrieves a job by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_job(&mut self, job_id: i64) -> Result<Option<Job>, PersistenceError> {
        queries::jobs::get_job(&mut self.conn, job_id)
    }

    /// Lists jobs.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_jobs(
        &mut self,
        filter: JobFilter,
        options: &ListOptions<JobSortKey>,
    ) -> Result<Page<Job>, PersistenceError> {
        queries::jobs::list_jobs(&mut self.conn, filter, options)
    }

    /// Counts applicants for a job.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_applicants_for_job(&mut self, job_id: i64) -> Result<i64, PersistenceError> {
        queries::jobs::count_applicants_for_job(&mut self.conn, job_id)
    }

    /// Writes a stored job.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the job does not exist.
    pub fn update_job(&mut self, job: &Job) -> Result<(), PersistenceError> {
        mutations::jobs::update_job(&mut self.conn, job)
    }

    /// Deletes a job and its applicants, returning how many applicants went
    /// with it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the job does not exist.
    pub fn delete_job(&mut self, job_id: i64) -> Result<usize, PersistenceError> {
        mutations::jobs::delete_job(&mut self.conn, job_id)
    }

    // ========================================================================
    // Applicants
    // ========================================================================

    /// Stores a new applicant and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the email already applied to the job.
    pub fn create_applicant(&mut self, applicant: &Applicant) -> Result<i64, PersistenceError> {
        mutations::applicants::insert_applicant(&mut self.conn, applicant)
    }

    /// Retrieves an applicant by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_applicant(
        &mut self,
        applicant_id: i64,
    ) -> Result<Option<Applicant>, PersistenceError> {
        queries::applicants::get_applicant(&mut self.conn, applicant_id)
    }

    /// Checks whether an email already applied to a job.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn applicant_email_taken(
        &mut self,
        job_id: i64,
        email: &str,
        exclude: Option<i64>,
    ) -> Result<bool, PersistenceError> {
        queries::applicants::applicant_email_taken(&mut self.conn, job_id, email, exclude)
    }

    /// Lists applicants.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_applicants(
        &mut self,
        filter: ApplicantFilter,
        options: &ListOptions<ApplicantSortKey>,
    ) -> Result<Page<Applicant>, PersistenceError> {
        queries::applicants::list_applicants(&mut self.conn, filter, options)
    }

    /// Writes a stored applicant.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the applicant does not exist.
    pub fn update_applicant(&mut self, applicant: &Applicant) -> Result<(), PersistenceError> {
        mutations::applicants::update_applicant(&mut self.conn, applicant)
    }

    /// Deletes an applicant.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the applicant does not exist.
    pub fn delete_applicant(&mut self, applicant_id: i64) -> Result<(), PersistenceError> {
        mutations::applicants::delete_applicant(&mut self.conn, applicant_id)
    }

    // ========================================================================
    // Sites
    // ========================================================================

    /// Stores a new site with its roster and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if a write fails; nothing is written then.
    pub fn create_site(&mut self, site: &Site) -> Result<i64, PersistenceError> {
        mutations::sites::insert_site(&mut self.conn, site)
    }

    /// Retrieves a site with its roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_site(&mut self, site_id: i64) -> Result<Option<Site>, PersistenceError> {
        queries::sites::get_site(&mut self.conn, site_id)
    }

    /// Lists sites with their rosters.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_sites(
        &mut self,
        options: &ListOptions<SiteSortKey>,
    ) -> Result<Page<Site>, PersistenceError> {
        queries::sites::list_sites(&mut self.conn, options)
    }

    /// Returns the sites an employee belongs to or leads.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn sites_for_employee(&mut self, employee_id: i64) -> Result<Vec<i64>, PersistenceError> {
        queries::sites::sites_for_employee(&mut self.conn, employee_id)
    }

    /// Writes a stored site and its roster.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the site does not exist.
    pub fn update_site(&mut self, site: &Site) -> Result<(), PersistenceError> {
        mutations::sites::update_site(&mut self.conn, site)
    }

    /// Replaces a site roster.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the site does not exist.
    pub fn replace_site_roster(
        &mut self,
        site_id: i64,
        employee_ids: &[i64],
    ) -> Result<(), PersistenceError> {
        mutations::sites::replace_site_roster(&mut self.conn, site_id, employee_ids)
    }

    /// Adds one employee to a site roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_site_employee(
        &mut self,
        site_id: i64,
        employee_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::sites::add_site_employee(&mut self.conn, site_id, employee_id)
    }

    /// Removes one employee from a site roster.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee is not on the roster.
    pub fn remove_site_employee(
        &mut self,
        site_id: i64,
        employee_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::sites::remove_site_employee(&mut self.conn, site_id, employee_id)
    }

    /// Deletes a site.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the site does not exist.
    pub fn delete_site(&mut self, site_id: i64) -> Result<(), PersistenceError> {
        mutations::sites::delete_site(&mut self.conn, site_id)
    }

    // ========================================================================
    // Hatchery operations
    // ========================================================================

    /// Stores a new fish pool and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the name is taken.
    pub fn create_fish_pool(&mut self, pool: &FishPool) -> Result<i64, PersistenceError> {
        mutations::operations::insert_fish_pool(&mut self.conn, pool)
    }

    /// Retrieves a fish pool by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_fish_pool(
        &mut self,
        fish_pool_id: i64,
    ) -> Result<Option<FishPool>, PersistenceError> {
        queries::operations::get_fish_pool(&mut self.conn, fish_pool_id)
    }

    /// Lists all fish pools.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_fish_pools(&mut self) -> Result<Vec<FishPool>, PersistenceError> {
        queries::operations::list_fish_pools(&mut self.conn)
    }

    /// Counts egg migrations using a fish pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_migrations_for_fish_pool(
        &mut self,
        fish_pool_id: i64,
    ) -> Result<i64, PersistenceError> {
        queries::operations::count_migrations_for_fish_pool(&mut self.conn, fish_pool_id)
    }

    /// Updates a fish pool.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the pool does not exist, or `UniqueViolation`
    /// if the new name is taken.
    pub fn update_fish_pool(&mut self, pool: &FishPool) -> Result<(), PersistenceError> {
        mutations::operations::update_fish_pool(&mut self.conn, pool)
    }

    /// Deletes a fish pool.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the pool does not exist.
    pub fn delete_fish_pool(&mut self, fish_pool_id: i64) -> Result<(), PersistenceError> {
        mutations::operations::delete_fish_pool(&mut self.conn, fish_pool_id)
    }

    /// Stores a new lab box and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the code is taken.
    pub fn create_lab_box(&mut self, lab_box: &LabBox) -> Result<i64, PersistenceError> {
        mutations::operations::insert_lab_box(&mut self.conn, lab_box)
    }

    /// Retrieves a lab box by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_lab_box(&mut self, lab_box_id: i64) -> Result<Option<LabBox>, PersistenceError> {
        queries::operations::get_lab_box(&mut self.conn, lab_box_id)
    }

    /// Lists all lab boxes.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_lab_boxes(&mut self) -> Result<Vec<LabBox>, PersistenceError> {
        queries::operations::list_lab_boxes(&mut self.conn)
    }

    /// Counts egg migrations using a lab box.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_migrations_for_lab_box(
        &mut self,
        lab_box_id: i64,
    ) -> Result<i64, PersistenceError> {
        queries::operations::count_migrations_for_lab_box(&mut self.conn, lab_box_id)
    }

    /// Updates a lab box.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the box does not exist, or `UniqueViolation`
    /// if the new code is taken.
    pub fn update_lab_box(&mut self, lab_box: &LabBox) -> Result<(), PersistenceError> {
        mutations::operations::update_lab_box(&mut self.conn, lab_box)
    }

    /// Deletes a lab box.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the box does not exist.
    pub fn delete_lab_box(&mut self, lab_box_id: i64) -> Result<(), PersistenceError> {
        mutations::operations::delete_lab_box(&mut self.conn, lab_box_id)
    }

    /// Stores a new parent egg migration and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_egg_migration(
        &mut self,
        migration: &ParentEggMigration,
    ) -> Result<i64, PersistenceError> {
        mutations::operations::insert_egg_migration(&mut self.conn, migration)
    }

    /// Retrieves a parent egg migration by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_egg_migration(
        &mut self,
        migration_id: i64,
    ) -> Result<Option<ParentEggMigration>, PersistenceError> {
        queries::operations::get_egg_migration(&mut self.conn, migration_id)
    }

    /// Lists parent egg migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_egg_migrations(
        &mut self,
        filter: EggMigrationFilter,
        options: &ListOptions<EggMigrationSortKey>,
    ) -> Result<Page<ParentEggMigration>, PersistenceError> {
        queries::operations::list_egg_migrations(&mut self.conn, filter, options)
    }

    /// Writes a stored parent egg migration.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the migration does not exist.
    pub fn update_egg_migration(
        &mut self,
        migration: &ParentEggMigration,
    ) -> Result<(), PersistenceError> {
        mutations::operations::update_egg_migration(&mut self.conn, migration)
    }

    /// Deletes a parent egg migration.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the migration does not exist.
    pub fn delete_egg_migration(&mut self, migration_id: i64) -> Result<(), PersistenceError> {
        mutations::operations::delete_egg_migration(&mut self.conn, migration_id)
    }
}
