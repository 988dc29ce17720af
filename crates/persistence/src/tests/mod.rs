// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod recruitment_tests;

use aquahr_domain::{
    Applicant, ApplicantStage, Contract, ContractStatus, Department, Employee, EmploymentStatus,
    EmploymentType, Experience, ExperienceLevel, Job, JobStatus, Site,
};
use time::{Date, Month};

use crate::Persistence;

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("Valid test date")
}

pub fn create_test_department(name: &str) -> Department {
    Department {
        department_id: None,
        name: name.to_string(),
        description: Some(format!("{name} team")),
        created_at: None,
    }
}

pub fn create_test_employee(first_name: &str, last_name: &str, email: &str) -> Employee {
    Employee {
        employee_id: None,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        phone: Some(String::from("+20 100 000 0000")),
        gender: None,
        date_of_birth: Some(date(1990, Month::May, 12)),
        address: None,
        position: String::from("Hatchery Technician"),
        department_id: None,
        hire_date: date(2024, Month::February, 1),
        employment_status: EmploymentStatus::Active,
        cv_url: None,
        id_document_url: None,
        photo_url: None,
        experience: vec![Experience {
            company: String::from("Delta Fish Farms"),
            role: String::from("Feeder"),
            start_date: date(2015, Month::March, 1),
            end_date: Some(date(2020, Month::June, 30)),
            description: None,
        }],
        created_at: None,
        updated_at: None,
    }
}

pub fn create_test_contract(
    employee_id: i64,
    department_id: i64,
    status: ContractStatus,
) -> Contract {
    Contract {
        contract_id: None,
        employee_id,
        department_id,
        contract_type: EmploymentType::FullTime,
        start_date: date(2025, Month::January, 1),
        end_date: None,
        salary: 42_000,
        status,
        notes: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn create_test_job(title: &str, status: JobStatus) -> Job {
    Job {
        job_id: None,
        title: title.to_string(),
        department_id: None,
        description: String::from("Maintain broodstock tanks and water quality logs."),
        location: Some(String::from("Kafr El Sheikh")),
        employment_type: EmploymentType::FullTime,
        experience_level: ExperienceLevel::Mid,
        skills: vec![String::from("Water quality"), String::from("Spawning")],
        salary_min: Some(30_000),
        salary_max: Some(45_000),
        status,
        closing_date: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn create_test_applicant(job_id: i64, email: &str) -> Applicant {
    Applicant {
        applicant_id: None,
        job_id,
        first_name: String::from("Mona"),
        last_name: String::from("Hassan"),
        email: email.to_string(),
        phone: None,
        resume_url: None,
        cover_letter: Some(String::from("I have worked with tilapia hatcheries.")),
        experience: Vec::new(),
        stage: ApplicantStage::Applied,
        applied_at: None,
        updated_at: None,
    }
}

pub fn create_test_site(name: &str) -> Site {
    Site {
        site_id: None,
        name: name.to_string(),
        location: Some(String::from("North Coast")),
        description: None,
        image_url: None,
        manager_id: None,
        supervisor_id: None,
        employee_ids: Vec::new(),
        created_at: None,
    }
}

/// Creates a fresh database holding one department and one employee.
///
/// Returns `(persistence, department_id, employee_id)`.
pub fn setup_with_employee() -> (Persistence, i64, i64) {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let department_id = persistence
        .create_department(&create_test_department("Hatchery"))
        .unwrap();
    let mut employee = create_test_employee("Omar", "Saleh", "omar@example.com");
    employee.department_id = Some(department_id);
    let employee_id = persistence.create_employee(&employee).unwrap();
    (persistence, department_id, employee_id)
}
