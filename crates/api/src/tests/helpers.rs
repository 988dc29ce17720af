// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use aquahr_persistence::Persistence;
use time::{Date, Month};

use crate::{
    CreateContractRequest, CreateDepartmentRequest, CreateEmployeeRequest, CreateJobRequest,
    ExperienceInput, create_department, create_employee, create_job,
};

/// The fixed "today" used by all handler tests.
pub fn today() -> Date {
    Date::from_calendar_date(2026, Month::June, 1).expect("Valid test date")
}

pub fn setup() -> Persistence {
    Persistence::new_in_memory().expect("In-memory database")
}

pub fn department_request(name: &str) -> CreateDepartmentRequest {
    CreateDepartmentRequest {
        name: name.to_string(),
        description: None,
    }
}

pub fn experience(company: &str, start: &str, end: Option<&str>) -> ExperienceInput {
    ExperienceInput {
        company: company.to_string(),
        role: String::from("Technician"),
        start_date: start.to_string(),
        end_date: end.map(String::from),
        description: None,
    }
}

pub fn employee_request(email: &str) -> CreateEmployeeRequest {
    CreateEmployeeRequest {
        first_name: String::from("Mona"),
        last_name: String::from("Fathy"),
        email: email.to_string(),
        phone: Some(String::from("+20 111 222 3333")),
        gender: Some(String::from("FEMALE")),
        date_of_birth: Some(String::from("1994-09-20")),
        address: None,
        position: String::from("Broodstock Supervisor"),
        department_id: None,
        hire_date: String::from("2024-03-01"),
        employment_status: None,
        experience: vec![experience(
            "Nile Aquaculture",
            "2016-01-01",
            Some("2023-12-31"),
        )],
    }
}

pub fn contract_request(
    employee_id: i64,
    department_id: i64,
    start: &str,
) -> CreateContractRequest {
    CreateContractRequest {
        employee_id,
        department_id,
        contract_type: String::from("FULL_TIME"),
        start_date: start.to_string(),
        end_date: None,
        salary: 36_000,
        status: None,
        notes: None,
        terminate_active: false,
    }
}

pub fn job_request(title: &str) -> CreateJobRequest {
    CreateJobRequest {
        title: title.to_string(),
        department_id: None,
        description: String::from("Care for broodstock and spawning tanks"),
        location: Some(String::from("Kafr El Sheikh")),
        employment_type: String::from("FULL_TIME"),
        experience_level: String::from("MID"),
        skills: vec![String::from("Water quality"), String::from("Spawning")],
        salary_min: Some(30_000),
        salary_max: Some(45_000),
        status: None,
        closing_date: None,
    }
}

/// Creates a department and returns its ID.
pub fn seed_department(persistence: &mut Persistence, name: &str) -> i64 {
    create_department(persistence, &department_request(name))
        .unwrap()
        .department_id
        .unwrap()
}

/// Creates an employee and returns its ID.
pub fn seed_employee(persistence: &mut Persistence, email: &str) -> i64 {
    create_employee(persistence, &employee_request(email), today())
        .unwrap()
        .employee_id
        .unwrap()
}

/// Creates an open job and returns its ID.
pub fn seed_job(persistence: &mut Persistence, title: &str) -> i64 {
    create_job(persistence, &job_request(title))
        .unwrap()
        .job_id
        .unwrap()
}
