// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod listing;

use time::{Date, Month};

use crate::{
    Contract, ContractStatus, Employee, EmploymentStatus, EmploymentType, Experience,
};

/// A fixed "today" so date rules are deterministic.
pub fn test_today() -> Date {
    Date::from_calendar_date(2026, Month::March, 15).expect("Valid test date")
}

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("Valid test date")
}

pub fn create_test_experience() -> Experience {
    Experience {
        company: String::from("Nordic Salmon AS"),
        role: String::from("Hatchery Technician"),
        start_date: date(2019, Month::May, 1),
        end_date: Some(date(2022, Month::August, 31)),
        description: None,
    }
}

pub fn create_test_employee() -> Employee {
    Employee {
        employee_id: None,
        first_name: String::from("Ingrid"),
        last_name: String::from("Larsen"),
        email: String::from("ingrid.larsen@example.com"),
        phone: None,
        gender: None,
        date_of_birth: Some(date(1990, Month::June, 2)),
        address: None,
        position: String::from("Fish Health Officer"),
        department_id: None,
        hire_date: date(2023, Month::January, 9),
        employment_status: EmploymentStatus::Active,
        cv_url: None,
        id_document_url: None,
        photo_url: None,
        experience: vec![create_test_experience()],
        created_at: None,
        updated_at: None,
    }
}

pub fn create_test_contract(
    contract_id: Option<i64>,
    employee_id: i64,
    status: ContractStatus,
) -> Contract {
    Contract {
        contract_id,
        employee_id,
        department_id: 1,
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
