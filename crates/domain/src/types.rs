// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Generates a closed string-backed enum.
///
/// The wire and storage representation is the literal given for each
/// variant. Parsing is case-insensitive and ignores surrounding whitespace.
/// Attributes pass through, so `#[derive(Default)]` on the enum with
/// `#[default]` on one variant gives it a default.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $text:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Converts this value to its wire representation.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized: String = s.trim().to_uppercase();
                match normalized.as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(DomainError::InvalidEnumValue {
                        field: $field,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// Lifecycle status of an employment contract.
    ContractStatus, field = "status" {
        /// The contract is in force.
        Active => "ACTIVE",
        /// The contract ran to its end date.
        Expired => "EXPIRED",
        /// The contract was ended early.
        Terminated => "TERMINATED",
        /// The contract is signed but not yet in force.
        Pending => "PENDING",
    }
}

impl ContractStatus {
    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - `Pending` → `Active` | `Terminated`
    /// - `Active` → `Expired` | `Terminated`
    ///
    /// `Expired` and `Terminated` are terminal.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Active | Self::Terminated)
                | (Self::Active, Self::Expired | Self::Terminated)
        )
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Expired | Self::Terminated)
    }
}

string_enum! {
    /// Kind of employment offered by a job or held under a contract.
    EmploymentType, field = "employment_type" {
        FullTime => "FULL_TIME",
        PartTime => "PART_TIME",
        Internship => "INTERNSHIP",
        Temporary => "TEMPORARY",
        Contractor => "CONTRACTOR",
    }
}

string_enum! {
    /// Seniority expected for a job posting.
    ExperienceLevel, field = "experience_level" {
        Entry => "ENTRY",
        Junior => "JUNIOR",
        Mid => "MID",
        Senior => "SENIOR",
        Lead => "LEAD",
    }
}

string_enum! {
    /// Publication status of a job posting.
    #[derive(Default)]
    JobStatus, field = "status" {
        /// Not yet published.
        Draft => "DRAFT",
        /// Accepting applications.
        #[default]
        Open => "OPEN",
        /// No longer accepting applications.
        Closed => "CLOSED",
    }
}

impl JobStatus {
    /// Checks if a transition from this status to another is valid.
    ///
    /// Closed postings may be reopened; nothing returns to `Draft`.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Open | Self::Closed)
                | (Self::Open, Self::Closed)
                | (Self::Closed, Self::Open)
        )
    }
}

string_enum! {
    /// Position of an applicant in the hiring pipeline.
    #[derive(Default)]
    ApplicantStage, field = "stage" {
        #[default]
        Applied => "APPLIED",
        Shortlisted => "SHORTLISTED",
        Interviewed => "INTERVIEWED",
        Hired => "HIRED",
        Rejected => "REJECTED",
    }
}

impl ApplicantStage {
    /// Checks if a transition from this stage to another is valid.
    ///
    /// The pipeline advances one step at a time
    /// (`Applied` → `Shortlisted` → `Interviewed` → `Hired`),
    /// and any non-terminal stage may move to `Rejected`.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Applied, Self::Shortlisted | Self::Rejected)
                | (Self::Shortlisted, Self::Interviewed | Self::Rejected)
                | (Self::Interviewed, Self::Hired | Self::Rejected)
        )
    }

    /// Returns whether the applicant has left the pipeline.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Hired | Self::Rejected)
    }
}

string_enum! {
    /// Current employment status of an employee.
    #[derive(Default)]
    EmploymentStatus, field = "employment_status" {
        #[default]
        Active => "ACTIVE",
        OnLeave => "ON_LEAVE",
        Terminated => "TERMINATED",
    }
}

string_enum! {
    /// Self-reported gender.
    Gender, field = "gender" {
        Male => "MALE",
        Female => "FEMALE",
        Other => "OTHER",
    }
}

/// An organisational department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// `None` until persisted.
    pub department_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<String>,
}

/// A prior work experience entry.
///
/// Employees collect these during onboarding; applicants supply them
/// with their application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub role: String,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(default, with = "iso_date::option")]
    pub end_date: Option<Date>,
    #[serde(default)]
    pub description: Option<String>,
}

/// An employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// `None` until persisted.
    pub employee_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    /// Stored lowercase.
    pub email: String,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    #[serde(with = "iso_date::option")]
    pub date_of_birth: Option<Date>,
    pub address: Option<String>,
    pub position: String,
    pub department_id: Option<i64>,
    #[serde(with = "iso_date")]
    pub hire_date: Date,
    pub employment_status: EmploymentStatus,
    pub cv_url: Option<String>,
    pub id_document_url: Option<String>,
    pub photo_url: Option<String>,
    pub experience: Vec<Experience>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Employee {
    /// Returns "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// An employment contract between an employee and a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// `None` until persisted.
    pub contract_id: Option<i64>,
    pub employee_id: i64,
    pub department_id: i64,
    pub contract_type: EmploymentType,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date::option")]
    pub end_date: Option<Date>,
    /// Whole currency units.
    pub salary: i64,
    pub status: ContractStatus,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// `None` until persisted.
    pub job_id: Option<i64>,
    pub title: String,
    pub department_id: Option<i64>,
    pub description: String,
    pub location: Option<String>,
    pub employment_type: EmploymentType,
    pub experience_level: ExperienceLevel,
    pub skills: Vec<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub status: JobStatus,
    #[serde(with = "iso_date::option")]
    pub closing_date: Option<Date>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A candidate who applied to a job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    /// `None` until persisted.
    pub applicant_id: Option<i64>,
    pub job_id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Stored lowercase.
    pub email: String,
    pub phone: Option<String>,
    pub resume_url: Option<String>,
    pub cover_letter: Option<String>,
    pub experience: Vec<Experience>,
    pub stage: ApplicantStage,
    pub applied_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A physical work location and its workforce assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// `None` until persisted.
    pub site_id: Option<i64>,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub manager_id: Option<i64>,
    pub supervisor_id: Option<i64>,
    /// Plain assigned employees, excluding manager and supervisor.
    pub employee_ids: Vec<i64>,
    pub created_at: Option<String>,
}

/// A broodstock pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FishPool {
    /// `None` until persisted.
    pub fish_pool_id: Option<i64>,
    pub name: String,
    pub capacity_liters: Option<i64>,
}

/// An incubation box in the hatchery lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabBox {
    /// `None` until persisted.
    pub lab_box_id: Option<i64>,
    pub code: String,
    pub description: Option<String>,
}

/// A transfer of parent-fish eggs from a pool to a lab box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentEggMigration {
    /// `None` until persisted.
    pub migration_id: Option<i64>,
    pub fish_pool_id: i64,
    pub lab_box_id: i64,
    /// The employee who performed the transfer.
    pub employee_id: i64,
    #[serde(with = "iso_date")]
    pub migration_date: Date,
    pub egg_count: i64,
    pub notes: Option<String>,
    pub created_at: Option<String>,
}
