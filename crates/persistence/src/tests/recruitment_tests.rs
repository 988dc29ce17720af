// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use aquahr_domain::{Applicant, ApplicantStage, Job, JobStatus};

use super::{create_test_applicant, create_test_job};
use crate::{Persistence, PersistenceError};

#[test]
fn test_job_round_trip_keeps_skills() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let id = persistence
        .create_job(&create_test_job("Hatchery Technician", JobStatus::Open))
        .unwrap();

    let stored: Job = persistence.get_job(id).unwrap().unwrap();
    assert_eq!(stored.job_id, Some(id));
    assert_eq!(stored.skills, vec!["Water quality", "Spawning"]);
    assert_eq!(stored.status, JobStatus::Open);
    assert_eq!(stored.salary_min, Some(30_000));
}

#[test]
fn test_update_job_preserves_identity() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let id = persistence
        .create_job(&create_test_job("Feed Operator", JobStatus::Draft))
        .unwrap();

    let mut job: Job = persistence.get_job(id).unwrap().unwrap();
    job.status = JobStatus::Open;
    job.skills.push(String::from("Forklift"));
    persistence.update_job(&job).unwrap();

    let stored: Job = persistence.get_job(id).unwrap().unwrap();
    assert_eq!(stored.status, JobStatus::Open);
    assert_eq!(stored.skills.len(), 3);
    assert_eq!(stored.title, "Feed Operator");
}

#[test]
fn test_applicant_round_trip() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let job_id = persistence
        .create_job(&create_test_job("Lab Assistant", JobStatus::Open))
        .unwrap();

    let id = persistence
        .create_applicant(&create_test_applicant(job_id, "mona@example.com"))
        .unwrap();
    let stored: Applicant = persistence.get_applicant(id).unwrap().unwrap();

    assert_eq!(stored.job_id, job_id);
    assert_eq!(stored.stage, ApplicantStage::Applied);
    assert!(stored.applied_at.is_some());
    assert_eq!(persistence.count_applicants_for_job(job_id).unwrap(), 1);
}

#[test]
fn test_same_email_may_not_apply_twice_to_one_job() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let job_id = persistence
        .create_job(&create_test_job("Lab Assistant", JobStatus::Open))
        .unwrap();
    let other_job_id = persistence
        .create_job(&create_test_job("Diver", JobStatus::Open))
        .unwrap();

    let first_id = persistence
        .create_applicant(&create_test_applicant(job_id, "mona@example.com"))
        .unwrap();

    assert!(
        persistence
            .applicant_email_taken(job_id, "mona@example.com", None)
            .unwrap()
    );
    assert!(
        !persistence
            .applicant_email_taken(job_id, "mona@example.com", Some(first_id))
            .unwrap()
    );

    let duplicate =
        persistence.create_applicant(&create_test_applicant(job_id, "mona@example.com"));
    assert!(matches!(duplicate, Err(PersistenceError::UniqueViolation(_))));

    assert!(
        persistence
            .create_applicant(&create_test_applicant(other_job_id, "mona@example.com"))
            .is_ok()
    );
}

#[test]
fn test_update_applicant_stage() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let job_id = persistence
        .create_job(&create_test_job("Lab Assistant", JobStatus::Open))
        .unwrap();
    let id = persistence
        .create_applicant(&create_test_applicant(job_id, "mona@example.com"))
        .unwrap();

    let mut applicant: Applicant = persistence.get_applicant(id).unwrap().unwrap();
    applicant.stage = ApplicantStage::Shortlisted;
    persistence.update_applicant(&applicant).unwrap();

    let stored: Applicant = persistence.get_applicant(id).unwrap().unwrap();
    assert_eq!(stored.stage, ApplicantStage::Shortlisted);
}

#[test]
fn test_delete_job_removes_its_applicants() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let job_id = persistence
        .create_job(&create_test_job("Lab Assistant", JobStatus::Closed))
        .unwrap();
    let applicant_id = persistence
        .create_applicant(&create_test_applicant(job_id, "mona@example.com"))
        .unwrap();

    let removed = persistence.delete_job(job_id).unwrap();

    assert_eq!(removed, 1);
    assert!(persistence.get_job(job_id).unwrap().is_none());
    assert!(persistence.get_applicant(applicant_id).unwrap().is_none());
}

#[test]
fn test_delete_missing_job_is_not_found() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(matches!(
        persistence.delete_job(3),
        Err(PersistenceError::NotFound(_))
    ));
}
