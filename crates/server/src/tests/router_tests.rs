// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::StatusCode;
use serde_json::{Value, json};
use tokio::sync::broadcast;

use super::helpers::{
    TestApp, create, employee_body, empty_request, job_body, json_request, send, test_app,
};
use crate::live::LiveEvent;

fn drain(rx: &mut broadcast::Receiver<LiveEvent>) -> Vec<LiveEvent> {
    let mut events: Vec<LiveEvent> = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

async fn seed_department_and_employee(app: &TestApp) -> (i64, i64) {
    let department_id: i64 = create(
        app,
        "/departments",
        &json!({ "name": "Hatchery" }),
        "department_id",
    )
    .await;
    let employee_id: i64 = create(
        app,
        "/employees",
        &employee_body("mona@example.com"),
        "employee_id",
    )
    .await;
    (department_id, employee_id)
}

#[tokio::test]
async fn test_health_reports_ok() {
    let app: TestApp = test_app();
    let (status, body) = send(&app, empty_request("GET", "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_then_get_department() {
    let app: TestApp = test_app();
    let id: i64 = create(
        &app,
        "/departments",
        &json!({ "name": "Feed Mill", "description": "Pellet production" }),
        "department_id",
    )
    .await;

    let (status, body) = send(&app, empty_request("GET", &format!("/departments/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Feed Mill");
    assert_eq!(body["description"], "Pellet production");
}

#[tokio::test]
async fn test_missing_record_is_404_with_error_body() {
    let app: TestApp = test_app();
    for uri in ["/departments/41", "/employees/41", "/jobs/41", "/fish-pools/41"] {
        let (status, body) = send(&app, empty_request("GET", uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["error"], true);
        assert!(body["message"].as_str().unwrap().contains("41"));
    }

    let (status, _) = send(&app, empty_request("DELETE", "/contracts/41")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_reference_in_body_is_400() {
    let app: TestApp = test_app();
    let mut body: Value = employee_body("orphan@example.com");
    body["department_id"] = json!(999);

    let (status, error) = send(&app, json_request("POST", "/employees", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["message"].as_str().unwrap().contains("department_id"));
}

#[tokio::test]
async fn test_malformed_json_is_400_with_error_body() {
    let app: TestApp = test_app();
    let (status, body) = send(
        &app,
        json_request("POST", "/departments", &json!({ "description": "no name" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_bad_sort_key_is_400() {
    let app: TestApp = test_app();
    let (status, body) = send(&app, empty_request("GET", "/employees?sort=salary")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_duplicate_email_is_409() {
    let app: TestApp = test_app();
    create(&app, "/employees", &employee_body("dup@example.com"), "employee_id").await;

    let (status, _) = send(
        &app,
        json_request("POST", "/employees", &employee_body("DUP@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_put_and_patch_both_preserve_unspecified_fields() {
    let app: TestApp = test_app();
    let job_id: i64 = create(&app, "/jobs", &job_body("Technician"), "job_id").await;
    let uri: String = format!("/jobs/{job_id}");

    let (status, job) =
        send(&app, json_request("PATCH", &uri, &json!({ "location": "Suez" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(job["location"], "Suez");
    assert_eq!(job["title"], "Technician");

    let (status, job) = send(
        &app,
        json_request("PUT", &uri, &json!({ "title": "Senior Technician" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(job["title"], "Senior Technician");
    assert_eq!(job["location"], "Suez");
    assert_eq!(job["salary_max"], 45000);
}

#[tokio::test]
async fn test_second_active_contract_conflicts_until_opted_in() {
    let app: TestApp = test_app();
    let (department_id, employee_id) = seed_department_and_employee(&app).await;
    let mut rx: broadcast::Receiver<LiveEvent> = app.state.broadcaster.subscribe();

    let contract = |start: &str, terminate_active: bool| {
        json!({
            "employee_id": employee_id,
            "department_id": department_id,
            "contract_type": "FULL_TIME",
            "start_date": start,
            "salary": 36000,
            "terminate_active": terminate_active
        })
    };

    let (status, first) = send(
        &app,
        json_request("POST", "/contracts", &contract("2025-01-01", false)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["contract"]["status"], "ACTIVE");
    let first_id: i64 = first["contract"]["contract_id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        json_request("POST", "/contracts", &contract("2026-01-01", false)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, second) = send(
        &app,
        json_request("POST", "/contracts", &contract("2026-01-01", true)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["terminated_contract"]["contract_id"], first_id);
    assert_eq!(second["terminated_contract"]["status"], "TERMINATED");

    let (_, history) = send(
        &app,
        empty_request("GET", &format!("/employees/{employee_id}/contracts")),
    )
    .await;
    assert_eq!(history.as_array().unwrap().len(), 2);

    let events: Vec<LiveEvent> = drain(&mut rx);
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], LiveEvent::ContractCreated { .. }));
    assert!(matches!(
        &events[1],
        LiveEvent::ContractUpdated { contract } if contract.contract_id == Some(first_id)
    ));
    assert!(matches!(events[2], LiveEvent::ContractCreated { .. }));
}

#[tokio::test]
async fn test_terminate_without_body_ends_contract() {
    let app: TestApp = test_app();
    let (department_id, employee_id) = seed_department_and_employee(&app).await;
    let (_, created) = send(
        &app,
        json_request(
            "POST",
            "/contracts",
            &json!({
                "employee_id": employee_id,
                "department_id": department_id,
                "contract_type": "PART_TIME",
                "start_date": "2025-01-01",
                "salary": 20000
            }),
        ),
    )
    .await;
    let contract_id: i64 = created["contract"]["contract_id"].as_i64().unwrap();
    let uri: String = format!("/contracts/{contract_id}/terminate");

    let (status, contract) = send(&app, empty_request("POST", &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(contract["status"], "TERMINATED");
    assert!(contract["end_date"].is_string());

    let (status, body) = send(&app, empty_request("POST", &uri)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_applicant_stage_changes_are_validated_and_broadcast() {
    let app: TestApp = test_app();
    let job_id: i64 = create(&app, "/jobs", &job_body("Feeder"), "job_id").await;
    let applicant_id: i64 = create(
        &app,
        "/applicants",
        &json!({
            "job_id": job_id,
            "first_name": "Youssef",
            "last_name": "Adel",
            "email": "youssef@example.com",
            "experience": []
        }),
        "applicant_id",
    )
    .await;
    let uri: String = format!("/applicants/{applicant_id}/stage");
    let mut rx: broadcast::Receiver<LiveEvent> = app.state.broadcaster.subscribe();

    let (status, _) = send(&app, json_request("PATCH", &uri, &json!({ "stage": "HIRED" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(
        &app,
        json_request("PATCH", &uri, &json!({ "stage": "SHORTLISTED" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["previous_stage"], "APPLIED");
    assert_eq!(body["applicant"]["stage"], "SHORTLISTED");

    let events: Vec<LiveEvent> = drain(&mut rx);
    assert_eq!(events.len(), 1);
    let json: Value = serde_json::to_value(&events[0]).unwrap();
    assert_eq!(json["type"], "applicantStageChanged");
    assert_eq!(json["previous_stage"], "APPLIED");
}

#[tokio::test]
async fn test_applying_to_closed_job_is_rejected() {
    let app: TestApp = test_app();
    let mut body: Value = job_body("Closed posting");
    body["status"] = json!("CLOSED");
    let job_id: i64 = create(&app, "/jobs", &body, "job_id").await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/applicants",
            &json!({
                "job_id": job_id,
                "first_name": "Late",
                "last_name": "Applicant",
                "email": "late@example.com"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_site_roster_routes() {
    let app: TestApp = test_app();
    let manager: i64 =
        create(&app, "/employees", &employee_body("m@example.com"), "employee_id").await;
    let worker: i64 =
        create(&app, "/employees", &employee_body("w@example.com"), "employee_id").await;
    let site_id: i64 = create(
        &app,
        "/sites",
        &json!({ "name": "North Ponds", "manager_id": manager }),
        "site_id",
    )
    .await;

    let (status, site) = send(
        &app,
        empty_request("POST", &format!("/sites/{site_id}/employees/{worker}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(site["employee_ids"], json!([worker]));

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/sites/{site_id}/employees"),
            &json!({ "employee_ids": [manager] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, site) = send(
        &app,
        empty_request("DELETE", &format!("/sites/{site_id}/employees/{worker}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(site["employee_ids"], json!([]));
}

#[tokio::test]
async fn test_deleting_employee_announces_affected_sites() {
    let app: TestApp = test_app();
    let manager: i64 =
        create(&app, "/employees", &employee_body("lead@example.com"), "employee_id").await;
    let site_id: i64 = create(
        &app,
        "/sites",
        &json!({ "name": "South Ponds", "manager_id": manager }),
        "site_id",
    )
    .await;
    let mut rx: broadcast::Receiver<LiveEvent> = app.state.broadcaster.subscribe();

    let (status, body) =
        send(&app, empty_request("DELETE", &format!("/employees/{manager}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected_site_ids"], json!([site_id]));

    let events: Vec<LiveEvent> = drain(&mut rx);
    assert_eq!(events[0], LiveEvent::EmployeeDeleted { employee_id: manager });
    assert!(matches!(
        &events[1],
        LiveEvent::SiteUpdated { site } if site.manager_id.is_none()
    ));
}

#[tokio::test]
async fn test_deleting_employee_announces_removed_contracts() {
    let app: TestApp = test_app();
    let (department_id, employee_id) = seed_department_and_employee(&app).await;
    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/contracts",
            &json!({
                "employee_id": employee_id,
                "department_id": department_id,
                "contract_type": "FULL_TIME",
                "start_date": "2025-03-01",
                "salary": 30000
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let contract_id: i64 = created["contract"]["contract_id"].as_i64().unwrap();
    let mut rx: broadcast::Receiver<LiveEvent> = app.state.broadcaster.subscribe();

    let (status, body) = send(
        &app,
        empty_request("DELETE", &format!("/employees/{employee_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed_contract_ids"], json!([contract_id]));

    let (status, _) = send(
        &app,
        empty_request("GET", &format!("/contracts/{contract_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let events: Vec<LiveEvent> = drain(&mut rx);
    assert_eq!(events[0], LiveEvent::EmployeeDeleted { employee_id });
    assert_eq!(events[1], LiveEvent::ContractDeleted { contract_id });
}

#[tokio::test]
async fn test_egg_migration_routes() {
    let app: TestApp = test_app();
    let pool: i64 = create(&app, "/fish-pools", &json!({ "name": "Pool 1" }), "fish_pool_id").await;
    let lab_box: i64 = create(&app, "/lab-boxes", &json!({ "code": "BX-1" }), "lab_box_id").await;
    let employee: i64 =
        create(&app, "/employees", &employee_body("tech@example.com"), "employee_id").await;

    let migration_id: i64 = create(
        &app,
        "/parent-egg-migrations",
        &json!({
            "fish_pool_id": pool,
            "lab_box_id": lab_box,
            "employee_id": employee,
            "migration_date": "2026-01-15",
            "egg_count": 12000
        }),
        "migration_id",
    )
    .await;

    let (status, page) = send(
        &app,
        empty_request("GET", &format!("/parent-egg-migrations?fish_pool_id={pool}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);

    let (status, _) = send(&app, empty_request("DELETE", &format!("/fish-pools/{pool}"))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, renamed) = send(
        &app,
        json_request("PATCH", &format!("/fish-pools/{pool}"), &json!({ "name": "Pool One" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "Pool One");

    let (status, _) = send(
        &app,
        empty_request("DELETE", &format!("/parent-egg-migrations/{migration_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
