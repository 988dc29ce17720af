// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router test fixtures.

use aquahr_persistence::Persistence;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode},
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::routes::{AppState, build_router};
use crate::uploads::UploadStore;

/// Boundary used by the hand-built multipart bodies.
pub const BOUNDARY: &str = "aquahr-test-boundary";

/// A router over an in-memory database and a temporary upload directory.
///
/// The `TempDir` must outlive the router.
pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    pub upload_dir: TempDir,
}

pub fn test_app() -> TestApp {
    let upload_dir: TempDir = tempfile::tempdir().expect("Temporary upload dir");
    let persistence: Persistence = Persistence::new_in_memory().expect("In-memory database");
    let state: AppState = AppState::new(persistence, UploadStore::new(upload_dir.path(), 4_096));
    TestApp {
        router: build_router(state.clone()),
        state,
        upload_dir,
    }
}

/// Sends a request and returns the status and the JSON body (`Null` when
/// the body is empty).
pub async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response: Response<Body> = app.router.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };
    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Builds a multipart request from `(field, file name, bytes)` parts.
pub fn multipart_request(uri: &str, parts: &[(&str, &str, &[u8])]) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for (field, file_name, bytes) in parts {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn employee_body(email: &str) -> Value {
    json!({
        "first_name": "Mona",
        "last_name": "Fathy",
        "email": email,
        "gender": "FEMALE",
        "date_of_birth": "1994-09-20",
        "position": "Broodstock Supervisor",
        "hire_date": "2024-03-01",
        "experience": [
            {
                "company": "Nile Aquaculture",
                "role": "Technician",
                "start_date": "2016-01-01",
                "end_date": "2023-12-31"
            }
        ]
    })
}

pub fn job_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Care for broodstock and spawning tanks",
        "employment_type": "FULL_TIME",
        "experience_level": "MID",
        "skills": ["Water quality", "Spawning"],
        "salary_min": 30000,
        "salary_max": 45000
    })
}

/// Creates a record through the router and returns its ID field.
pub async fn create(app: &TestApp, uri: &str, body: &Value, id_field: &str) -> i64 {
    let (status, created) = send(app, json_request("POST", uri, body)).await;
    assert_eq!(status, StatusCode::CREATED, "creating {uri}: {created}");
    created[id_field].as_i64().unwrap()
}
