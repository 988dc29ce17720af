// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router and shared state.
//!
//! Handlers lock the persistence mutex for one API operation, release it,
//! then broadcast the matching live event.

mod files;
mod operations;
mod people;
mod recruitment;
mod sites;

use std::sync::Arc;

use aquahr_persistence::Persistence;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, FromRef, State as AxumState},
    routing::{get, patch, post, put},
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::HttpError;
use crate::live::{LiveEventBroadcaster, live_events_handler};
use crate::uploads::UploadStore;

/// Slack allowed on top of the file payloads for multipart framing.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Most files accepted in one upload request (cv, id document and photo).
const MAX_FILES_PER_REQUEST: usize = 3;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The single database connection, serialized behind a mutex.
    pub persistence: Arc<Mutex<Persistence>>,
    pub broadcaster: Arc<LiveEventBroadcaster>,
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    /// Wraps the given persistence and upload store with a fresh
    /// broadcaster.
    #[must_use]
    pub fn new(persistence: Persistence, uploads: UploadStore) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            broadcaster: Arc::new(LiveEventBroadcaster::new()),
            uploads: Arc::new(uploads),
        }
    }
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.broadcaster)
    }
}

/// Today's date (UTC), the reference for age and contract status rules.
fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

/// Handler for GET `/health`.
async fn handle_health(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<HealthResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    persistence.health_check()?;
    drop(persistence);

    debug!("Health check passed");
    Ok(Json(HealthResponse {
        status: String::from("ok"),
        database: String::from("ok"),
    }))
}

/// Builds the application router with all endpoints.
///
/// `PUT` and `PATCH` on a record are the same partial update.
pub fn build_router(app_state: AppState) -> Router {
    let upload_body_limit: usize = app_state
        .uploads
        .max_bytes()
        .saturating_mul(MAX_FILES_PER_REQUEST)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(handle_health))
        .route("/live", get(live_events_handler))
        // Departments
        .route(
            "/departments",
            get(people::handle_list_departments).post(people::handle_create_department),
        )
        .route(
            "/departments/{id}",
            get(people::handle_get_department)
                .put(people::handle_update_department)
                .patch(people::handle_update_department)
                .delete(people::handle_delete_department),
        )
        // Employees
        .route(
            "/employees",
            get(people::handle_list_employees).post(people::handle_create_employee),
        )
        .route(
            "/employees/{id}",
            get(people::handle_get_employee)
                .put(people::handle_update_employee)
                .patch(people::handle_update_employee)
                .delete(people::handle_delete_employee),
        )
        .route(
            "/employees/{id}/contracts",
            get(people::handle_list_employee_contracts),
        )
        .route(
            "/employees/{id}/documents",
            post(files::handle_upload_employee_documents)
                .layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        // Contracts
        .route(
            "/contracts",
            get(people::handle_list_contracts).post(people::handle_create_contract),
        )
        .route(
            "/contracts/{id}",
            get(people::handle_get_contract)
                .put(people::handle_update_contract)
                .patch(people::handle_update_contract)
                .delete(people::handle_delete_contract),
        )
        .route(
            "/contracts/{id}/terminate",
            post(people::handle_terminate_contract),
        )
        // Jobs
        .route(
            "/jobs",
            get(recruitment::handle_list_jobs).post(recruitment::handle_create_job),
        )
        .route(
            "/jobs/{id}",
            get(recruitment::handle_get_job)
                .put(recruitment::handle_update_job)
                .patch(recruitment::handle_update_job)
                .delete(recruitment::handle_delete_job),
        )
        // Applicants
        .route(
            "/applicants",
            get(recruitment::handle_list_applicants).post(recruitment::handle_create_applicant),
        )
        .route(
            "/applicants/{id}",
            get(recruitment::handle_get_applicant)
                .put(recruitment::handle_update_applicant)
                .patch(recruitment::handle_update_applicant)
                .delete(recruitment::handle_delete_applicant),
        )
        .route(
            "/applicants/{id}/stage",
            patch(recruitment::handle_change_applicant_stage),
        )
        // Sites
        .route(
            "/sites",
            get(sites::handle_list_sites).post(sites::handle_create_site),
        )
        .route(
            "/sites/{id}",
            get(sites::handle_get_site)
                .put(sites::handle_update_site)
                .patch(sites::handle_update_site)
                .delete(sites::handle_delete_site),
        )
        .route("/sites/{id}/employees", put(sites::handle_replace_roster))
        .route(
            "/sites/{id}/employees/{employee_id}",
            post(sites::handle_assign_employee).delete(sites::handle_unassign_employee),
        )
        .route(
            "/sites/{id}/image",
            post(files::handle_upload_site_image).layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        // Hatchery operations
        .route(
            "/fish-pools",
            get(operations::handle_list_fish_pools).post(operations::handle_create_fish_pool),
        )
        .route(
            "/fish-pools/{id}",
            get(operations::handle_get_fish_pool)
                .put(operations::handle_update_fish_pool)
                .patch(operations::handle_update_fish_pool)
                .delete(operations::handle_delete_fish_pool),
        )
        .route(
            "/lab-boxes",
            get(operations::handle_list_lab_boxes).post(operations::handle_create_lab_box),
        )
        .route(
            "/lab-boxes/{id}",
            get(operations::handle_get_lab_box)
                .put(operations::handle_update_lab_box)
                .patch(operations::handle_update_lab_box)
                .delete(operations::handle_delete_lab_box),
        )
        .route(
            "/parent-egg-migrations",
            get(operations::handle_list_egg_migrations)
                .post(operations::handle_create_egg_migration),
        )
        .route(
            "/parent-egg-migrations/{id}",
            get(operations::handle_get_egg_migration)
                .put(operations::handle_update_egg_migration)
                .patch(operations::handle_update_egg_migration)
                .delete(operations::handle_delete_egg_migration),
        )
        // Stored files
        .route("/uploads/{*path}", get(files::handle_get_upload))
        .with_state(app_state)
}
