// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Farm site endpoints, including roster management.

use aquahr_api::{
    CreateSiteRequest, DeleteResponse, ReplaceRosterRequest, SiteListQuery, UpdateSiteRequest,
    assign_site_employee, create_site, delete_site, get_site, list_sites, replace_site_roster,
    unassign_site_employee, update_site,
};
use aquahr_domain::{Page, Site};
use axum::{
    Json,
    extract::{Path, State as AxumState},
    http::StatusCode,
};
use tracing::{debug, info};

use super::AppState;
use crate::error::{HttpError, JsonBody, QueryParams};
use crate::live::LiveEvent;

/// Announces a site change and hands the site back for the response.
fn announce(app_state: &AppState, site: Site) -> Json<Site> {
    app_state
        .broadcaster
        .broadcast(&LiveEvent::SiteUpdated { site: site.clone() });
    Json(site)
}

/// Handler for POST `/sites`.
pub(super) async fn handle_create_site(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<CreateSiteRequest>,
) -> Result<(StatusCode, Json<Site>), HttpError> {
    info!(name = %req.name, "Handling create_site request");

    let mut persistence = app_state.persistence.lock().await;
    let site: Site = create_site(&mut persistence, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, announce(&app_state, site)))
}

/// Handler for GET `/sites`.
pub(super) async fn handle_list_sites(
    AxumState(app_state): AxumState<AppState>,
    QueryParams(query): QueryParams<SiteListQuery>,
) -> Result<Json<Page<Site>>, HttpError> {
    debug!(?query, "Handling list_sites request");

    let mut persistence = app_state.persistence.lock().await;
    let page: Page<Site> = list_sites(&mut persistence, &query)?;
    drop(persistence);

    Ok(Json(page))
}

/// Handler for GET `/sites/{id}`.
pub(super) async fn handle_get_site(
    AxumState(app_state): AxumState<AppState>,
    Path(site_id): Path<i64>,
) -> Result<Json<Site>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let site: Site = get_site(&mut persistence, site_id)?;
    drop(persistence);

    Ok(Json(site))
}

/// Handler for PUT/PATCH `/sites/{id}`.
pub(super) async fn handle_update_site(
    AxumState(app_state): AxumState<AppState>,
    Path(site_id): Path<i64>,
    JsonBody(req): JsonBody<UpdateSiteRequest>,
) -> Result<Json<Site>, HttpError> {
    info!(site_id, "Handling update_site request");

    let mut persistence = app_state.persistence.lock().await;
    let site: Site = update_site(&mut persistence, site_id, &req)?;
    drop(persistence);

    Ok(announce(&app_state, site))
}

/// Handler for PUT `/sites/{id}/employees`.
pub(super) async fn handle_replace_roster(
    AxumState(app_state): AxumState<AppState>,
    Path(site_id): Path<i64>,
    JsonBody(req): JsonBody<ReplaceRosterRequest>,
) -> Result<Json<Site>, HttpError> {
    info!(
        site_id,
        employees = req.employee_ids.len(),
        "Handling replace_site_roster request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let site: Site = replace_site_roster(&mut persistence, site_id, &req)?;
    drop(persistence);

    Ok(announce(&app_state, site))
}

/// Handler for POST `/sites/{id}/employees/{employee_id}`.
pub(super) async fn handle_assign_employee(
    AxumState(app_state): AxumState<AppState>,
    Path((site_id, employee_id)): Path<(i64, i64)>,
) -> Result<Json<Site>, HttpError> {
    info!(site_id, employee_id, "Handling assign_site_employee request");

    let mut persistence = app_state.persistence.lock().await;
    let site: Site = assign_site_employee(&mut persistence, site_id, employee_id)?;
    drop(persistence);

    Ok(announce(&app_state, site))
}

/// Handler for DELETE `/sites/{id}/employees/{employee_id}`.
pub(super) async fn handle_unassign_employee(
    AxumState(app_state): AxumState<AppState>,
    Path((site_id, employee_id)): Path<(i64, i64)>,
) -> Result<Json<Site>, HttpError> {
    info!(site_id, employee_id, "Handling unassign_site_employee request");

    let mut persistence = app_state.persistence.lock().await;
    let site: Site = unassign_site_employee(&mut persistence, site_id, employee_id)?;
    drop(persistence);

    Ok(announce(&app_state, site))
}

/// Handler for DELETE `/sites/{id}`.
pub(super) async fn handle_delete_site(
    AxumState(app_state): AxumState<AppState>,
    Path(site_id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(site_id, "Handling delete_site request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse = delete_site(&mut persistence, site_id)?;
    drop(persistence);

    Ok(Json(response))
}
