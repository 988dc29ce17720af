// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Site handlers.
//!
//! A site has an optional manager, an optional supervisor and a roster of
//! assigned employees. The manager and supervisor are different people and
//! neither appears in the roster.

use std::collections::HashSet;

use aquahr_domain::{
    Page, Site, SiteSortKey, normalize_optional, validate_required, validate_site_assignment,
};
use aquahr_persistence::{ListOptions, Persistence, PersistenceError};
use tracing::{debug, info};

use super::{list_options, map_unique};
use crate::error::ApiError;
use crate::request_response::{
    CreateSiteRequest, DeleteResponse, ReplaceRosterRequest, SiteListQuery, UpdateSiteRequest,
};

const SITE_NAME_MAX_LEN: usize = 100;

/// Validates the site's own fields and leadership rules.
fn validate_site(site: &Site) -> Result<(), ApiError> {
    validate_required("name", &site.name, SITE_NAME_MAX_LEN)?;
    validate_site_assignment(site.manager_id, site.supervisor_id, &site.employee_ids)?;
    Ok(())
}

/// Checks that every employee the site references exists.
///
/// The error names the first missing reference: `manager_id`,
/// `supervisor_id`, or `employee_ids`.
fn require_site_employees(persistence: &mut Persistence, site: &Site) -> Result<(), ApiError> {
    let mut referenced: Vec<i64> = site.employee_ids.clone();
    referenced.extend(site.manager_id);
    referenced.extend(site.supervisor_id);
    if referenced.is_empty() {
        return Ok(());
    }

    let existing: HashSet<i64> = persistence
        .existing_employee_ids(&referenced)?
        .into_iter()
        .collect();

    if let Some(manager_id) = site.manager_id
        && !existing.contains(&manager_id)
    {
        return Err(ApiError::unknown_reference("manager_id", "Employee", manager_id));
    }
    if let Some(supervisor_id) = site.supervisor_id
        && !existing.contains(&supervisor_id)
    {
        return Err(ApiError::unknown_reference(
            "supervisor_id",
            "Employee",
            supervisor_id,
        ));
    }
    if let Some(missing) = site.employee_ids.iter().find(|id| !existing.contains(*id)) {
        return Err(ApiError::unknown_reference("employee_ids", "Employee", *missing));
    }
    Ok(())
}

fn duplicate_name(err: PersistenceError, name: &str) -> ApiError {
    map_unique(err, "unique_site_name", format!("Site '{name}' already exists"))
}

/// Creates a site with its roster.
///
/// # Errors
///
/// Returns an error if a field is invalid, the leadership rules are broken,
/// a referenced employee does not exist, or the name is taken.
pub fn create_site(
    persistence: &mut Persistence,
    request: &CreateSiteRequest,
) -> Result<Site, ApiError> {
    let site: Site = Site {
        site_id: None,
        name: request.name.trim().to_string(),
        location: normalize_optional(request.location.clone()),
        description: normalize_optional(request.description.clone()),
        image_url: normalize_optional(request.image_url.clone()),
        manager_id: request.manager_id,
        supervisor_id: request.supervisor_id,
        employee_ids: request.employee_ids.clone(),
        created_at: None,
    };
    validate_site(&site)?;
    require_site_employees(persistence, &site)?;

    let site_id: i64 = persistence
        .create_site(&site)
        .map_err(|e| duplicate_name(e, &site.name))?;

    info!(site_id, name = %site.name, roster = site.employee_ids.len(), "Created site");
    get_site(persistence, site_id)
}

/// Retrieves a site with its roster.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the site does not exist.
pub fn get_site(persistence: &mut Persistence, site_id: i64) -> Result<Site, ApiError> {
    persistence
        .get_site(site_id)?
        .ok_or_else(|| ApiError::not_found("Site", site_id))
}

/// Lists sites with their rosters.
///
/// # Errors
///
/// Returns an error if the query parameters are invalid.
pub fn list_sites(
    persistence: &mut Persistence,
    query: &SiteListQuery,
) -> Result<Page<Site>, ApiError> {
    let options: ListOptions<SiteSortKey> = list_options(
        query.search.as_deref(),
        query.sort.as_deref(),
        query.order.as_deref(),
        query.page,
        query.per_page,
    )?;
    let page: Page<Site> = persistence.list_sites(&options)?;
    debug!(total = page.total, "Listed sites");
    Ok(page)
}

/// Applies a partial update to a site.
///
/// The roster is replaced only when `employee_ids` is given. The patched
/// site is checked as a whole, so promoting a roster member to manager
/// requires removing them from the roster in the same request.
///
/// # Errors
///
/// Returns an error if the site does not exist, the patched site breaks a
/// rule, a referenced employee does not exist, or the name is taken.
pub fn update_site(
    persistence: &mut Persistence,
    site_id: i64,
    request: &UpdateSiteRequest,
) -> Result<Site, ApiError> {
    let mut site: Site = get_site(persistence, site_id)?;

    if let Some(name) = &request.name {
        site.name = name.trim().to_string();
    }
    if let Some(location) = &request.location {
        site.location = normalize_optional(location.clone());
    }
    if let Some(description) = &request.description {
        site.description = normalize_optional(description.clone());
    }
    if let Some(image_url) = &request.image_url {
        site.image_url = normalize_optional(image_url.clone());
    }
    if let Some(manager_id) = request.manager_id {
        site.manager_id = manager_id;
    }
    if let Some(supervisor_id) = request.supervisor_id {
        site.supervisor_id = supervisor_id;
    }
    if let Some(employee_ids) = &request.employee_ids {
        site.employee_ids.clone_from(employee_ids);
    }
    validate_site(&site)?;
    require_site_employees(persistence, &site)?;

    persistence
        .update_site(&site)
        .map_err(|e| duplicate_name(e, &site.name))?;

    info!(site_id, "Updated site");
    get_site(persistence, site_id)
}

/// Replaces a site's roster.
///
/// # Errors
///
/// Returns an error if the site does not exist, the roster breaks a rule,
/// or a listed employee does not exist.
pub fn replace_site_roster(
    persistence: &mut Persistence,
    site_id: i64,
    request: &ReplaceRosterRequest,
) -> Result<Site, ApiError> {
    let mut site: Site = get_site(persistence, site_id)?;
    site.employee_ids.clone_from(&request.employee_ids);
    validate_site(&site)?;
    require_site_employees(persistence, &site)?;

    persistence.replace_site_roster(site_id, &site.employee_ids)?;
    info!(site_id, roster = site.employee_ids.len(), "Replaced site roster");
    get_site(persistence, site_id)
}

/// Adds one employee to a site's roster.
///
/// Adding an employee who is already on the roster is a no-op.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the site or employee does not exist, or a
/// rule violation if the employee leads the site.
pub fn assign_site_employee(
    persistence: &mut Persistence,
    site_id: i64,
    employee_id: i64,
) -> Result<Site, ApiError> {
    let mut site: Site = get_site(persistence, site_id)?;
    if !persistence.employee_exists(employee_id)? {
        return Err(ApiError::not_found("Employee", employee_id));
    }
    if site.employee_ids.contains(&employee_id) {
        return Ok(site);
    }

    site.employee_ids.push(employee_id);
    validate_site_assignment(site.manager_id, site.supervisor_id, &site.employee_ids)?;

    persistence.add_site_employee(site_id, employee_id)?;
    info!(site_id, employee_id, "Assigned employee to site");
    get_site(persistence, site_id)
}

/// Removes one employee from a site's roster.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the site does not exist or the employee is
/// not on its roster.
pub fn unassign_site_employee(
    persistence: &mut Persistence,
    site_id: i64,
    employee_id: i64,
) -> Result<Site, ApiError> {
    let site: Site = get_site(persistence, site_id)?;
    if !site.employee_ids.contains(&employee_id) {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Site assignment"),
            message: format!("Employee {employee_id} is not assigned to site {site_id}"),
        });
    }

    persistence.remove_site_employee(site_id, employee_id)?;
    info!(site_id, employee_id, "Unassigned employee from site");
    get_site(persistence, site_id)
}

/// Records a stored image location on a site.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the site does not exist.
pub fn set_site_image(
    persistence: &mut Persistence,
    site_id: i64,
    image_url: &str,
) -> Result<Site, ApiError> {
    let mut site: Site = get_site(persistence, site_id)?;
    site.image_url = Some(image_url.to_string());

    persistence.update_site(&site)?;
    info!(site_id, "Set site image");
    get_site(persistence, site_id)
}

/// Deletes a site and its roster.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the site does not exist.
pub fn delete_site(
    persistence: &mut Persistence,
    site_id: i64,
) -> Result<DeleteResponse, ApiError> {
    let site: Site = get_site(persistence, site_id)?;
    persistence.delete_site(site_id)?;

    info!(site_id, "Deleted site");
    Ok(DeleteResponse {
        id: site_id,
        message: format!("Site '{}' deleted", site.name),
    })
}
