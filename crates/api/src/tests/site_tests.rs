// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use aquahr_domain::{Page, Site};
use aquahr_persistence::Persistence;

use super::helpers::{seed_employee, setup};
use crate::{
    ApiError, CreateSiteRequest, ReplaceRosterRequest, SiteListQuery, UpdateSiteRequest,
    assign_site_employee, create_site, delete_site, get_site, list_sites, replace_site_roster,
    set_site_image, unassign_site_employee, update_site,
};

fn site_request(name: &str) -> CreateSiteRequest {
    CreateSiteRequest {
        name: name.to_string(),
        location: Some(String::from("Damietta")),
        description: None,
        image_url: None,
        manager_id: None,
        supervisor_id: None,
        employee_ids: Vec::new(),
    }
}

/// Seeds four employees: manager, supervisor and two workers.
fn seed_staff(persistence: &mut Persistence) -> (i64, i64, i64, i64) {
    (
        seed_employee(persistence, "manager@example.com"),
        seed_employee(persistence, "supervisor@example.com"),
        seed_employee(persistence, "worker1@example.com"),
        seed_employee(persistence, "worker2@example.com"),
    )
}

#[test]
fn test_create_then_get_returns_same_fields() {
    let mut persistence = setup();
    let (manager, supervisor, w1, w2) = seed_staff(&mut persistence);
    let mut request: CreateSiteRequest = site_request("East Hatchery");
    request.manager_id = Some(manager);
    request.supervisor_id = Some(supervisor);
    request.employee_ids = vec![w1, w2];

    let created: Site = create_site(&mut persistence, &request).unwrap();
    let fetched: Site = get_site(&mut persistence, created.site_id.unwrap()).unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.manager_id, Some(manager));
    assert_eq!(fetched.supervisor_id, Some(supervisor));
    assert_eq!(fetched.employee_ids, vec![w1, w2]);
}

#[test]
fn test_manager_cannot_be_supervisor() {
    let mut persistence = setup();
    let (manager, _, _, _) = seed_staff(&mut persistence);
    let mut request: CreateSiteRequest = site_request("Solo");
    request.manager_id = Some(manager);
    request.supervisor_id = Some(manager);

    let err: ApiError = create_site(&mut persistence, &request).unwrap_err();
    assert!(
        matches!(
            err,
            ApiError::DomainRuleViolation { ref rule, .. } if rule == "distinct_site_leaders",
        )
    );
}

#[test]
fn test_leaders_cannot_be_in_roster() {
    let mut persistence = setup();
    let (manager, supervisor, w1, _) = seed_staff(&mut persistence);

    let mut request: CreateSiteRequest = site_request("Roster A");
    request.manager_id = Some(manager);
    request.employee_ids = vec![w1, manager];
    let err: ApiError = create_site(&mut persistence, &request).unwrap_err();
    assert!(
        matches!(
            err,
            ApiError::DomainRuleViolation { ref rule, .. } if rule == "leaders_not_in_roster",
        )
    );

    let mut request: CreateSiteRequest = site_request("Roster B");
    request.supervisor_id = Some(supervisor);
    request.employee_ids = vec![supervisor];
    let err: ApiError = create_site(&mut persistence, &request).unwrap_err();
    assert!(matches!(err, ApiError::DomainRuleViolation { .. }));
}

#[test]
fn test_roster_rejects_duplicates() {
    let mut persistence = setup();
    let (_, _, w1, _) = seed_staff(&mut persistence);
    let mut request: CreateSiteRequest = site_request("Dupes");
    request.employee_ids = vec![w1, w1];

    let err: ApiError = create_site(&mut persistence, &request).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "employee_ids"));
}

#[test]
fn test_unknown_employee_references_are_rejected() {
    let mut persistence = setup();
    let (_, _, w1, _) = seed_staff(&mut persistence);

    let mut request: CreateSiteRequest = site_request("Ghost Manager");
    request.manager_id = Some(9_999);
    let err: ApiError = create_site(&mut persistence, &request).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "manager_id"));

    let mut request: CreateSiteRequest = site_request("Ghost Worker");
    request.employee_ids = vec![w1, 9_998];
    let err: ApiError = create_site(&mut persistence, &request).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "employee_ids"));
}

#[test]
fn test_duplicate_site_name_is_conflict() {
    let mut persistence = setup();
    create_site(&mut persistence, &site_request("West Ponds")).unwrap();

    let err: ApiError = create_site(&mut persistence, &site_request("west ponds")).unwrap_err();
    assert!(matches!(err, ApiError::Conflict { ref rule, .. } if rule == "unique_site_name"));
}

#[test]
fn test_update_preserves_roster_when_not_given() {
    let mut persistence = setup();
    let (manager, _, w1, w2) = seed_staff(&mut persistence);
    let mut request: CreateSiteRequest = site_request("Keep Roster");
    request.employee_ids = vec![w1, w2];
    let site_id: i64 = create_site(&mut persistence, &request)
        .unwrap()
        .site_id
        .unwrap();

    let updated: Site = update_site(
        &mut persistence,
        site_id,
        &UpdateSiteRequest {
            manager_id: Some(Some(manager)),
            location: Some(None),
            ..UpdateSiteRequest::default()
        },
    )
    .unwrap();

    assert_eq!(updated.manager_id, Some(manager));
    assert_eq!(updated.location, None);
    assert_eq!(updated.employee_ids, vec![w1, w2]);
    assert_eq!(updated.name, "Keep Roster");
}

#[test]
fn test_update_cannot_promote_roster_member_without_removing_them() {
    let mut persistence = setup();
    let (_, _, w1, w2) = seed_staff(&mut persistence);
    let mut request: CreateSiteRequest = site_request("Promotion");
    request.employee_ids = vec![w1, w2];
    let site_id: i64 = create_site(&mut persistence, &request)
        .unwrap()
        .site_id
        .unwrap();

    let err: ApiError = update_site(
        &mut persistence,
        site_id,
        &UpdateSiteRequest {
            supervisor_id: Some(Some(w1)),
            ..UpdateSiteRequest::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::DomainRuleViolation { .. }));

    let updated: Site = update_site(
        &mut persistence,
        site_id,
        &UpdateSiteRequest {
            supervisor_id: Some(Some(w1)),
            employee_ids: Some(vec![w2]),
            ..UpdateSiteRequest::default()
        },
    )
    .unwrap();
    assert_eq!(updated.supervisor_id, Some(w1));
    assert_eq!(updated.employee_ids, vec![w2]);
}

#[test]
fn test_replace_roster() {
    let mut persistence = setup();
    let (manager, _, w1, w2) = seed_staff(&mut persistence);
    let mut request: CreateSiteRequest = site_request("Replace");
    request.manager_id = Some(manager);
    request.employee_ids = vec![w1];
    let site_id: i64 = create_site(&mut persistence, &request)
        .unwrap()
        .site_id
        .unwrap();

    let site: Site = replace_site_roster(
        &mut persistence,
        site_id,
        &ReplaceRosterRequest {
            employee_ids: vec![w2],
        },
    )
    .unwrap();
    assert_eq!(site.employee_ids, vec![w2]);

    let err: ApiError = replace_site_roster(
        &mut persistence,
        site_id,
        &ReplaceRosterRequest {
            employee_ids: vec![manager],
        },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::DomainRuleViolation { .. }));
    assert_eq!(get_site(&mut persistence, site_id).unwrap().employee_ids, vec![w2]);
}

#[test]
fn test_assign_and_unassign_single_employee() {
    let mut persistence = setup();
    let (manager, _, w1, _) = seed_staff(&mut persistence);
    let mut request: CreateSiteRequest = site_request("Single");
    request.manager_id = Some(manager);
    let site_id: i64 = create_site(&mut persistence, &request)
        .unwrap()
        .site_id
        .unwrap();

    let site: Site = assign_site_employee(&mut persistence, site_id, w1).unwrap();
    assert_eq!(site.employee_ids, vec![w1]);

    let again: Site = assign_site_employee(&mut persistence, site_id, w1).unwrap();
    assert_eq!(again.employee_ids, vec![w1]);

    let err: ApiError = assign_site_employee(&mut persistence, site_id, manager).unwrap_err();
    assert!(matches!(err, ApiError::DomainRuleViolation { .. }));

    let err: ApiError = assign_site_employee(&mut persistence, site_id, 9_999).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));

    let site: Site = unassign_site_employee(&mut persistence, site_id, w1).unwrap();
    assert!(site.employee_ids.is_empty());

    let err: ApiError = unassign_site_employee(&mut persistence, site_id, w1).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_set_site_image() {
    let mut persistence = setup();
    let site_id: i64 = create_site(&mut persistence, &site_request("Pictured"))
        .unwrap()
        .site_id
        .unwrap();

    let site: Site =
        set_site_image(&mut persistence, site_id, "/uploads/sites/1/pond.jpg").unwrap();
    assert_eq!(site.image_url.as_deref(), Some("/uploads/sites/1/pond.jpg"));
    assert_eq!(site.location.as_deref(), Some("Damietta"));
}

#[test]
fn test_list_and_delete_sites() {
    let mut persistence = setup();
    let (_, _, w1, _) = seed_staff(&mut persistence);
    let mut request: CreateSiteRequest = site_request("Alpha");
    request.employee_ids = vec![w1];
    let alpha: i64 = create_site(&mut persistence, &request)
        .unwrap()
        .site_id
        .unwrap();
    create_site(&mut persistence, &site_request("Beta")).unwrap();

    let page: Page<Site> = list_sites(&mut persistence, &SiteListQuery::default()).unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].name, "Alpha");
    assert_eq!(page.items[0].employee_ids, vec![w1]);

    delete_site(&mut persistence, alpha).unwrap();
    assert!(matches!(
        delete_site(&mut persistence, alpha),
        Err(ApiError::ResourceNotFound { .. })
    ));
    let page: Page<Site> = list_sites(&mut persistence, &SiteListQuery::default()).unwrap();
    assert_eq!(page.total, 1);
}
