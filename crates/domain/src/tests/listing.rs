// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, EmployeeSortKey, JobSortKey, MAX_PER_PAGE, Page, PageRequest, SortOrder,
    parse_sort_key, parse_sort_order,
};

#[test]
fn test_page_request_defaults() {
    let request: PageRequest = PageRequest::new(None, None).unwrap();
    assert_eq!(request.page(), 1);
    assert_eq!(request.per_page(), 20);
    assert_eq!(request.offset(), 0);
    assert_eq!(request, PageRequest::default());
}

#[test]
fn test_page_request_offset() {
    let request: PageRequest = PageRequest::new(Some(3), Some(25)).unwrap();
    assert_eq!(request.offset(), 50);
    assert_eq!(request.limit(), 25);
}

#[test]
fn test_page_request_rejects_out_of_range_values() {
    assert!(matches!(
        PageRequest::new(Some(0), None),
        Err(DomainError::InvalidPagination(_))
    ));
    assert!(matches!(
        PageRequest::new(None, Some(MAX_PER_PAGE + 1)),
        Err(DomainError::InvalidPagination(_))
    ));
    assert!(matches!(
        PageRequest::new(None, Some(0)),
        Err(DomainError::InvalidPagination(_))
    ));
}

#[test]
fn test_page_counts_partial_last_page() {
    let request: PageRequest = PageRequest::new(Some(1), Some(10)).unwrap();
    let page: Page<u8> = Page::new(vec![1, 2, 3], 21, request);
    assert_eq!(page.total_pages, 3);

    let empty: Page<u8> = Page::new(Vec::new(), 0, request);
    assert_eq!(empty.total_pages, 0);
}

#[test]
fn test_page_map_keeps_metadata() {
    let request: PageRequest = PageRequest::new(Some(2), Some(2)).unwrap();
    let page: Page<u8> = Page::new(vec![3, 4], 5, request);
    let mapped: Page<String> = page.map(|n| n.to_string());
    assert_eq!(mapped.items, vec!["3", "4"]);
    assert_eq!(mapped.page, 2);
    assert_eq!(mapped.total, 5);
}

#[test]
fn test_sort_key_parsing() {
    assert_eq!(
        parse_sort_key::<EmployeeSortKey>(Some("hire_date")).unwrap(),
        EmployeeSortKey::HireDate
    );
    assert_eq!(
        parse_sort_key::<JobSortKey>(None).unwrap(),
        JobSortKey::CreatedAt
    );
    assert_eq!(
        parse_sort_key::<EmployeeSortKey>(Some("salary")),
        Err(DomainError::InvalidSortKey(String::from("salary")))
    );
}

#[test]
fn test_sort_order_parsing() {
    assert_eq!(parse_sort_order(Some("DESC")).unwrap(), SortOrder::Desc);
    assert_eq!(parse_sort_order(None).unwrap(), SortOrder::Asc);
    assert!(parse_sort_order(Some("sideways")).is_err());
}
