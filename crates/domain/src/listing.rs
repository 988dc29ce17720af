// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pagination and sorting for list endpoints.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default page size when the caller gives none.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Largest page size a caller may request.
pub const MAX_PER_PAGE: u32 = 100;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(DomainError::InvalidEnumValue {
                field: "order",
                value: s.to_string(),
            }),
        }
    }
}

/// A validated page request (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Creates a page request, applying defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPagination` if `page` is zero or
    /// `per_page` is outside `1..=MAX_PER_PAGE`.
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Result<Self, DomainError> {
        let page: u32 = page.unwrap_or(1);
        let per_page: u32 = per_page.unwrap_or(DEFAULT_PER_PAGE);

        if page == 0 {
            return Err(DomainError::InvalidPagination(String::from(
                "page must be at least 1",
            )));
        }
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(DomainError::InvalidPagination(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}, got {per_page}"
            )));
        }

        Ok(Self { page, per_page })
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Row offset of the first item on this page.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.per_page as i64
    }

    /// Row limit for this page.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total matching items across all pages.
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Assembles a page from its items and the total match count.
    #[must_use]
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        let per_page: i64 = i64::from(request.per_page());
        let pages: i64 = if total <= 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };

        Self {
            items,
            total,
            page: request.page(),
            per_page: request.per_page(),
            total_pages: u32::try_from(pages).unwrap_or(u32::MAX),
        }
    }

    /// Converts the items while keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Generates a sort-key enum parsed from a query string value.
macro_rules! sort_keys {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident => $text:literal ),+ $(,)?
        }
        default = $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Converts this key to its query-string spelling.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(DomainError::InvalidSortKey(s.to_string())),
                }
            }
        }
    };
}

sort_keys! {
    /// Sortable department columns.
    DepartmentSortKey {
        Name => "name",
        CreatedAt => "created_at",
    }
    default = Name
}

sort_keys! {
    /// Sortable employee columns.
    EmployeeSortKey {
        LastName => "last_name",
        FirstName => "first_name",
        Email => "email",
        Position => "position",
        HireDate => "hire_date",
        CreatedAt => "created_at",
    }
    default = LastName
}

sort_keys! {
    /// Sortable contract columns.
    ContractSortKey {
        StartDate => "start_date",
        EndDate => "end_date",
        Salary => "salary",
        Status => "status",
        CreatedAt => "created_at",
    }
    default = StartDate
}

sort_keys! {
    /// Sortable job columns.
    JobSortKey {
        Title => "title",
        Status => "status",
        ClosingDate => "closing_date",
        CreatedAt => "created_at",
    }
    default = CreatedAt
}

sort_keys! {
    /// Sortable applicant columns.
    ApplicantSortKey {
        AppliedAt => "applied_at",
        LastName => "last_name",
        Stage => "stage",
    }
    default = AppliedAt
}

sort_keys! {
    /// Sortable site columns.
    SiteSortKey {
        Name => "name",
        CreatedAt => "created_at",
    }
    default = Name
}

sort_keys! {
    /// Sortable egg migration columns.
    EggMigrationSortKey {
        MigrationDate => "migration_date",
        EggCount => "egg_count",
    }
    default = MigrationDate
}

/// Parses an optional sort key, falling back to the resource default.
///
/// # Errors
///
/// Returns `DomainError::InvalidSortKey` for unknown keys.
pub fn parse_sort_key<K>(value: Option<&str>) -> Result<K, DomainError>
where
    K: FromStr<Err = DomainError> + Default,
{
    match value.map(str::trim) {
        None | Some("") => Ok(K::default()),
        Some(v) => v.parse(),
    }
}

/// Parses an optional sort order, defaulting to ascending.
///
/// # Errors
///
/// Returns an error for values other than `asc` or `desc`.
pub fn parse_sort_order(value: Option<&str>) -> Result<SortOrder, DomainError> {
    match value.map(str::trim) {
        None | Some("") => Ok(SortOrder::Asc),
        Some(v) => v.parse(),
    }
}
