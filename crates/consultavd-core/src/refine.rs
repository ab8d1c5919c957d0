//! Client-side refinement of an already-fetched result set.
//!
//! [`refine`] runs a fixed pipeline over an immutable slice of records:
//! status filter, free-text filter, stable sort, then optional pagination.
//! Nothing here performs I/O or fails; missing fields resolve to the empty
//! placeholder and are filtered and sorted like any other value.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::resolve::LogicalField;

/// Logical field a refined list can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Name,
    Code,
    City,
}

impl SortField {
    #[must_use]
    pub const fn logical(self) -> LogicalField {
        match self {
            Self::Name => LogicalField::Name,
            Self::Code => LogicalField::Code,
            Self::City => LogicalField::City,
        }
    }

    /// Sort key for `record`. Text fields compare case-insensitively; the
    /// code compares as its string form.
    fn key(self, record: &Record) -> String {
        let raw = record.resolve(self.logical());
        match self {
            Self::Name | Self::City => raw.to_lowercase(),
            Self::Code => raw,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Orients an ascending comparison. Equal stays equal, so a stable sort
    /// keeps input order for ties in both directions.
    #[must_use]
    pub fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// A 1-based page window over a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Pagination {
    /// Builds a window, coercing a zero page or page size up to 1.
    #[must_use]
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub fn first(page_size: usize) -> Self {
        Self::new(1, page_size)
    }

    #[must_use]
    pub fn page(self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(self) -> usize {
        self.page_size
    }

    /// Zero-based index of the first item on this page.
    #[must_use]
    pub fn offset(self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Number of pages needed for `total` items; an empty list still has one.
    #[must_use]
    pub fn total_pages(self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Changes the page size while keeping the first visible item visible.
    ///
    /// With item numbers counted from 1, the item at the top of the current
    /// page is `offset + 1`; the new page is the one whose range contains it.
    #[must_use]
    pub fn resize(self, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let first_visible = self.offset().saturating_add(1);
        Self {
            page: first_visible.div_ceil(page_size),
            page_size,
        }
    }

    /// Pulls the page back inside `1..=total_pages(total)`.
    #[must_use]
    pub fn clamp(self, total: usize) -> Self {
        Self {
            page: self.page.min(self.total_pages(total)),
            page_size: self.page_size,
        }
    }

    /// The following page, or `self` when already on the last one.
    #[must_use]
    pub fn next(self, total: usize) -> Self {
        if self.page < self.total_pages(total) {
            Self::new(self.page + 1, self.page_size)
        } else {
            self
        }
    }

    /// The preceding page, stopping at the first.
    #[must_use]
    pub fn previous(self) -> Self {
        Self::new(self.page.saturating_sub(1), self.page_size)
    }

    /// Items of `items` that fall on this page; empty past the end.
    #[must_use]
    pub fn slice<T>(self, items: &[T]) -> &[T] {
        let start = self.offset().min(items.len());
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }
}

/// Inputs of the refinement pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefinerParams {
    /// Exact, case-sensitive status to keep; empty keeps every status.
    pub status: String,
    /// Free-text query matched against name, code and city.
    pub query: String,
    pub sort_field: SortField,
    pub direction: SortDirection,
    pub page: Option<Pagination>,
}

/// Output of [`refine`]: the full refined list plus the visible window.
#[derive(Debug, Clone, PartialEq)]
pub struct Refined<'a> {
    /// Every record that passed the filters, in sorted order.
    pub all: Vec<&'a Record>,
    /// Effective page after clamping to the refined length.
    pub page: Option<Pagination>,
}

impl<'a> Refined<'a> {
    /// Records on the current page, or every refined record when unpaginated.
    #[must_use]
    pub fn visible(&self) -> &[&'a Record] {
        match self.page {
            Some(page) => page.slice(&self.all),
            None => &self.all,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.all.len()
    }
}

/// Runs status filter, free-text filter, sort and pagination over `records`.
#[must_use]
pub fn refine<'a>(records: &'a [Record], params: &RefinerParams) -> Refined<'a> {
    let query = params.query.to_lowercase();
    let filtered = records
        .iter()
        .filter(|record| matches_status(record, &params.status))
        .filter(|record| matches_query(record, &query));
    let all = sort_records(filtered, params.sort_field, params.direction);
    let page = params.page.map(|page| page.clamp(all.len()));
    Refined { all, page }
}

fn matches_status(record: &Record, status: &str) -> bool {
    status.is_empty() || record.status() == status
}

/// `query` must already be lower-cased.
fn matches_query(record: &Record, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    [LogicalField::Name, LogicalField::Code, LogicalField::City]
        .into_iter()
        .any(|field| record.resolve(field).to_lowercase().contains(query))
}

fn sort_records<'a>(
    records: impl Iterator<Item = &'a Record>,
    field: SortField,
    direction: SortDirection,
) -> Vec<&'a Record> {
    let mut keyed: Vec<(String, &'a Record)> =
        records.map(|record| (field.key(record), record)).collect();
    // `sort_by` is stable: equal keys keep their filtered order.
    keyed.sort_by(|(a, _), (b, _)| direction.orient(a.cmp(b)));
    keyed.into_iter().map(|(_, record)| record).collect()
}
