//! Filtering and sorting over in-memory snapshots.
//!
//! # Responsibility
//! - Parse `"<field>-<asc|desc>"` sort specs shared by every section.
//! - Provide case-insensitive text matching and distinct-value helpers.
//!
//! # Invariants
//! - Sorting is stable: equal keys keep snapshot order.
//! - An unknown sort field leaves the order unchanged.
//! - Filters borrow from the snapshot; nothing is copied or mutated.

pub mod clients;
pub mod finance;
pub mod inventory;
pub mod schedule;

use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort direction `{other}`")),
        }
    }
}

/// Field + direction pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F> SortSpec<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl<F: FromStr> SortSpec<F> {
    /// Parses `"<field>-<asc|desc>"`; a bare field sorts ascending.
    ///
    /// Returns `None` for unknown fields or directions.
    pub fn parse(value: &str) -> Option<Self> {
        let (field, direction) = match value.trim().rsplit_once('-') {
            Some((field, direction)) => (field, direction.parse().ok()?),
            None => (value.trim(), SortDirection::Asc),
        };
        Some(Self {
            field: field.parse().ok()?,
            direction,
        })
    }
}

/// Stable-sorts `items` by `compare` in the requested direction.
pub(crate) fn sort_by_spec<T, F, C>(items: &mut [T], spec: Option<&SortSpec<F>>, compare: C)
where
    C: Fn(&F, &T, &T) -> Ordering,
{
    if let Some(spec) = spec {
        items.sort_by(|a, b| spec.direction.apply(compare(&spec.field, a, b)));
    }
}

/// Lowercased, trimmed search needle; `None` means "match everything".
pub(crate) fn normalize_needle(search: &str) -> Option<String> {
    let trimmed = search.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Case-insensitive substring match against an already lowercased needle.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// True when any present field contains the needle.
pub(crate) fn any_field_matches<'a, I>(fields: I, needle: &str) -> bool
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    fields
        .into_iter()
        .flatten()
        .any(|field| contains_ci(field, needle))
}

/// Case-insensitive text ordering, with the exact text as tie-break.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Distinct non-empty values in first-seen order.
pub fn distinct_values<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if value.trim().is_empty() || seen.iter().any(|known| known == value) {
            continue;
        }
        seen.push(value.to_string());
    }
    seen
}
