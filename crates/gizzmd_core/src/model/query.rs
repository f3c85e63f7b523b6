//! Document listing query model.
//!
//! # Responsibility
//! - Define pagination, sorting and date-range value objects.
//! - Aggregate them into [`DocsQuery`] and derive offset/pagination math.
//!
//! # Invariants
//! - `page >= 1` and `1 <= limit <= 100`.
//! - A [`DateRange`] never has `from > to`.
//! - An empty range filters nothing; a one-sided range is open-ended.

use crate::model::error::ValidationError;
use crate::model::values::Tags;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: i64 = 100;

/// 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Page(u64);

impl Page {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < 1 {
            return Err(ValidationError::PageOutOfRange { value });
        }
        // value >= 1 so the conversion is lossless.
        Ok(Self(value.unsigned_abs()))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Default for Page {
    fn default() -> Self {
        Self(DEFAULT_PAGE)
    }
}

/// Page size in `[1, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limit(u32);

impl Limit {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < 1 {
            return Err(ValidationError::LimitTooSmall { value });
        }
        if value > MAX_LIMIT {
            return Err(ValidationError::LimitTooLarge { value });
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| ValidationError::LimitTooLarge { value })
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self(DEFAULT_LIMIT)
    }
}

/// Whitelisted sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
}

impl SortBy {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            "title" => Ok(Self::Title),
            other => Err(ValidationError::InvalidSortBy {
                value: other.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Title => "title",
        }
    }
}

impl FromStr for SortBy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for SortBy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction. Defaults to newest-first (`desc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(ValidationError::InvalidSortOrder {
                value: other.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn is_desc(&self) -> bool {
        matches!(self, Self::Desc)
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional RFC3339 bound. Empty input means "no bound".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateFilter(Option<DateTime<Utc>>);

/// Byte offset of the date/time separator in `YYYY-MM-DDThh:mm:ss...`.
const DATE_TIME_SEPARATOR_AT: usize = 10;

impl DateFilter {
    /// Parses strict RFC3339: the date and time must be joined by an uppercase `T`.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Ok(Self(None));
        }

        let invalid = || ValidationError::InvalidDate {
            value: value.to_string(),
        };
        if !matches!(
            value.as_bytes().get(DATE_TIME_SEPARATOR_AT),
            Some(b'T')
        ) {
            return Err(invalid());
        }

        DateTime::parse_from_rfc3339(value)
            .map(|parsed| Self(Some(parsed.with_timezone(&Utc))))
            .map_err(|_| invalid())
    }

    pub fn at(value: DateTime<Utc>) -> Self {
        Self(Some(value))
    }

    pub fn value(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_none()
    }
}

impl Display for DateFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(value) => f.write_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => Ok(()),
        }
    }
}

/// Inclusive `[from, to]` window; either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateRange {
    from: DateFilter,
    to: DateFilter,
}

impl DateRange {
    pub fn new(from: DateFilter, to: DateFilter) -> Result<Self, ValidationError> {
        if let (Some(start), Some(end)) = (from.value(), to.value()) {
            if start > end {
                return Err(ValidationError::InvertedDateRange);
            }
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> DateFilter {
        self.from
    }

    pub fn to(&self) -> DateFilter {
        self.to
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_nil() && self.to.is_nil()
    }

    /// Whether `instant` falls inside the window. Bounds are inclusive.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        if let Some(start) = self.from.value() {
            if instant < start {
                return false;
            }
        }
        if let Some(end) = self.to.value() {
            if instant > end {
                return false;
            }
        }
        true
    }
}

/// Aggregate filter, sort and page parameters for document listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocsQuery {
    page: Page,
    limit: Limit,
    sort_by: SortBy,
    sort_order: SortOrder,
    tags: Tags,
    created_range: DateRange,
    updated_range: DateRange,
}

impl DocsQuery {
    pub fn new(
        page: Page,
        limit: Limit,
        sort_by: SortBy,
        sort_order: SortOrder,
        tags: Tags,
        created_range: DateRange,
        updated_range: DateRange,
    ) -> Self {
        Self {
            page,
            limit,
            sort_by,
            sort_order,
            tags,
            created_range,
            updated_range,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn limit(&self) -> Limit {
        self.limit
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn created_range(&self) -> DateRange {
        self.created_range
    }

    pub fn updated_range(&self) -> DateRange {
        self.updated_range
    }

    /// Rows to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> u64 {
        (self.page.value() - 1).saturating_mul(u64::from(self.limit.value()))
    }
}

/// Pagination metadata derived from a query and its total match count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: Page, limit: Limit, total: u64) -> Self {
        let total_pages = total.div_ceil(u64::from(limit.value()));
        Self {
            page: page.value(),
            limit: limit.value(),
            total,
            total_pages,
            has_next: page.value() < total_pages,
            has_prev: page.value() > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DateFilter, DocsQuery, Limit, Page, Pagination, SortBy, SortOrder};

    #[test]
    fn defaults_match_listing_contract() {
        let query = DocsQuery::default();
        assert_eq!(query.page().value(), 1);
        assert_eq!(query.limit().value(), 20);
        assert_eq!(query.sort_by(), SortBy::CreatedAt);
        assert_eq!(query.sort_order(), SortOrder::Desc);
        assert!(query.tags().is_empty());
        assert!(query.created_range().is_empty());
        assert!(query.updated_range().is_empty());
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn pagination_rounds_total_pages_up() {
        let meta = Pagination::new(Page::new(1).unwrap(), Limit::new(20).unwrap(), 41);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(!meta.has_prev);

        let empty = Pagination::new(Page::default(), Limit::default(), 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next);
    }

    #[test]
    fn date_filter_normalizes_offsets_to_utc() {
        let filter = DateFilter::parse("2024-01-01T09:00:00+09:00").unwrap();
        assert_eq!(filter.to_string(), "2024-01-01T00:00:00Z");
    }
}
