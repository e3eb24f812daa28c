//! Session view state: quick-search, sort and page cursor

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::ViewError;
use crate::schema::FieldKey;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: FieldKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: FieldKey) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: FieldKey) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
        }
    }
}

/// Rows per page, always positive.
///
/// The page-size selector offers only [`PageSize::OFFERED`]; `TryFrom<usize>`
/// enforces that set. [`PageSize::new`] accepts any positive count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    pub const TEN: PageSize = PageSize(10);
    pub const TWENTY: PageSize = PageSize(20);
    pub const FIFTY: PageSize = PageSize(50);
    pub const HUNDRED: PageSize = PageSize(100);

    /// Sizes offered by the page-size selector
    pub const OFFERED: [PageSize; 4] = [
        PageSize::TEN,
        PageSize::TWENTY,
        PageSize::FIFTY,
        PageSize::HUNDRED,
    ];

    /// Any positive row count
    pub fn new(rows: usize) -> Option<Self> {
        (rows > 0).then_some(PageSize(rows))
    }

    /// Rows per page
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::TWENTY
    }
}

impl TryFrom<usize> for PageSize {
    type Error = ViewError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::OFFERED
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or(ViewError::InvalidPageSize(value))
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> usize {
        size.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Quick-search string, sort and page cursor of one session.
///
/// Defaults: no search, no sort (collection order), page 0, 20 rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub search: String,
    pub sort: Option<SortSpec>,
    pub page_index: usize,
    pub page_size: PageSize,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }
}
