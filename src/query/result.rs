//! Paging types shared by the executor and backends

use serde::{Deserialize, Serialize};

use super::spec::{QuerySpec, SortDirection};

/// Paging and sort parameters passed to every backend operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page index
    pub page: u64,
    /// Page size
    pub items_per_page: u64,
    /// Sort field; empty means the backend default
    pub sort_by: String,
    /// Sort direction
    pub sort_direction: SortDirection,
}

impl PageRequest {
    pub fn new(
        page: u64,
        items_per_page: u64,
        sort_by: impl Into<String>,
        sort_direction: SortDirection,
    ) -> Self {
        Self {
            page,
            items_per_page,
            sort_by: sort_by.into(),
            sort_direction,
        }
    }

    /// Zero-based offset of the first item on this page
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.items_per_page)
    }
}

impl From<&QuerySpec> for PageRequest {
    fn from(spec: &QuerySpec) -> Self {
        Self::new(
            spec.page,
            spec.items_per_page,
            spec.sort_by.clone(),
            spec.sort_direction,
        )
    }
}

/// One page of results plus the totals needed to page through the rest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage<T> {
    /// Items on this page, in result order
    pub items: Vec<T>,
    /// 1-based page index
    pub current_page: u64,
    /// Page size the page was cut with
    pub items_per_page: u64,
    /// Number of items matched across all pages
    pub total_items: u64,
}

impl<T> ResultPage<T> {
    pub fn new(items: Vec<T>, current_page: u64, items_per_page: u64, total_items: u64) -> Self {
        Self {
            items,
            current_page,
            items_per_page,
            total_items,
        }
    }

    /// Creates a page with no items and no matches
    pub fn empty(current_page: u64, items_per_page: u64) -> Self {
        Self::new(Vec::new(), current_page, items_per_page, 0)
    }

    /// Cuts page `request.page` out of the full ordered result set
    pub fn from_sorted(all: Vec<T>, request: &PageRequest) -> Self {
        let total_items = all.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(request.items_per_page).unwrap_or(usize::MAX);

        let items = all.into_iter().skip(offset).take(take).collect();

        Self::new(items, request.page, request.items_per_page, total_items)
    }

    /// Number of pages needed to show `total_items`
    pub fn total_pages(&self) -> u64 {
        if self.items_per_page == 0 {
            return 0;
        }
        self.total_items.div_ceil(self.items_per_page)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Returns true if this page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Converts every item, keeping the paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ResultPage<U> {
        ResultPage {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            items_per_page: self.items_per_page,
            total_items: self.total_items,
        }
    }
}

impl<T> IntoIterator for ResultPage<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
