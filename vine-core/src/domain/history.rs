//! Job history types: the page returned by the service and the filter that
//! selects it

use serde::{Deserialize, Serialize};

use crate::domain::execution::JobExecution;
use crate::validation::{self, ValidationError};

/// Default number of executions per page
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Smallest accepted page size
pub const MIN_PAGE_SIZE: i64 = 1;

/// Largest accepted page size
pub const MAX_PAGE_SIZE: i64 = 100;

/// One page of past job executions, most recent first
///
/// The service may legally return an empty page for an out-of-range request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "HistoryPageWire")]
pub struct HistoryPage {
    pub items: Vec<JobExecution>,
    pub page: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl HistoryPage {
    /// Builds a page, deriving `total_pages` from the element count
    pub fn new(items: Vec<JobExecution>, page: u32, page_size: u32, total_elements: u64) -> Self {
        Self {
            items,
            page,
            page_size,
            total_elements,
            total_pages: total_pages(total_elements, page_size),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `page` addresses an existing page of results
    pub fn is_in_range(&self) -> bool {
        self.page < self.total_pages
    }
}

/// `ceil(total_elements / page_size)`, zero for a zero page size
pub fn total_pages(total_elements: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total_elements.div_ceil(page_size as u64) as u32
}

/// Accepts both the documented page shape and the service's
/// `{executions, totalCount, page, size}` response
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryPageWire {
    #[serde(default, alias = "executions", alias = "jobs")]
    items: Vec<JobExecution>,
    #[serde(default)]
    page: u32,
    #[serde(default, alias = "size")]
    page_size: u32,
    #[serde(default, alias = "totalCount")]
    total_elements: u64,
    #[serde(default)]
    total_pages: Option<u32>,
}

impl From<HistoryPageWire> for HistoryPage {
    fn from(wire: HistoryPageWire) -> Self {
        let total_pages = wire
            .total_pages
            .unwrap_or_else(|| total_pages(wire.total_elements, wire.page_size));

        Self {
            items: wire.items,
            page: wire.page,
            page_size: wire.page_size,
            total_elements: wire.total_elements,
            total_pages,
        }
    }
}

/// Selection of the history slice to display
///
/// Fields hold raw presentation input and are checked by [`HistoryFilter::validate`]
/// before any request is issued. Changing the days window always resets the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryFilter {
    pub page: i64,
    pub page_size: i64,
    pub days_window: Option<i64>,
}

impl HistoryFilter {
    pub fn new(page: i64, page_size: i64, days_window: Option<i64>) -> Self {
        Self {
            page,
            page_size,
            days_window,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_history_filter(self)
    }

    /// Same filter on another page
    pub fn with_page(self, page: i64) -> Self {
        Self { page, ..self }
    }

    /// Same window with another page size, back on the first page
    pub fn with_page_size(self, page_size: i64) -> Self {
        Self {
            page: 0,
            page_size,
            ..self
        }
    }

    /// Another days window, back on the first page
    pub fn with_days_window(self, days_window: Option<i64>) -> Self {
        Self {
            page: 0,
            days_window,
            ..self
        }
    }

    pub fn first_page(self) -> Self {
        self.with_page(0)
    }

    pub fn next_page(self) -> Self {
        self.with_page(self.page.saturating_add(1))
    }

    pub fn previous_page(self) -> Self {
        self.with_page(self.page.saturating_sub(1).max(0))
    }
}

impl Default for HistoryFilter {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(45, 20), 3);
        assert_eq!(total_pages(40, 20), 2);
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 100), 1);
        assert_eq!(total_pages(10, 0), 0);
    }

    #[test]
    fn test_page_from_service_shape() {
        let page: HistoryPage = serde_json::from_value(json!({
            "executions": [{
                "id": 3,
                "startTime": "2024-05-01T10:00:00",
                "status": "COMPLETED"
            }],
            "totalCount": 45,
            "page": 0,
            "size": 20
        }))
        .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.page_size, 20);
        assert_eq!(page.total_elements, 45);
        assert_eq!(page.total_pages, 3);
        assert!(page.is_in_range());
    }

    #[test]
    fn test_page_keeps_reported_total_pages() {
        let page: HistoryPage = serde_json::from_value(json!({
            "items": [],
            "page": 3,
            "pageSize": 20,
            "totalElements": 45,
            "totalPages": 3
        }))
        .unwrap();

        assert!(page.is_empty());
        assert_eq!(page.total_pages, 3);
        assert!(!page.is_in_range());
    }

    #[test]
    fn test_days_window_resets_page() {
        let filter = HistoryFilter::new(4, 50, None);

        let changed = filter.with_days_window(Some(7));
        assert_eq!(changed.page, 0);
        assert_eq!(changed.page_size, 50);
        assert_eq!(changed.days_window, Some(7));

        let cleared = HistoryFilter::new(2, 20, Some(7)).with_days_window(None);
        assert_eq!(cleared.page, 0);
        assert_eq!(cleared.days_window, None);

        let same_window = HistoryFilter::new(9, 20, Some(7)).with_days_window(Some(7));
        assert_eq!(same_window.page, 0);
    }

    #[test]
    fn test_page_navigation() {
        let filter = HistoryFilter::default();
        assert_eq!(filter.previous_page().page, 0);
        assert_eq!(filter.next_page().page, 1);
        assert_eq!(filter.next_page().next_page().previous_page().page, 1);
        assert_eq!(HistoryFilter::new(5, 20, None).with_page_size(10).page, 0);
    }
}
