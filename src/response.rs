use axum::{response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

#[allow(dead_code)]
impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message),
        }
    }

    pub fn err(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
            data: None,
        }
    }
}

/// Sentinel emitted by [`page_markers`] where a run of pages is elided.
/// Rendered as an ellipsis by clients, never navigable.
pub const PAGE_GAP: i64 = -1;

/// Pagination envelope attached to every list response.
#[derive(Debug, Serialize, ToSchema)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            (total + limit - 1) / limit
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }

    /// Page-number markers for a pager control on the current envelope.
    pub fn page_markers(&self) -> Vec<i64> {
        page_markers(self.page, self.total_pages)
    }
}

/// Compute the sequence of page numbers a pager should render.
///
/// Seven or fewer pages are listed in full. Beyond that the window keeps
/// the first and last page visible and elides the rest with [`PAGE_GAP`]:
/// near the start the first five pages are shown, near the end the last
/// five, otherwise the three pages centered on `current`.
pub fn page_markers(current: u64, total_pages: u64) -> Vec<i64> {
    let total = total_pages as i64;
    let current = current as i64;

    if total <= 7 {
        return (1..=total).collect();
    }

    let mut pages = Vec::with_capacity(9);
    if current <= 3 {
        pages.extend(1..=5);
        pages.push(PAGE_GAP);
        pages.push(total);
    } else if current >= total - 2 {
        pages.push(1);
        pages.push(PAGE_GAP);
        pages.extend(total - 4..=total);
    } else {
        pages.push(1);
        pages.push(PAGE_GAP);
        pages.extend(current - 1..=current + 1);
        pages.push(PAGE_GAP);
        pages.push(total);
    }
    pages
}

const DEFAULT_PAGE_SIZE: u64 = 10;
const MAX_PAGE_SIZE: u64 = 100;

/// Caller-supplied `?page=&limit=` query parameters.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageQuery {
    /// Resolve to a concrete `(page, limit)`, clamping `page` to at least 1
    /// and `limit` to 1..=100 so unbounded query parameters cannot request
    /// arbitrarily large pages.
    pub fn resolve(&self) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        (page, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_basic() {
        let p = Pagination::new(1, 20, 100);
        assert_eq!(p.total_pages, 5);
    }

    #[test]
    fn total_pages_with_remainder() {
        let p = Pagination::new(1, 20, 101);
        assert_eq!(p.total_pages, 6);
    }

    #[test]
    fn total_pages_exact_division() {
        let p = Pagination::new(1, 20, 60);
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn total_pages_zero_total() {
        let p = Pagination::new(1, 20, 0);
        assert_eq!(p.total_pages, 0);
    }

    #[test]
    fn total_pages_single_item() {
        let p = Pagination::new(1, 20, 1);
        assert_eq!(p.total_pages, 1);
    }

    #[test]
    fn markers_small_total_listed_in_full() {
        assert_eq!(page_markers(1, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_markers(4, 7), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn markers_near_start() {
        assert_eq!(page_markers(1, 10), vec![1, 2, 3, 4, 5, PAGE_GAP, 10]);
        assert_eq!(page_markers(3, 10), vec![1, 2, 3, 4, 5, PAGE_GAP, 10]);
    }

    #[test]
    fn markers_near_end() {
        assert_eq!(page_markers(10, 10), vec![1, PAGE_GAP, 6, 7, 8, 9, 10]);
        assert_eq!(page_markers(8, 10), vec![1, PAGE_GAP, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn markers_middle_window() {
        assert_eq!(
            page_markers(5, 10),
            vec![1, PAGE_GAP, 4, 5, 6, PAGE_GAP, 10]
        );
        assert_eq!(
            page_markers(50, 100),
            vec![1, PAGE_GAP, 49, 50, 51, PAGE_GAP, 100]
        );
    }

    #[test]
    fn markers_zero_pages() {
        assert!(page_markers(1, 0).is_empty());
    }

    #[test]
    fn page_query_defaults() {
        let q = PageQuery::default();
        assert_eq!(q.resolve(), (1, 10));
    }

    #[test]
    fn page_query_clamps_limit() {
        let q = PageQuery {
            page: Some(0),
            limit: Some(10_000),
        };
        assert_eq!(q.resolve(), (1, 100));

        let q = PageQuery {
            page: Some(3),
            limit: Some(0),
        };
        assert_eq!(q.resolve(), (3, 1));
    }
}
