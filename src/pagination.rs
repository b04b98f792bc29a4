use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

pub const DEFAULT_PAGE_SIZE: i64 = 6;

/// Query parameters shared by the list endpoints. `page` and `limit` arrive
/// as strings; anything non-numeric falls back to the defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub limit: Option<i64>,
    pub search: Option<String>,
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse::<i64>().ok()))
}

/// A validated page window. `page` is 1-based and floored to 1; a
/// non-positive `limit` is rejected rather than returning the whole
/// collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub limit: i64,
}

impl PageWindow {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, ApiError> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if limit <= 0 {
            return Err(ApiError::InvalidArgument("limit must be positive".into()));
        }
        let page = page.unwrap_or(1).max(1);
        Ok(Self { page, limit })
    }

    pub fn from_query(q: &PageQuery) -> Result<Self, ApiError> {
        Self::new(q.page, q.limit)
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    pub fn info(&self, total_count: i64) -> PageInfo {
        PageInfo {
            page: self.page,
            total_count,
            has_more: self.page * self.limit < total_count,
        }
    }
}

/// The one pagination shape every list endpoint returns.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PageInfo {
    pub page: i64,
    pub total_count: i64,
    pub has_more: bool,
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, window: PageWindow, total_count: i64) -> Self {
        Self {
            data,
            pagination: window.info(total_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent() {
        let w = PageWindow::new(None, None).unwrap();
        assert_eq!(w.page, 1);
        assert_eq!(w.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(w.offset(), 0);
    }

    #[test]
    fn page_is_floored_to_one() {
        let w = PageWindow::new(Some(0), Some(10)).unwrap();
        assert_eq!(w.page, 1);
        let w = PageWindow::new(Some(-3), Some(10)).unwrap();
        assert_eq!(w.page, 1);
    }

    #[test]
    fn non_positive_limit_is_rejected() {
        assert!(matches!(
            PageWindow::new(Some(1), Some(0)),
            Err(ApiError::InvalidArgument(_))
        ));
        assert!(matches!(
            PageWindow::new(Some(1), Some(-6)),
            Err(ApiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        let w = PageWindow::new(Some(3), Some(6)).unwrap();
        assert_eq!(w.offset(), 12);
    }

    #[test]
    fn has_more_truth_table() {
        // 13 records, 6 per page: pages 1 and 2 have more, page 3 is the last
        let w = PageWindow::new(Some(1), Some(6)).unwrap();
        assert!(w.info(13).has_more);
        let w = PageWindow::new(Some(2), Some(6)).unwrap();
        assert_eq!(w.offset(), 6);
        assert!(w.info(13).has_more);
        let w = PageWindow::new(Some(3), Some(6)).unwrap();
        assert_eq!(w.offset(), 12);
        assert!(!w.info(13).has_more);

        // exact multiple: no phantom extra page
        let w = PageWindow::new(Some(2), Some(6)).unwrap();
        assert!(!w.info(12).has_more);
    }

    #[test]
    fn empty_collection_is_not_an_error() {
        let w = PageWindow::new(Some(1), Some(6)).unwrap();
        let info = w.info(0);
        assert_eq!(info.total_count, 0);
        assert!(!info.has_more);

        let page = Page::new(Vec::<i32>::new(), w, 0);
        assert!(page.data.is_empty());
    }

    #[test]
    fn query_parsing_is_lenient() {
        // query-string values arrive as strings
        let q: PageQuery =
            serde_json::from_value(serde_json::json!({ "page": "2", "limit": "10" })).unwrap();
        assert_eq!(q.page, Some(2));
        assert_eq!(q.limit, Some(10));

        let q: PageQuery =
            serde_json::from_value(serde_json::json!({ "page": "abc", "limit": "" })).unwrap();
        assert_eq!(q.page, None);
        assert_eq!(q.limit, None);

        let q: PageQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(q.page, None);
        assert_eq!(q.limit, None);
        assert_eq!(q.search, None);
    }

    #[test]
    fn canonical_shape_serializes_flat() {
        let w = PageWindow::new(Some(2), Some(6)).unwrap();
        let page = Page::new(vec!["a", "b"], w, 13);
        let v = serde_json::to_value(&page).unwrap();
        assert_eq!(v["pagination"]["page"], 2);
        assert_eq!(v["pagination"]["total_count"], 13);
        assert_eq!(v["pagination"]["has_more"], true);
        assert_eq!(v["data"].as_array().unwrap().len(), 2);
    }
}
