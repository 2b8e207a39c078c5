//! Canonical pagination types and response-shape normalization.
//!
//! The backend is inconsistent about list responses: some endpoints return a
//! paginated envelope (`{data, total, totalPages}`), older ones return the
//! whole collection as a bare array, and a misconfigured endpoint may return
//! something else entirely. Everything is normalized into [`Page`] right
//! here, at the transport boundary, so no caller ever sees the union.

use serde::Deserialize;

/// One page of a server-side paginated collection.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items on this page. Never longer than the requested page size.
    pub items: Vec<T>,
    /// 1-based page number.
    pub number: u32,
    /// Total number of pages in the collection.
    pub total_pages: u32,
    /// Total number of items in the collection.
    pub total_items: u64,
}

impl<T> Page<T> {
    /// An empty page, used when the response shape is unrecognizable.
    #[must_use]
    pub const fn empty(number: u32) -> Self {
        Self {
            items: Vec::new(),
            number,
            total_pages: 1,
            total_items: 0,
        }
    }

    /// Number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if this page carries no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if no pages follow this one.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.number >= self.total_pages
    }
}

/// Contract for fetching one page of a paginated collection.
///
/// Implementations wrap one endpoint (plus any fixed filter parameters) and
/// always hand back the canonical [`Page`]; the loader and the template
/// library are written against this trait so tests can substitute stubs.
pub trait PageFetcher<T> {
    /// Fetches the given 1-based page with the given page size.
    fn fetch_page(
        &self,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = crate::Result<Page<T>>>;
}

/// The raw shapes a list endpoint may answer with.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawPage<T> {
    /// Paginated envelope.
    Envelope {
        data: Vec<T>,
        #[serde(default)]
        total: Option<u64>,
        #[serde(rename = "totalPages", default)]
        total_pages: Option<u32>,
    },
    /// The complete, unpaginated collection.
    Bare(Vec<T>),
    /// Anything else.
    Other(serde_json::Value),
}

impl<T> RawPage<T> {
    /// Normalizes into a canonical [`Page`] for the requested page number.
    ///
    /// Bare arrays are treated as the complete collection and sliced
    /// client-side; a request past the end yields an empty page with the
    /// totals intact. Unrecognized shapes become the canonical empty page.
    #[allow(clippy::cast_possible_truncation)] // page counts fit in u32
    pub(crate) fn into_page(self, number: u32, page_size: u32) -> Page<T> {
        match self {
            Self::Envelope {
                data,
                total,
                total_pages,
            } => Page {
                items: data,
                number,
                total_pages: total_pages.unwrap_or(1),
                total_items: total.unwrap_or(0),
            },
            Self::Bare(all) => {
                let size = page_size.max(1) as usize;
                let total_items = all.len() as u64;
                let total_pages = all.len().div_ceil(size).max(1) as u32;
                let start = number.saturating_sub(1) as usize * size;
                let items = if start < all.len() {
                    let mut all = all;
                    all.drain(..start);
                    all.truncate(size);
                    all
                } else {
                    Vec::new()
                };
                Page {
                    items,
                    number,
                    total_pages,
                    total_items,
                }
            }
            Self::Other(value) => {
                tracing::warn!(?value, "unrecognized list response shape");
                Page::empty(number)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawPage<u32> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_envelope_passes_through() {
        let page = raw(json!({"data": [1, 2, 3], "total": 30, "totalPages": 10}))
            .into_page(2, 3);
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.number, 2);
        assert_eq!(page.total_pages, 10);
        assert_eq!(page.total_items, 30);
        assert!(!page.is_last());
    }

    #[test]
    fn test_envelope_defaults_for_missing_totals() {
        let page = raw(json!({"data": [7]})).into_page(1, 10);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_items, 0);
    }

    #[test]
    fn test_bare_array_sliced_client_side() {
        // 25 items, page size 10: page 3 holds the trailing 5.
        let all: Vec<u32> = (0..25).collect();
        let page = raw(json!(all)).into_page(3, 10);
        assert_eq!(page.items, (20..25).collect::<Vec<u32>>());
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 25);
        assert!(page.is_last());
    }

    #[test]
    fn test_bare_array_page_math_holds_for_various_sizes() {
        for (len, size) in [(0usize, 5u32), (1, 5), (5, 5), (6, 5), (99, 10), (100, 10)] {
            let all: Vec<u32> = (0..len as u32).collect();
            let expected_pages = len.div_ceil(size as usize).max(1) as u32;

            let mut seen = 0usize;
            for number in 1..=expected_pages {
                let page = raw(json!(all.clone())).into_page(number, size);
                assert_eq!(page.total_pages, expected_pages);
                assert!(page.len() <= size as usize);
                if number == expected_pages && len > 0 {
                    let expected_last = len - size as usize * (expected_pages as usize - 1);
                    assert_eq!(page.len(), expected_last);
                }
                seen += page.len();
            }
            assert_eq!(seen, len);
        }
    }

    #[test]
    fn test_bare_array_request_past_end_is_empty() {
        let page = raw(json!([1, 2, 3])).into_page(5, 10);
        assert!(page.is_empty());
        assert_eq!(page.total_items, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_unrecognized_shape_becomes_empty_page() {
        let page = raw(json!({"status": "ok"})).into_page(1, 10);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_items, 0);
    }
}
