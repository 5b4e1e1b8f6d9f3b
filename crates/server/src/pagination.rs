//! Lenient parsing of `?limit=&cursor=`.
//!
//! Missing or malformed values never fail a request: they fall back to the
//! configured defaults.

use api_types::transfer::PageQuery;
use engine::Page;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationSettings {
    /// Used when `limit` is missing, malformed or not positive.
    pub default_limit: u64,
    /// Upper bound applied to every `limit`.
    pub max_limit: u64,
    /// Answer `400` instead of `200 []` when a page has no rows.
    pub empty_page_is_error: bool,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_limit: Page::DEFAULT_LIMIT,
            max_limit: 100,
            empty_page_is_error: true,
        }
    }
}

impl PaginationSettings {
    pub fn page(&self, query: &PageQuery) -> Page {
        let limit = query
            .limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(self.default_limit)
            .min(self.max_limit);
        let cursor = query
            .cursor
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(0);

        Page::new(cursor, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<&str>, cursor: Option<&str>) -> PageQuery {
        PageQuery {
            limit: limit.map(str::to_string),
            cursor: cursor.map(str::to_string),
        }
    }

    #[test]
    fn missing_values_use_defaults() {
        let page = PaginationSettings::default().page(&PageQuery::default());
        assert_eq!(page, Page::new(0, 10));
    }

    #[test]
    fn valid_values_are_kept() {
        let page = PaginationSettings::default().page(&query(Some("5"), Some("42")));
        assert_eq!(page, Page::new(42, 5));
    }

    #[test]
    fn malformed_values_fall_back() {
        let settings = PaginationSettings::default();
        assert_eq!(settings.page(&query(Some("ten"), Some("x"))), Page::new(0, 10));
        assert_eq!(settings.page(&query(Some("-3"), Some(""))), Page::new(0, 10));
        assert_eq!(settings.page(&query(Some("0"), None)), Page::new(0, 10));
    }

    #[test]
    fn limit_is_clamped() {
        let settings = PaginationSettings {
            max_limit: 20,
            ..PaginationSettings::default()
        };
        assert_eq!(settings.page(&query(Some("500"), None)), Page::new(0, 20));
    }
}
