//! Pagination and free-text search helpers.

/// Default page size for update listings.
pub const DEFAULT_PAGE_SIZE: i64 = 20;
/// Largest page size a caller may request for update listings.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a user-provided limit to `[1, max]`, defaulting when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// A resolved page request: 1-based page number and a clamped page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Normalize raw query values: `page >= 1`, `page_size` in `[1, 100]`.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: clamp_limit(page_size, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        }
    }

    /// Row offset for SQL `OFFSET`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Escape `%`, `_` and `\` so user text matches literally inside `ILIKE`.
pub fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for ch in query.trim().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, 5, 20), 5);
    }

    #[test]
    fn clamp_limit_respects_bounds() {
        assert_eq!(clamp_limit(Some(200), 5, 20), 20);
        assert_eq!(clamp_limit(Some(0), 5, 20), 1);
        assert_eq!(clamp_limit(Some(-3), 5, 20), 1);
        assert_eq!(clamp_limit(Some(7), 5, 20), 7);
    }

    #[test]
    fn page_request_defaults() {
        let page = PageRequest::default();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 20);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn page_request_clamps_inputs() {
        let page = PageRequest::new(Some(0), Some(500));
        assert_eq!(page, PageRequest { page: 1, page_size: 100 });

        let page = PageRequest::new(Some(3), Some(10));
        assert_eq!(page.offset(), 20);
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(" ali "), "%ali%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
