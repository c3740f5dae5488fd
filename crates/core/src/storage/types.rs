/// Page size used when a list request does not carry `limit`.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// An offset/limit window over the live items, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Number of live items to skip.
    pub since: u64,
    /// Maximum number of items to return.
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

impl Page {
    pub fn new(since: u64, limit: u32) -> Self {
        Self { since, limit }
    }

    /// Offset as a SQL bind value. Offsets past `i64::MAX` saturate.
    pub fn offset_i64(&self) -> i64 {
        i64::try_from(self.since).unwrap_or(i64::MAX)
    }

    /// Limit as a SQL bind value.
    pub fn limit_i64(&self) -> i64 {
        i64::from(self.limit)
    }

    /// Applies the window to an already ordered sequence.
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let skip = usize::try_from(self.since).unwrap_or(usize::MAX);
        let take = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(take).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page() {
        let page = Page::default();
        assert_eq!(page.since, 0);
        assert_eq!(page.limit, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_slice_from_start() {
        let page = Page::new(0, 3);
        assert_eq!(page.slice(1..=10), vec![1, 2, 3]);
    }

    #[test]
    fn test_slice_skips_since() {
        let page = Page::new(4, 3);
        assert_eq!(page.slice(1..=10), vec![5, 6, 7]);
    }

    #[test]
    fn test_slice_past_end_is_empty() {
        let page = Page::new(20, 5);
        assert!(page.slice(1..=10).is_empty());
    }

    #[test]
    fn test_slice_zero_limit_is_empty() {
        let page = Page::new(0, 0);
        assert!(page.slice(1..=10).is_empty());
    }

    #[test]
    fn test_slice_short_tail() {
        let page = Page::new(8, 5);
        assert_eq!(page.slice(1..=10), vec![9, 10]);
    }

    #[test]
    fn test_offset_saturates() {
        let page = Page::new(u64::MAX, 1);
        assert_eq!(page.offset_i64(), i64::MAX);
        assert_eq!(page.limit_i64(), 1);
    }
}
