use serde::{Deserialize, Serialize};

/// Optional `?page=&limit=` query parameters. An endpoint that supports an
/// unpaginated listing returns everything unless both are present.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }

    pub fn is_paginated(&self) -> bool {
        self.page.is_some() && self.limit.is_some()
    }
}

/// List envelope: `{ data, total, page, total_pages }`.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, page: i64, limit: i64) -> Self {
        let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };
        Self {
            data,
            total,
            page,
            total_pages,
        }
    }

    /// Envelope for an endpoint that returned everything in one page.
    pub fn all(data: Vec<T>) -> Self {
        let total = data.len() as i64;
        Self {
            data,
            total,
            page: 1,
            total_pages: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_page_one_limit_ten() {
        let p = PageParams::default();
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 0);
        assert!(!p.is_paginated());
    }

    #[test]
    fn offset_skips_previous_pages() {
        let p = PageParams {
            page: Some(3),
            limit: Some(25),
        };
        assert_eq!(p.offset(), 50);
        assert!(p.is_paginated());
    }

    #[test]
    fn one_parameter_alone_is_not_paginated() {
        let page_only = PageParams {
            page: Some(2),
            limit: None,
        };
        assert!(!page_only.is_paginated());

        let limit_only = PageParams {
            page: None,
            limit: Some(10),
        };
        assert!(!limit_only.is_paginated());
    }

    #[test]
    fn zero_and_negative_params_are_clamped() {
        let p = PageParams {
            page: Some(0),
            limit: Some(-5),
        };
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        let env = Paginated::new(vec![1, 2, 3], 31, 1, 10);
        assert_eq!(env.total_pages, 4);
        let exact = Paginated::new(vec![1], 30, 1, 10);
        assert_eq!(exact.total_pages, 3);
        let empty: Paginated<i32> = Paginated::new(vec![], 0, 1, 10);
        assert_eq!(empty.total_pages, 0);
    }
}
