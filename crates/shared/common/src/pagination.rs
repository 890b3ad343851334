//! Pagination metadata for list endpoints.

use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Pagination metadata derived from the requested page, the requested limit
/// and the total number of matching rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: u64,
    pub per_page: u64,
    pub page_count: u64,
    pub total_count: u64,
}

impl PageMeta {
    /// Normalize the caller's inputs.
    ///
    /// A zero `limit` falls back to `default_limit`, a zero `page` means the
    /// first page and a page past the end is clamped to the last page.
    /// Negative inputs cannot be normalized and are rejected.
    pub fn new(page: i64, limit: i64, total_count: u64, default_limit: u64) -> AppResult<Self> {
        if page < 0 {
            return Err(AppError::validation("page must not be negative"));
        }
        if limit < 0 {
            return Err(AppError::validation("limit must not be negative"));
        }
        if default_limit == 0 {
            return Err(AppError::internal("default page limit must be positive"));
        }

        let per_page = if limit == 0 { default_limit } else { limit as u64 };
        let page_count = total_count.div_ceil(per_page);
        let page = (page as u64).min(page_count).max(1);

        Ok(Self {
            page,
            per_page,
            page_count,
            total_count,
        })
    }

    /// Rows to skip for the current page
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.per_page
    }

    /// Effective page size
    pub fn limit(&self) -> u64 {
        self.per_page
    }
}
