//! Date-range pagination
//!
//! Splits an inclusive `[start, end]` date range into fixed-size windows.
//! Windows are derived arithmetically from the page index, so any page can be
//! recomputed without replaying earlier ones.

use chrono::{Days, NaiveDate};
use std::fmt;
use std::num::NonZeroU32;

/// Days per page requested from the stats API
pub const PAGE_SIZE_DAYS: NonZeroU32 = match NonZeroU32::new(20) {
    Some(n) => n,
    None => unreachable!(),
};

/// Inclusive date sub-range for one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PageWindow {
    /// Number of calendar days covered, counting both ends
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for PageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Page arithmetic over a fixed date range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangePaginator {
    start: NaiveDate,
    end: NaiveDate,
    page_size: NonZeroU32,
    total_pages: u32,
}

impl DateRangePaginator {
    /// Paginate `[start, end]` with the default page size
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self::with_page_size(start, end, PAGE_SIZE_DAYS)
    }

    /// Paginate `[start, end]` with `page_size` days per page
    ///
    /// The page count is fixed here. A reversed range yields zero pages.
    pub fn with_page_size(start: NaiveDate, end: NaiveDate, page_size: NonZeroU32) -> Self {
        let span_days = (end - start).num_days() + 1;
        let total_pages = if span_days <= 0 {
            0
        } else {
            let pages = (span_days as u64).div_ceil(u64::from(page_size.get()));
            u32::try_from(pages).unwrap_or(u32::MAX)
        };

        Self {
            start,
            end,
            page_size,
            total_pages,
        }
    }

    /// Number of pages covering the range
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Days per page
    pub fn page_size(&self) -> NonZeroU32 {
        self.page_size
    }

    /// Window for a 0-based page index
    ///
    /// `page_index` must be below [`total_pages`](Self::total_pages); the
    /// caller's cursor guarantees this.
    pub fn window_for(&self, page_index: u32) -> PageWindow {
        debug_assert!(page_index < self.total_pages, "page index out of range");

        let size = u64::from(self.page_size.get());
        let start = self
            .start
            .checked_add_days(Days::new(u64::from(page_index) * size))
            .unwrap_or(NaiveDate::MAX);
        let tentative_end = start
            .checked_add_days(Days::new(size - 1))
            .unwrap_or(NaiveDate::MAX);

        PageWindow {
            start,
            end: tentative_end.min(self.end),
        }
    }

    /// Every window in page order
    pub fn windows(&self) -> impl Iterator<Item = PageWindow> + '_ {
        (0..self.total_pages).map(|index| self.window_for(index))
    }
}
