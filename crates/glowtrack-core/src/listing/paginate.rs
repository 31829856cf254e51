//! Paginate stage.
//!
//! A page past the end yields an empty slice; it is the navigation helpers
//! and `has_next`/`has_previous` that keep the controls in range.

use serde::Serialize;

/// Choices offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 20, 50, 100];

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page buttons shown before ellipses are introduced.
const MAX_PAGE_BUTTONS: u32 = 5;

/// Pagination facts for rendering "showing X–Y of Z" and the page controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// 1-based
    pub page: u32,
    pub page_size: u32,
    pub total_items: usize,
    /// 0 when nothing matched
    pub total_pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
    /// 1-based inclusive bounds of the visible items, if any are visible.
    pub displayed_range: Option<(usize, usize)>,
}

impl PageInfo {
    /// The controls are hidden when everything fits on one page.
    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }

    pub fn is_out_of_range(&self) -> bool {
        self.total_items > 0 && self.page > self.total_pages
    }
}

/// `ceil(total / page_size)`, and 0 for a zero page size.
pub fn total_pages(total: usize, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total.div_ceil(page_size as usize);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Slice `items[(page-1)*size .. page*size]`, never out of bounds.
pub fn paginate<T>(items: &[T], page: u32, page_size: u32) -> (&[T], PageInfo) {
    let page = page.max(1);
    let total = items.len();
    let pages = total_pages(total, page_size);

    let start = (page as usize - 1).saturating_mul(page_size as usize);
    let slice = if page_size == 0 || start >= total {
        &items[..0]
    } else {
        let end = start.saturating_add(page_size as usize).min(total);
        &items[start..end]
    };

    let displayed_range = if slice.is_empty() {
        None
    } else {
        Some((start + 1, start + slice.len()))
    };

    let info = PageInfo {
        page,
        page_size,
        total_items: total,
        total_pages: pages,
        has_previous: page > 1,
        has_next: page < pages,
        displayed_range,
    };
    (slice, info)
}

/// One button in the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageMarker {
    Page(u32),
    Ellipsis,
}

/// Page-number buttons around `current`, with ellipses for long ranges.
pub fn page_window(current: u32, total: u32) -> Vec<PageMarker> {
    use PageMarker::{Ellipsis, Page};

    if total <= MAX_PAGE_BUTTONS {
        return (1..=total).map(Page).collect();
    }

    let mut window = Vec::with_capacity(7);
    if current <= 3 {
        window.extend((1..=4).map(Page));
        window.push(Ellipsis);
        window.push(Page(total));
    } else if current >= total - 2 {
        window.push(Page(1));
        window.push(Ellipsis);
        window.extend((total - 3..=total).map(Page));
    } else {
        window.push(Page(1));
        window.push(Ellipsis);
        window.extend((current - 1..=current + 1).map(Page));
        window.push(Ellipsis);
        window.push(Page(total));
    }
    window
}
