/// Pagination over the category catalog
///
/// Page indices are 1-based. Out-of-range pages are empty rather than errors,
/// and navigation clamps at both ends.

use crate::config::ShellConfig;
use crate::error::PaginationError;
use std::fmt;

/// One entry of the page control bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Page(usize),
    /// Inert marker shown when pages exist beyond the numbered buttons
    Ellipsis,
}

impl fmt::Display for PageControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageControl::Page(n) => write!(f, "{}", n),
            PageControl::Ellipsis => f.write_str("..."),
        }
    }
}

/// Items on page `page_index` (1-based). Empty for page 0 and pages past the end.
pub fn page<T>(items: &[T], page_index: usize, page_size: usize) -> &[T] {
    if page_index == 0 || page_size == 0 {
        return &[];
    }
    let start = (page_index - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

pub fn page_count(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Page buttons `1..=min(max_buttons, page_count)`, then an ellipsis if pages remain
pub fn control_sequence(page_count: usize, max_buttons: usize) -> Vec<PageControl> {
    let mut controls: Vec<PageControl> = (1..=page_count.min(max_buttons))
        .map(PageControl::Page)
        .collect();
    if page_count > max_buttons {
        controls.push(PageControl::Ellipsis);
    }
    controls
}

pub fn previous_page(page_index: usize) -> usize {
    page_index.saturating_sub(1).max(1)
}

pub fn next_page(page_index: usize, page_count: usize) -> usize {
    page_index.saturating_add(1).min(page_count).max(1)
}

/// Current page plus the bounds derived from the catalog size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_index: usize,
    page_size: usize,
    max_buttons: usize,
    page_count: usize,
}

impl Paginator {
    /// Start on `config.initial_page`, clamped into the available pages
    pub fn new(config: &ShellConfig, total_items: usize) -> Self {
        let mut paginator = Paginator {
            page_index: config.initial_page,
            page_size: config.page_size,
            max_buttons: config.max_page_buttons,
            page_count: 0,
        };
        paginator.set_total(total_items);
        paginator
    }

    /// Recompute bounds after the item count changed
    pub fn set_total(&mut self, total_items: usize) {
        self.page_count = page_count(total_items, self.page_size);
        self.page_index = self.page_index.clamp(1, self.page_count.max(1));
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn is_first(&self) -> bool {
        self.page_index <= 1
    }

    pub fn is_last(&self) -> bool {
        self.page_index >= self.page_count
    }

    pub fn first(&mut self) -> usize {
        self.page_index = 1;
        self.page_index
    }

    pub fn prev(&mut self) -> usize {
        self.page_index = previous_page(self.page_index);
        self.page_index
    }

    pub fn next(&mut self) -> usize {
        self.page_index = next_page(self.page_index, self.page_count);
        self.page_index
    }

    pub fn last(&mut self) -> usize {
        self.page_index = self.page_count.max(1);
        self.page_index
    }

    /// Go to page `k`; only pages with a button in `controls()` are reachable
    pub fn jump(&mut self, k: usize) -> Result<usize, PaginationError> {
        if !self.controls().contains(&PageControl::Page(k)) {
            return Err(PaginationError::PageNotOffered(k));
        }
        self.page_index = k;
        Ok(k)
    }

    pub fn controls(&self) -> Vec<PageControl> {
        control_sequence(self.page_count, self.max_buttons)
    }

    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        page(items, self.page_index, self.page_size)
    }
}
