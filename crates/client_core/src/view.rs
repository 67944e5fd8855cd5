//! Derived views of the address collection: search and pagination.

use std::ops::RangeInclusive;

use regex::{Regex, RegexBuilder};
use shared::domain::Address;

/// Compiled free-text search over full names and spouses.
///
/// The query is tried as a case-insensitive regular expression; input that
/// does not compile, or compiles too large, is matched as a literal
/// substring instead.
#[derive(Debug, Clone)]
pub struct NameQuery {
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    Everything,
    Pattern(Regex),
    Literal(String),
}

impl NameQuery {
    pub fn new(query: &str) -> Self {
        if query.trim().is_empty() {
            return Self {
                matcher: Matcher::Everything,
            };
        }
        let matcher = RegexBuilder::new(query)
            .case_insensitive(true)
            .build()
            .or_else(|_| {
                RegexBuilder::new(&regex::escape(query))
                    .case_insensitive(true)
                    .build()
            })
            .map(Matcher::Pattern)
            .unwrap_or_else(|_| Matcher::Literal(query.to_lowercase()));
        Self { matcher }
    }

    pub fn matches(&self, address: &Address) -> bool {
        match &self.matcher {
            Matcher::Everything => true,
            Matcher::Pattern(pattern) => {
                pattern.is_match(&address.full_name()) || pattern.is_match(&address.spouse)
            }
            Matcher::Literal(needle) => {
                address.full_name().to_lowercase().contains(needle.as_str())
                    || address.spouse.to_lowercase().contains(needle.as_str())
            }
        }
    }
}

pub fn filter_addresses<'a>(addresses: &'a [Address], query: &str) -> Vec<&'a Address> {
    let query = NameQuery::new(query);
    addresses.iter().filter(|a| query.matches(a)).collect()
}

pub fn page_count(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// Items of the 1-based `page`. Pages past the end are empty.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.max(1).saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    current_page: usize,
    page_size: usize,
    max_visible_pages: usize,
    total_items: usize,
    page_count: usize,
}

impl Pager {
    pub fn new(page_size: usize, max_visible_pages: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            max_visible_pages: max_visible_pages.max(1),
            total_items: 0,
            page_count: 0,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Recomputes the counters for a new item count. The current page is
    /// pulled back when it no longer exists.
    pub fn recompute(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.page_count = page_count(total_items, self.page_size);
        self.current_page = self.current_page.clamp(1, self.page_count.max(1));
    }

    /// Returns false and stays put when `page` is out of range.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.page_count.max(1) {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn next(&mut self) -> bool {
        self.set_page(self.current_page + 1)
    }

    pub fn previous(&mut self) -> bool {
        self.current_page > 1 && self.set_page(self.current_page - 1)
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Page links to show, at most `max_visible_pages`, kept roughly centred
    /// on the current page.
    pub fn visible_pages(&self) -> RangeInclusive<usize> {
        if self.page_count == 0 {
            return 1..=0;
        }
        if self.page_count <= self.max_visible_pages {
            return 1..=self.page_count;
        }
        let half = self.max_visible_pages / 2;
        let mut start = self.current_page.saturating_sub(half).max(1);
        let mut end = start + self.max_visible_pages - 1;
        if end > self.page_count {
            end = self.page_count;
            start = end + 1 - self.max_visible_pages;
        }
        start..=end
    }
}
