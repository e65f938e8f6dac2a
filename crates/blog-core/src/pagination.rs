//! Page windows over ordered result sets.
//!
//! Pages are 1-based. An empty result set still has one (empty) page, and a
//! request past the last page is an error rather than an empty page.

use serde::Serialize;

use crate::error::{DomainError, RepoError};

/// The requested page does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct InvalidPage(pub String);

impl From<InvalidPage> for DomainError {
    fn from(e: InvalidPage) -> Self {
        DomainError::InvalidPage(e.0)
    }
}

impl From<InvalidPage> for RepoError {
    fn from(e: InvalidPage) -> Self {
        RepoError::InvalidPage(e.0)
    }
}

/// A requested page, as parsed from the `page` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    Number(u64),
    Last,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest::Number(1)
    }
}

impl PageRequest {
    /// Parse the raw `page` parameter. Missing means the first page.
    pub fn parse(raw: Option<&str>) -> Result<Self, InvalidPage> {
        match raw.map(str::trim) {
            None | Some("") => Ok(PageRequest::Number(1)),
            Some("last") => Ok(PageRequest::Last),
            Some(value) => match value.parse::<u64>() {
                Ok(n) if n >= 1 => Ok(PageRequest::Number(n)),
                Ok(_) => Err(InvalidPage(
                    "That page number is less than 1".to_string(),
                )),
                Err(_) => Err(InvalidPage(
                    "That page number is not an integer".to_string(),
                )),
            },
        }
    }

    /// Resolve against a total count, returning the 1-based page number.
    pub fn resolve(self, total: u64, per_page: u64) -> Result<u64, InvalidPage> {
        let num_pages = num_pages(total, per_page);
        match self {
            PageRequest::Last => Ok(num_pages),
            PageRequest::Number(n) if n <= num_pages => Ok(n),
            PageRequest::Number(_) => Err(InvalidPage(
                "That page contains no results".to_string(),
            )),
        }
    }
}

/// Number of pages for `total` items, never less than one.
pub fn num_pages(total: u64, per_page: u64) -> u64 {
    let per_page = per_page.max(1);
    total.div_ceil(per_page).max(1)
}

/// One page of results.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub total: u64,
    pub per_page: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, number: u64, total: u64, per_page: u64) -> Self {
        Self {
            items,
            number,
            num_pages: num_pages(total, per_page),
            total,
            per_page,
        }
    }

    /// Slice an already ordered, fully loaded list.
    pub fn from_vec(all: Vec<T>, request: PageRequest, per_page: u64) -> Result<Self, InvalidPage> {
        let total = all.len() as u64;
        let number = request.resolve(total, per_page)?;
        let items = all
            .into_iter()
            .skip(((number - 1) * per_page) as usize)
            .take(per_page as usize)
            .collect();
        Ok(Self::new(items, number, total, per_page))
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn next_page_number(&self) -> Option<u64> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<u64> {
        self.has_previous().then(|| self.number - 1)
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            total: self.total,
            per_page: self.per_page,
        }
    }
}
