//! Admin list filtering: date filters, date hierarchy and search terms.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::{Comment, Post, PostStatus};

/// Page size of admin change lists.
pub const ADMIN_PAGE_SIZE: u64 = 20;

/// Relative date filter offered on timestamp columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFilter {
    Today,
    #[serde(rename = "past_7_days")]
    Past7Days,
    ThisMonth,
    ThisYear,
}

impl DateFilter {
    /// Half-open UTC range `[start, end)` relative to `now`.
    pub fn bounds(self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let today = now.date_naive();
        let tomorrow = midnight(today + Duration::days(1));
        match self {
            DateFilter::Today => (midnight(today), tomorrow),
            DateFilter::Past7Days => (midnight(today - Duration::days(7)), tomorrow),
            DateFilter::ThisMonth => {
                let first = today.with_day(1).unwrap_or(today);
                let next = if first.month() == 12 {
                    NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
                };
                (midnight(first), midnight(next.unwrap_or(first)))
            }
            DateFilter::ThisYear => {
                let first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
                let next = NaiveDate::from_ymd_opt(today.year() + 1, 1, 1).unwrap_or(today);
                (midnight(first), midnight(next))
            }
        }
    }

    pub fn contains(self, now: DateTime<Utc>, at: DateTime<Utc>) -> bool {
        let (start, end) = self.bounds(now);
        at >= start && at < end
    }
}

fn midnight(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(chrono::NaiveTime::MIN))
}

/// Drill-down on `publish_date`: year, then month, then day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DateHierarchy {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl DateHierarchy {
    pub fn is_empty(&self) -> bool {
        self.year.is_none()
    }

    /// UTC range selected by the hierarchy, or `None` when unrestricted or invalid.
    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let year = self.year?;
        let (start, end) = match (self.month, self.day) {
            (None, _) => (
                NaiveDate::from_ymd_opt(year, 1, 1)?,
                NaiveDate::from_ymd_opt(year + 1, 1, 1)?,
            ),
            (Some(month), None) => {
                let start = NaiveDate::from_ymd_opt(year, month, 1)?;
                let end = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1)?
                };
                (start, end)
            }
            (Some(month), Some(day)) => {
                let start = NaiveDate::from_ymd_opt(year, month, day)?;
                (start, start + Duration::days(1))
            }
        };
        Some((midnight(start), midnight(end)))
    }
}

/// Filters of the post change list.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub author_id: Option<Uuid>,
    pub created: Option<DateFilter>,
    pub publish: DateHierarchy,
    pub search: Option<String>,
}

impl PostFilter {
    /// Evaluate the filter in process (used by the in-memory store).
    pub fn matches(&self, post: &Post, now: DateTime<Utc>) -> bool {
        if self.status.is_some_and(|s| s != post.status) {
            return false;
        }
        if self.author_id.is_some_and(|a| a != post.author_id) {
            return false;
        }
        if self.created.is_some_and(|f| !f.contains(now, post.created_at)) {
            return false;
        }
        if !self.publish.is_empty() {
            match self.publish.bounds() {
                Some((start, end)) if post.publish_date >= start && post.publish_date < end => {}
                _ => return false,
            }
        }
        match self.search_term() {
            Some(term) => contains_ci(&post.title, &term) || contains_ci(&post.body, &term),
            None => true,
        }
    }

    pub fn search_term(&self) -> Option<String> {
        normalized_term(self.search.as_deref())
    }
}

/// Filters of the comment change list.
#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub active: Option<bool>,
    pub created: Option<DateFilter>,
    pub updated: Option<DateFilter>,
    pub search: Option<String>,
}

impl CommentFilter {
    /// Evaluate the filter in process; `author_name` is the comment author's username.
    pub fn matches(&self, comment: &Comment, author_name: &str, now: DateTime<Utc>) -> bool {
        if self.active.is_some_and(|a| a != comment.active) {
            return false;
        }
        if self.created.is_some_and(|f| !f.contains(now, comment.created_at)) {
            return false;
        }
        if self.updated.is_some_and(|f| !f.contains(now, comment.updated_at)) {
            return false;
        }
        match self.search_term() {
            Some(term) => contains_ci(author_name, &term) || contains_ci(&comment.body, &term),
            None => true,
        }
    }

    pub fn search_term(&self) -> Option<String> {
        normalized_term(self.search.as_deref())
    }
}

fn normalized_term(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
