use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    /// Two-letter code stored in the `status` column.
    pub fn code(self) -> &'static str {
        match self {
            PostStatus::Draft => "DF",
            PostStatus::Published => "PB",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "DF" => Some(PostStatus::Draft),
            "PB" => Some(PostStatus::Published),
            _ => None,
        }
    }
}

/// Post entity - a blog article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: PostStatus,
    pub publish_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new draft post published "now".
    pub fn new(author_id: Uuid, title: String, slug: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            slug,
            body,
            status: PostStatus::Draft,
            publish_date: now,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Calendar day (UTC) the slug has to be unique for.
    pub fn publish_day(&self) -> NaiveDate {
        self.publish_date.date_naive()
    }

    /// Canonical URL of the detail page, e.g. `/2024/3/7/my-post`.
    pub fn absolute_url(&self) -> String {
        format!(
            "/{}/{}/{}/{}",
            self.publish_date.year(),
            self.publish_date.month(),
            self.publish_date.day(),
            self.slug
        )
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Half-open `[start, end)` UTC range covering a calendar day.
pub fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc.from_utc_datetime(&day.and_time(chrono::NaiveTime::MIN));
    (start, start + chrono::Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_url_uses_unpadded_date_parts() {
        let mut post = Post::new(
            Uuid::new_v4(),
            "Hello".to_string(),
            "hello".to_string(),
            "body".to_string(),
        );
        post.publish_date = Utc.with_ymd_and_hms(2024, 3, 7, 23, 59, 0).unwrap();

        assert_eq!(post.absolute_url(), "/2024/3/7/hello");
    }

    #[test]
    fn status_codes_round_trip() {
        assert_eq!(PostStatus::from_code("PB"), Some(PostStatus::Published));
        assert_eq!(PostStatus::from_code(PostStatus::Draft.code()), Some(PostStatus::Draft));
        assert_eq!(PostStatus::from_code("XX"), None);
    }

    #[test]
    fn new_posts_are_drafts() {
        let post = Post::new(Uuid::new_v4(), "t".into(), "t".into(), "b".into());
        assert!(!post.is_published());
    }

    #[test]
    fn day_bounds_cover_one_day() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let (start, end) = day_bounds(day);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }
}
