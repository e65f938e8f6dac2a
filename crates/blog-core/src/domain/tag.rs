use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Post;

/// A label attached to posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl Tag {
    pub fn new(name: &str) -> Self {
        let name = name.trim().to_string();
        Self {
            id: Uuid::new_v4(),
            slug: slug::slugify(&name),
            name,
        }
    }
}

/// Normalize user-supplied tag names: trim, drop blanks and case-insensitive duplicates.
pub fn normalize_tag_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    names
        .iter()
        .map(|n| n.as_ref().trim())
        .filter(|n| !n.is_empty())
        .filter(|n| seen.insert(n.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Order candidate posts by how many tags they share with the source post,
/// then by publish date (newest first), keeping at most `limit`.
pub fn rank_by_shared_tags(
    shared_counts: &HashMap<Uuid, usize>,
    candidates: Vec<Post>,
    limit: usize,
) -> Vec<Post> {
    let mut ranked: Vec<(usize, Post)> = candidates
        .into_iter()
        .filter_map(|p| shared_counts.get(&p.id).map(|count| (*count, p)))
        .filter(|(count, _)| *count > 0)
        .collect();

    ranked.sort_by(|(ca, a), (cb, b)| cb.cmp(ca).then(b.publish_date.cmp(&a.publish_date)));
    ranked.into_iter().take(limit).map(|(_, p)| p).collect()
}
