//! Search result types and in-process scoring.
//!
//! PostgreSQL computes `similarity()` (pg_trgm) and `ts_rank()` for the
//! database-backed store. The functions here reproduce `similarity()` and
//! give a weighted term-frequency stand-in for `ts_rank()` so the in-memory
//! store orders results the same way.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::Post;

/// Posts whose title similarity is at or below this are dropped.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.1;

const TITLE_WEIGHT: f32 = 1.0;
const BODY_WEIGHT: f32 = 0.4;

/// A published post matching a search query.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub post: Post,
    pub similarity: f32,
    pub rank: f32,
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// Trigram set of `text` the way pg_trgm builds it: every word is lowercased
/// and padded with two leading blanks and one trailing blank.
pub fn trigrams(text: &str) -> HashSet<String> {
    let mut set = HashSet::new();
    for word in words(text) {
        let padded: Vec<char> = format!("  {} ", word).chars().collect();
        for window in padded.windows(3) {
            set.insert(window.iter().collect());
        }
    }
    set
}

/// Shared trigrams over all distinct trigrams, in `[0, 1]`.
pub fn trigram_similarity(a: &str, b: &str) -> f32 {
    let ta = trigrams(a);
    let tb = trigrams(b);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }
    let common = ta.intersection(&tb).count() as f32;
    let union = (ta.len() + tb.len()) as f32 - common;
    common / union
}

/// Weighted hit count of the query terms in title (A) and body (B).
pub fn text_rank(title: &str, body: &str, query: &str) -> f32 {
    let terms: HashSet<String> = words(query).collect();
    if terms.is_empty() {
        return 0.0;
    }
    let hits = |text: &str| words(text).filter(|w| terms.contains(w)).count() as f32;
    let score = TITLE_WEIGHT * hits(title) + BODY_WEIGHT * hits(body);
    // Saturating map into [0, 1) so ranks stay comparable with ts_rank.
    score / (score + 10.0)
}

/// Score posts against `query`, keep those above `threshold`, most similar first.
pub fn score_posts(posts: Vec<Post>, query: &str, threshold: f32) -> Vec<SearchHit> {
    let mut hits: Vec<SearchHit> = posts
        .into_iter()
        .map(|post| SearchHit {
            similarity: trigram_similarity(&post.title, query),
            rank: text_rank(&post.title, &post.body, query),
            post,
        })
        .filter(|hit| hit.similarity > threshold)
        .collect();

    hits.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    hits
}
