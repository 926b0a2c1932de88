use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Words-per-minute figure behind the reading-time estimate.
const WORDS_PER_MINUTE: usize = 200;

/// Post entity - a published blog post.
///
/// The slug is derived from the title once, at creation time, and is unique
/// across all posts. Timestamps are assigned by the store when the write
/// happens, never taken from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub tags: Vec<String>,
    pub author_id: String,
    pub cover_image: String,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Estimated reading time, recomputed from the content on every read
    /// (never persisted). `ceil(words / 200)` minutes, at least one.
    pub fn reading_time(&self) -> String {
        let words = self.content.split_whitespace().count();
        let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
        format!("{minutes} min read")
    }

    /// Number of tags shared with `tags`.
    pub fn shared_tag_count(&self, tags: &[String]) -> usize {
        self.tags.iter().filter(|t| tags.contains(t)).count()
    }
}

/// Input for creating a post. The slug and timestamps are not part of the
/// input: the slug is derived by the service, the timestamps by the store.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub content: String,
    pub tags: Vec<String>,
    pub author_id: String,
    pub cover_image: String,
}

/// Partial update for a post. `None` fields keep their prior values.
/// The slug is immutable and deliberately absent here, even when the title
/// changes.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub cover_image: Option<String>,
}
