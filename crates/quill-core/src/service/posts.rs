//! Post service - slug derivation, uniqueness, and related-post ranking.

use std::sync::Arc;

use crate::domain::{NewPost, Post, PostPatch};
use crate::error::{DomainError, StoreError};
use crate::ports::PostStore;
use crate::slug::generate_slug;

/// Default number of related posts returned.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Orchestrates post lifecycle operations over the document store.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Create a post.
    ///
    /// The slug is derived from the title; a title that normalizes to an
    /// empty slug is rejected before the store is touched. Uniqueness is
    /// enforced by the store's conditional insert, so create performs exactly
    /// one store write and a slug collision cannot produce a second record.
    pub async fn create(&self, input: NewPost) -> Result<Post, DomainError> {
        let slug = generate_slug(&input.title);
        if slug.is_empty() {
            return Err(DomainError::Validation(
                "Title must contain at least one letter or digit".to_string(),
            ));
        }

        match self.store.insert(input, slug.clone()).await {
            Ok(post) => {
                tracing::info!(slug = %post.slug, "Post created");
                Ok(post)
            }
            Err(StoreError::Constraint(_)) => Err(DomainError::Duplicate(slug)),
            Err(e) => Err(e.into()),
        }
    }

    /// Partial update by slug. Unspecified fields keep their prior values;
    /// the slug itself is immutable even when the title changes.
    pub async fn update(&self, slug: &str, patch: PostPatch) -> Result<Post, DomainError> {
        let existing = self
            .store
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::NotFound { slug: slug.to_string() })?;

        match self.store.update(existing.id, patch).await {
            Ok(post) => Ok(post),
            // The record can vanish between lookup and write; same outcome.
            Err(StoreError::NotFound) => Err(DomainError::NotFound { slug: slug.to_string() }),
            Err(e) => Err(e.into()),
        }
    }

    /// Permanent removal by slug. A nonexistent slug is NotFound and performs
    /// no store mutation.
    pub async fn delete(&self, slug: &str) -> Result<(), DomainError> {
        let existing = self
            .store
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::NotFound { slug: slug.to_string() })?;

        match self.store.remove(existing.id).await {
            Ok(()) => {
                tracing::info!(slug, "Post deleted");
                Ok(())
            }
            Err(StoreError::NotFound) => Err(DomainError::NotFound { slug: slug.to_string() }),
            Err(e) => Err(e.into()),
        }
    }

    /// Every post, most recently published first.
    pub async fn get_all(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.store.list().await?)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError> {
        Ok(self.store.find_by_slug(slug).await?)
    }

    /// Posts sharing at least one tag with `tags`, excluding `current_slug`.
    ///
    /// Ranked by shared-tag count descending; ties break on `published_at`
    /// descending so the ordering is deterministic regardless of store
    /// return order. At most `limit` posts.
    pub async fn related(
        &self,
        current_slug: &str,
        tags: &[String],
        limit: usize,
    ) -> Result<Vec<Post>, DomainError> {
        if tags.is_empty() {
            return Ok(Vec::new());
        }

        let mut ranked: Vec<(usize, Post)> = self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|post| post.slug != current_slug)
            .map(|post| (post.shared_tag_count(tags), post))
            .filter(|(overlap, _)| *overlap > 0)
            .collect();

        ranked.sort_by(|(a_overlap, a), (b_overlap, b)| {
            b_overlap
                .cmp(a_overlap)
                .then_with(|| b.published_at.cmp(&a.published_at))
        });

        Ok(ranked.into_iter().take(limit).map(|(_, post)| post).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::collections::HashMap;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    /// Test double with the same conditional-insert contract as the real
    /// adapters.
    #[derive(Default)]
    struct FakeStore {
        posts: RwLock<HashMap<String, Post>>,
    }

    #[async_trait]
    impl PostStore for FakeStore {
        async fn list(&self) -> Result<Vec<Post>, StoreError> {
            let mut posts: Vec<Post> = self.posts.read().await.values().cloned().collect();
            posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
            Ok(posts)
        }

        async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
            Ok(self.posts.read().await.get(slug).cloned())
        }

        async fn insert(&self, draft: NewPost, slug: String) -> Result<Post, StoreError> {
            let mut posts = self.posts.write().await;
            if posts.contains_key(&slug) {
                return Err(StoreError::Constraint(format!("slug taken: {slug}")));
            }
            let now = Utc::now();
            let post = Post {
                id: Uuid::new_v4(),
                slug: slug.clone(),
                title: draft.title,
                description: draft.description,
                content: draft.content,
                tags: draft.tags,
                author_id: draft.author_id,
                cover_image: draft.cover_image,
                published_at: now,
                created_at: now,
                updated_at: now,
            };
            posts.insert(slug, post.clone());
            Ok(post)
        }

        async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, StoreError> {
            let mut posts = self.posts.write().await;
            let post = posts
                .values_mut()
                .find(|p| p.id == id)
                .ok_or(StoreError::NotFound)?;
            if let Some(title) = patch.title {
                post.title = title;
            }
            if let Some(description) = patch.description {
                post.description = description;
            }
            if let Some(content) = patch.content {
                post.content = content;
            }
            if let Some(tags) = patch.tags {
                post.tags = tags;
            }
            if let Some(cover_image) = patch.cover_image {
                post.cover_image = cover_image;
            }
            post.updated_at = Utc::now() + Duration::milliseconds(1);
            Ok(post.clone())
        }

        async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
            let mut posts = self.posts.write().await;
            let slug = posts
                .iter()
                .find(|(_, p)| p.id == id)
                .map(|(s, _)| s.clone())
                .ok_or(StoreError::NotFound)?;
            posts.remove(&slug);
            Ok(())
        }
    }

    fn draft(title: &str, tags: &[&str]) -> NewPost {
        NewPost {
            title: title.to_string(),
            description: "A description".to_string(),
            content: "Some content here".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            author_id: "author-1".to_string(),
            cover_image: String::new(),
        }
    }

    fn service() -> (PostService, Arc<FakeStore>) {
        let store = Arc::new(FakeStore::default());
        (PostService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_create_derives_slug() {
        let (svc, _) = service();
        let post = svc.create(draft("Hello World!", &[])).await.unwrap();
        assert_eq!(post.slug, "hello-world");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_slug() {
        let (svc, store) = service();
        let err = svc.create(draft("!!!", &[])).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(store.posts.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_title_conflicts_without_second_record() {
        let (svc, store) = service();
        svc.create(draft("Hello World", &[])).await.unwrap();

        // Different punctuation, same normalized slug.
        let err = svc.create(draft("Hello, World!", &[])).await.unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));
        assert_eq!(store.posts.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_get_all_orders_by_publish_time_desc() {
        let (svc, _) = service();
        for title in ["First", "Second", "Third"] {
            svc.create(draft(title, &[])).await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let posts = svc.get_all().await.unwrap();
        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["third", "second", "first"]);
        assert!(posts.windows(2).all(|w| w[0].published_at >= w[1].published_at));
    }

    #[tokio::test]
    async fn test_update_applies_partial_patch() {
        let (svc, _) = service();
        let created = svc.create(draft("Patch Me", &["rust"])).await.unwrap();

        let patch = PostPatch {
            content: Some("new text".to_string()),
            ..Default::default()
        };
        let updated = svc.update("patch-me", patch).await.unwrap();

        assert_eq!(updated.content, "new text");
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.tags, created.tags);
        assert_eq!(updated.cover_image, created.cover_image);
        assert_eq!(updated.slug, "patch-me");
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_update_title_never_touches_slug() {
        let (svc, _) = service();
        svc.create(draft("Stable URL", &[])).await.unwrap();

        let patch = PostPatch {
            title: Some("A Completely New Title".to_string()),
            content: Some("body".to_string()),
            ..Default::default()
        };
        let updated = svc.update("stable-url", patch).await.unwrap();
        assert_eq!(updated.slug, "stable-url");
        assert_eq!(updated.title, "A Completely New Title");
    }

    #[tokio::test]
    async fn test_update_missing_slug_is_not_found() {
        let (svc, _) = service();
        let err = svc.update("nope", PostPatch::default()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_slug_mutates_nothing() {
        let (svc, store) = service();
        svc.create(draft("Keep Me", &[])).await.unwrap();

        let err = svc.delete("gone").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(store.posts.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let (svc, store) = service();
        svc.create(draft("Short Lived", &[])).await.unwrap();
        svc.delete("short-lived").await.unwrap();
        assert!(store.posts.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_related_excludes_self_and_zero_overlap() {
        let (svc, _) = service();
        svc.create(draft("Current", &["x", "y"])).await.unwrap();
        svc.create(draft("Shares One", &["y", "z"])).await.unwrap();
        svc.create(draft("Shares None", &["z"])).await.unwrap();

        let tags = vec!["x".to_string(), "y".to_string()];
        let related = svc.related("current", &tags, 3).await.unwrap();

        let slugs: Vec<&str> = related.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["shares-one"]);
    }

    #[tokio::test]
    async fn test_related_ranks_by_overlap_then_recency() {
        let (svc, _) = service();
        svc.create(draft("Current", &["x", "y"])).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        svc.create(draft("Older One Tag", &["x"])).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        svc.create(draft("Newer One Tag", &["y"])).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        svc.create(draft("Both Tags", &["x", "y"])).await.unwrap();

        let tags = vec!["x".to_string(), "y".to_string()];
        let related = svc.related("current", &tags, 3).await.unwrap();

        let slugs: Vec<&str> = related.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["both-tags", "newer-one-tag", "older-one-tag"]);
    }

    #[tokio::test]
    async fn test_related_honors_limit() {
        let (svc, _) = service();
        svc.create(draft("Current", &["x"])).await.unwrap();
        for i in 0..5 {
            svc.create(draft(&format!("Match {i}"), &["x"])).await.unwrap();
        }

        let tags = vec!["x".to_string()];
        let related = svc.related("current", &tags, 3).await.unwrap();
        assert_eq!(related.len(), 3);
    }

    #[tokio::test]
    async fn test_related_empty_tags_is_empty() {
        let (svc, _) = service();
        svc.create(draft("Current", &[])).await.unwrap();
        svc.create(draft("Other", &["x"])).await.unwrap();

        let related = svc.related("current", &[], 3).await.unwrap();
        assert!(related.is_empty());
    }

}
