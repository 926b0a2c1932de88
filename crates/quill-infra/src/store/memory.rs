//! In-memory document store - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{NewPost, Post, PostPatch, User};
use quill_core::error::StoreError;
use quill_core::ports::{PostStore, UserStore};

/// In-memory post store using a slug-keyed HashMap behind an async RwLock.
///
/// The write lock spans the uniqueness check and the insert, which makes
/// insert-if-absent atomic. Data is lost on process restart.
pub struct MemoryPostStore {
    posts: RwLock<HashMap<String, Post>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let posts = self.posts.read().await;
        let mut all: Vec<Post> = posts.values().cloned().collect();
        all.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(all)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.read().await.get(slug).cloned())
    }

    async fn insert(&self, draft: NewPost, slug: String) -> Result<Post, StoreError> {
        let mut posts = self.posts.write().await;

        if posts.contains_key(&slug) {
            return Err(StoreError::Constraint(format!(
                "slug already exists: {slug}"
            )));
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
        post.updated_at = Utc::now();

        Ok(post.clone())
    }

    async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        let mut posts = self.posts.write().await;

        let slug = posts
            .iter()
            .find(|(_, p)| p.id == id)
            .map(|(slug, _)| slug.clone())
            .ok_or(StoreError::NotFound)?;
        posts.remove(&slug);

        Ok(())
    }
}

/// In-memory user store keyed by the identity subject.
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_uid(&self, uid: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(uid).cloned())
    }

    async fn upsert(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        let stored = users.entry(user.uid.clone()).or_insert(user);
        Ok(stored.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            description: "d".to_string(),
            content: "c".to_string(),
            tags: vec![],
            author_id: "uid".to_string(),
            cover_image: String::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = MemoryPostStore::new();
        store.insert(draft("Hello"), "hello".to_string()).await.unwrap();

        let found = store.find_by_slug("hello").await.unwrap();
        assert_eq!(found.unwrap().title, "Hello");
    }

    #[tokio::test]
    async fn test_insert_is_conditional_on_slug() {
        let store = MemoryPostStore::new();
        store.insert(draft("Hello"), "hello".to_string()).await.unwrap();

        let err = store
            .insert(draft("Hello Again"), "hello".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_yield_one_record() {
        let store = std::sync::Arc::new(MemoryPostStore::new());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.insert(draft("Same Title"), "same-title".to_string()).await
            }));
        }

        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_orders_by_published_at_desc() {
        let store = MemoryPostStore::new();
        for (i, title) in ["a", "b", "c"].iter().enumerate() {
            store.insert(draft(title), title.to_string()).await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(3 + i as u64)).await;
        }

        let posts = store.list().await.unwrap();
        assert!(posts.windows(2).all(|w| w[0].published_at >= w[1].published_at));
        assert_eq!(posts[0].slug, "c");
    }

    #[tokio::test]
    async fn test_update_missing_id() {
        let store = MemoryPostStore::new();
        let err = store
            .update(Uuid::new_v4(), PostPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_remove() {
        let store = MemoryPostStore::new();
        let post = store.insert(draft("Bye"), "bye".to_string()).await.unwrap();

        store.remove(post.id).await.unwrap();
        assert!(store.find_by_slug("bye").await.unwrap().is_none());

        let err = store.remove(post.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_user_upsert_keeps_existing() {
        let store = MemoryUserStore::new();
        let first = store
            .upsert(User::from_identity("u1", "a@example.com", Some("First")))
            .await
            .unwrap();
        let second = store
            .upsert(User::from_identity("u1", "a@example.com", Some("Second")))
            .await
            .unwrap();

        assert_eq!(second.display_name, first.display_name);
    }
}
