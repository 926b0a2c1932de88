use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewPost, Post, PostPatch, User};
use crate::error::StoreError;

/// Document store for posts, keyed by slug.
///
/// Implementations are thin pass-throughs to the backing store: no caching,
/// no retries beyond what the store client itself provides.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Every post, most recently published first. Ordering is the store's
    /// responsibility so that the store clock is the single timestamp
    /// authority.
    async fn list(&self) -> Result<Vec<Post>, StoreError>;

    /// Look up a single post by its slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError>;

    /// Conditional insert, keyed by `slug`: fails with
    /// [`StoreError::Constraint`] when the slug is already taken. The check
    /// and the write are a single atomic operation; there is no window in
    /// which a concurrent insert with the same slug can slip through.
    ///
    /// The store assigns the id and the `published_at`/`created_at`/
    /// `updated_at` timestamps from its own clock.
    async fn insert(&self, draft: NewPost, slug: String) -> Result<Post, StoreError>;

    /// Partial update: only the supplied fields change, `updated_at` is
    /// refreshed unconditionally. Fails with [`StoreError::NotFound`] when
    /// the id no longer resolves.
    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, StoreError>;

    /// Permanent removal. No tombstoning.
    async fn remove(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Document store for author profiles, keyed by the identity subject.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_uid(&self, uid: &str) -> Result<Option<User>, StoreError>;

    /// Idempotent insert-or-keep: stores `user` if no profile exists for its
    /// uid, otherwise returns the existing profile unchanged. A single
    /// conditional write, so concurrent first requests for the same subject
    /// converge on one profile (first writer wins).
    async fn upsert(&self, user: User) -> Result<User, StoreError>;
}
