//! Postgres document store implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use quill_core::domain::{NewPost, Post, PostPatch, User};
use quill_core::error::StoreError;
use quill_core::ports::{PostStore, UserStore};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};

fn map_err(e: DbErr) -> StoreError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => StoreError::Constraint(msg),
        _ => match e {
            DbErr::Conn(err) => StoreError::Connection(err.to_string()),
            other => StoreError::Query(other.to_string()),
        },
    }
}

/// Postgres post store. Slug uniqueness is enforced by the UNIQUE index on
/// `posts.slug`; a conflicting insert surfaces as [`StoreError::Constraint`].
pub struct PgPostStore {
    db: DbConn,
}

impl PgPostStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let models = PostEntity::find()
            .order_by_desc(post::Column::PublishedAt)
            .all(&self.db)
            .await
            .map_err(map_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        let model = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_err)?;

        Ok(model.map(Into::into))
    }

    async fn insert(&self, draft: NewPost, slug: String) -> Result<Post, StoreError> {
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            slug,
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

        let active: post::ActiveModel = post.into();
        let model = active.insert(&self.db).await.map_err(map_err)?;

        Ok(model.into())
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, StoreError> {
        let mut active = post::ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(content) = patch.content {
            active.content = Set(content);
        }
        if let Some(tags) = patch.tags {
            active.tags = Set(serde_json::to_value(tags).unwrap_or_default());
        }
        if let Some(cover_image) = patch.cover_image {
            active.cover_image = Set(cover_image);
        }
        active.updated_at = Set(Utc::now().into());

        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => StoreError::NotFound,
            other => map_err(other),
        })?;

        Ok(model.into())
    }

    async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_err)?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

/// Postgres user profile store, keyed by the identity subject.
pub struct PgUserStore {
    db: DbConn,
}

impl PgUserStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_uid(&self, uid: &str) -> Result<Option<User>, StoreError> {
        let model = UserEntity::find()
            .filter(user::Column::Uid.eq(uid))
            .one(&self.db)
            .await
            .map_err(map_err)?;

        Ok(model.map(Into::into))
    }

    async fn upsert(&self, candidate: User) -> Result<User, StoreError> {
        if let Some(existing) = self.find_by_uid(&candidate.uid).await? {
            return Ok(existing);
        }

        let uid = candidate.uid.clone();
        let active: user::ActiveModel = candidate.into();
        match active.insert(&self.db).await {
            Ok(model) => Ok(model.into()),
            // Lost the race to a concurrent first request; the stored
            // profile wins.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => self
                .find_by_uid(&uid)
                .await?
                .ok_or(StoreError::NotFound),
            Err(e) => Err(map_err(e)),
        }
    }
}
