//! Blog post handlers.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_core::domain::{NewPost, User};
use quill_core::service::DEFAULT_RELATED_LIMIT;
use quill_shared::ApiResponse;
use quill_shared::dto::{CreatePostRequest, CreatedPost, PostResponse, UpdatePostRequest};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const RELATED_LIMIT_MAX: usize = 10;

/// GET /api/posts - public listing, most recent first.
///
/// Auth is optional here; a token is accepted if present but the
/// listing is the same for everyone.
pub async fn list(viewer: OptionalIdentity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    if let Some(identity) = &viewer.0 {
        tracing::debug!(uid = %identity.uid, "authenticated listing request");
    }

    let posts = state.posts.get_all().await?;
    let authors = resolve_authors(&state, posts.iter().map(|p| p.author_id.as_str())).await?;

    let body: Vec<PostResponse> = posts
        .iter()
        .map(|post| PostResponse::from_post(post, authors.get(&post.author_id)))
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// GET /api/posts/{slug} - public read.
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let post = state
        .posts
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let author = state.profiles.find(&post.author_id).await?;
    let body = PostResponse::from_post(&post, author.as_ref());

    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

#[derive(Debug, Deserialize)]
pub struct RelatedQuery {
    /// Comma-separated tag list; defaults to the post's own tags.
    tags: Option<String>,
    limit: Option<usize>,
}

/// GET /api/posts/{slug}/related - posts sharing tags with this one.
pub async fn related(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<RelatedQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let post = state
        .posts
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let tags: Vec<String> = match &query.tags {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .collect(),
        None => post.tags.clone(),
    };
    let limit = query
        .limit
        .unwrap_or(DEFAULT_RELATED_LIMIT)
        .clamp(1, RELATED_LIMIT_MAX);

    let posts = state.posts.related(&slug, &tags, limit).await?;
    let authors = resolve_authors(&state, posts.iter().map(|p| p.author_id.as_str())).await?;

    let body: Vec<PostResponse> = posts
        .iter()
        .map(|post| PostResponse::from_post(post, authors.get(&post.author_id)))
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// POST /api/posts - create a post (authenticated).
pub async fn create(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    // Lazily materialize the author profile; the post is attributed to the
    // verified identity, not to anything in the request body.
    let profile = state
        .profiles
        .ensure(&identity.uid, &identity.email, identity.name.as_deref())
        .await?;

    let post = state
        .posts
        .create(NewPost {
            title: req.title,
            description: req.description,
            content: req.content,
            tags: req.tags,
            author_id: profile.uid,
            cover_image: req.cover_image,
        })
        .await?;

    let created = CreatedPost {
        id: post.id.to_string(),
        slug: post.slug,
    };

    Ok(HttpResponse::Created()
        .json(ApiResponse::ok_with_message(created, "Post created successfully")))
}

/// PUT /api/posts/{slug} - partial update (authenticated).
pub async fn update(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    state.posts.update(&slug, req.into()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message_only("Post updated successfully")))
}

/// DELETE /api/posts/{slug} - permanent removal (authenticated).
pub async fn delete(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    state.posts.delete(&slug).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message_only("Post deleted successfully")))
}

/// Look up each distinct author once.
async fn resolve_authors<'a>(
    state: &AppState,
    author_ids: impl Iterator<Item = &'a str>,
) -> Result<HashMap<String, User>, AppError> {
    let mut authors = HashMap::new();
    for uid in author_ids {
        if authors.contains_key(uid) {
            continue;
        }
        if let Some(user) = state.profiles.find(uid).await? {
            authors.insert(uid.to_string(), user);
        }
    }
    Ok(authors)
}
