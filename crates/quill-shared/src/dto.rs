//! Data Transfer Objects - request/response types for the API.
//!
//! Field constraints mirror the published schema: title ≤ 200 chars,
//! description ≤ 500, content ≤ 50,000, at most 10 tags of ≤ 50 chars each.
//! Validation runs in the handler before the service is invoked.

use serde::{Deserialize, Serialize};

use quill_core::domain::{Post, PostPatch, User};

const TITLE_MAX: usize = 200;
const DESCRIPTION_MAX: usize = 500;
const CONTENT_MAX: usize = 50_000;
const TAGS_MAX: usize = 10;
const TAG_LEN_MAX: usize = 50;

/// Request to create a post. The author is taken from the verified identity,
/// not from the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub description: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cover_image: String,
}

impl CreatePostRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        check_required(&mut errors, "Title", &self.title, TITLE_MAX);
        check_required(&mut errors, "Description", &self.description, DESCRIPTION_MAX);
        check_required(&mut errors, "Content", &self.content, CONTENT_MAX);
        check_tags(&mut errors, &self.tags);
        check_cover_image(&mut errors, &self.cover_image);

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Request to update a post: everything optional except `content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: String,
    pub tags: Option<Vec<String>>,
    pub cover_image: Option<String>,
}

impl UpdatePostRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Some(title) = &self.title {
            check_required(&mut errors, "Title", title, TITLE_MAX);
        }
        if let Some(description) = &self.description {
            check_required(&mut errors, "Description", description, DESCRIPTION_MAX);
        }
        check_required(&mut errors, "Content", &self.content, CONTENT_MAX);
        if let Some(tags) = &self.tags {
            check_tags(&mut errors, tags);
        }
        if let Some(cover_image) = &self.cover_image {
            check_cover_image(&mut errors, cover_image);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl From<UpdatePostRequest> for PostPatch {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            content: Some(req.content),
            tags: req.tags,
            cover_image: req.cover_image,
        }
    }
}

fn check_required(errors: &mut Vec<String>, field: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.push(format!("{field} is required"));
    } else if value.chars().count() > max {
        errors.push(format!("{field} must be {max} characters or less"));
    }
}

fn check_tags(errors: &mut Vec<String>, tags: &[String]) {
    if tags.len() > TAGS_MAX {
        errors.push(format!("Maximum {TAGS_MAX} tags allowed"));
    }
    if tags.iter().any(|t| t.trim().is_empty()) {
        errors.push("Tag cannot be empty".to_string());
    }
    if tags.iter().any(|t| t.chars().count() > TAG_LEN_MAX) {
        errors.push(format!("Tag must be {TAG_LEN_MAX} characters or less"));
    }
}

fn check_cover_image(errors: &mut Vec<String>, cover_image: &str) {
    if !cover_image.is_empty()
        && !cover_image.starts_with("http://")
        && !cover_image.starts_with("https://")
    {
        errors.push("Cover image must be a valid URL".to_string());
    }
}

/// A post as returned by the API, with the reading time recomputed and the
/// author profile attached when one exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub tags: Vec<String>,
    pub author_id: String,
    pub cover_image: String,
    pub published_at: String,
    pub created_at: String,
    pub updated_at: String,
    pub reading_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorResponse>,
}

impl PostResponse {
    pub fn from_post(post: &Post, author: Option<&User>) -> Self {
        Self {
            id: post.id.to_string(),
            slug: post.slug.clone(),
            title: post.title.clone(),
            description: post.description.clone(),
            content: post.content.clone(),
            tags: post.tags.clone(),
            author_id: post.author_id.clone(),
            cover_image: post.cover_image.clone(),
            published_at: post.published_at.to_rfc3339(),
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
            reading_time: post.reading_time(),
            author: author.map(AuthorResponse::from_user),
        }
    }
}

/// Public author fields attached to posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub uid: String,
    pub display_name: String,
    pub slug: String,
    pub avatar: String,
}

impl AuthorResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            uid: user.uid.clone(),
            display_name: user.display_name.clone(),
            slug: user.slug.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

/// Full profile returned from the ensure-profile endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub slug: String,
    pub bio: String,
    pub avatar: String,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            uid: user.uid,
            email: user.email,
            display_name: user.display_name,
            slug: user.slug,
            bio: user.bio,
            avatar: user.avatar,
        }
    }
}

/// Payload returned on successful creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedPost {
    pub id: String,
    pub slug: String,
}
