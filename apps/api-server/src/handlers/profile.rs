//! Author profile handlers.

use actix_web::{HttpResponse, web};

use quill_shared::ApiResponse;
use quill_shared::dto::ProfileResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/profile - get-or-create the caller's author profile.
///
/// Idempotent: repeated calls return the same stored profile.
pub async fn ensure(identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let user = state
        .profiles
        .ensure(&identity.uid, &identity.email, identity.name.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ProfileResponse::from(user))))
}
