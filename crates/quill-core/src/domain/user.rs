use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::slug::user_slug;

/// User entity - an author profile mirroring the identity provider's subject.
///
/// Profiles are materialized lazily on the first authenticated action and are
/// never deleted by this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// The identity provider's stable subject.
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub slug: String,
    pub bio: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh profile from verified identity claims.
    ///
    /// The display name falls back to the email local part, then to
    /// "Anonymous"; the profile slug is derived from the email local part.
    pub fn from_identity(uid: impl Into<String>, email: impl Into<String>, display_name: Option<&str>) -> Self {
        let email = email.into();
        let local = email.split('@').next().unwrap_or_default();

        let display_name = display_name
            .filter(|n| !n.trim().is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| {
                if local.is_empty() {
                    "Anonymous".to_string()
                } else {
                    local.to_string()
                }
            });

        let now = Utc::now();
        Self {
            uid: uid.into(),
            slug: user_slug(&email),
            email,
            display_name,
            bio: String::new(),
            avatar: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_defaults_to_local_part() {
        let user = User::from_identity("uid-1", "jane.doe@example.com", None);
        assert_eq!(user.display_name, "jane.doe");
        assert_eq!(user.slug, "jane-doe");
    }

    #[test]
    fn test_explicit_display_name_wins() {
        let user = User::from_identity("uid-1", "jane.doe@example.com", Some("Jane Doe"));
        assert_eq!(user.display_name, "Jane Doe");
    }

    #[test]
    fn test_blank_display_name_ignored() {
        let user = User::from_identity("uid-1", "jane@example.com", Some("  "));
        assert_eq!(user.display_name, "jane");
    }
}
