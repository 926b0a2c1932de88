//! Profile service - lazy author-profile provisioning.

use std::sync::Arc;

use crate::domain::User;
use crate::error::DomainError;
use crate::ports::UserStore;

/// Get-or-create author profiles from verified identity claims.
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn UserStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Ensure a profile exists for the given identity subject.
    ///
    /// Materialization is a single idempotent upsert rather than a
    /// read-check-write pair, so concurrent first requests converge on one
    /// profile. The stored profile is returned either way.
    pub async fn ensure(
        &self,
        uid: &str,
        email: &str,
        display_name: Option<&str>,
    ) -> Result<User, DomainError> {
        let candidate = User::from_identity(uid, email, display_name);
        let user = self.store.upsert(candidate).await?;
        Ok(user)
    }

    pub async fn find(&self, uid: &str) -> Result<Option<User>, DomainError> {
        Ok(self.store.find_by_uid(uid).await?)
    }
}
