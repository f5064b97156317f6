//! Port for reading the `users` collection.
use async_trait::async_trait;

use crate::domain::{PasswordHash, User, UserId};

use super::RecordStoreError;

/// User record together with its stored password hash.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    /// The user the hash belongs to.
    pub user: User,
    /// Parsed password hash.
    pub password_hash: PasswordHash,
}

/// Read access to users; registration is handled elsewhere.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RecordStoreError>;

    /// Fetch a user and password hash by normalised email.
    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, RecordStoreError>;
}
