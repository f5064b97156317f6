//! Driving port resolving the session user id into a full principal.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Principal resolution use-case.
#[async_trait]
pub trait PrincipalQuery: Send + Sync {
    /// Load the user behind a session.
    ///
    /// Returns an `unauthorized` error when the user no longer exists.
    async fn resolve(&self, user_id: &UserId) -> Result<User, Error>;
}
