//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to check credentials without knowing the backing
//! store, so handler tests can substitute any implementation.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
