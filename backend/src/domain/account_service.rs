//! Login and principal resolution backed by the `users` collection.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{LoginService, PrincipalQuery, UserRepository};
use crate::domain::{Error, LoginCredentials, User, UserId};

/// Service implementing [`LoginService`] and [`PrincipalQuery`].
#[derive(Clone)]
pub struct AccountService<U> {
    user_repo: Arc<U>,
}

impl<U> AccountService<U> {
    /// Create a new service with the given repository.
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<U> LoginService for AccountService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let stored = self.user_repo.find_credentials(credentials.email()).await?;
        match stored {
            Some(stored) if stored.password_hash.verify(credentials.password()) => {
                Ok(stored.user.id)
            }
            _ => {
                debug!("login rejected");
                Err(Error::unauthorized("invalid credentials"))
            }
        }
    }
}

#[async_trait]
impl<U> PrincipalQuery for AccountService<U>
where
    U: UserRepository,
{
    async fn resolve(&self, user_id: &UserId) -> Result<User, Error> {
        self.user_repo.find_by_id(user_id).await?.ok_or_else(|| {
            debug!(%user_id, "session refers to unknown user");
            Error::unauthorized("login required")
        })
    }
}
