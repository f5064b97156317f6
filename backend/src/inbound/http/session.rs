//! Cookie session access for handlers and extractors.
//!
//! Only the customer's id lives in the cookie; [`crate::inbound::http::auth`]
//! turns it into a loaded user record on every request.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const SESSION_USER_KEY: &str = "uid";

/// Typed view over the actix session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember `user_id` and rotate the session so a pre-login cookie cannot
    /// be replayed.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0
            .insert(SESSION_USER_KEY, user_id.to_string())
            .map_err(|err| Error::internal(format!("session write failed: {err}")))?;
        self.0.renew();
        Ok(())
    }

    /// Forget everything and send a removal cookie.
    pub fn purge(&self) {
        self.0.purge();
    }

    /// The stored user id. Unparsable values are treated as absent.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(SESSION_USER_KEY)
            .map_err(|err| Error::internal(format!("session read failed: {err}")))?;
        Ok(raw.and_then(|value| {
            UserId::new(&value)
                .inspect_err(|err| warn!(error = %err, "discarding malformed session user id"))
                .ok()
        }))
    }

    /// The stored user id, or `Unauthorized` when nobody is logged in.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        Box::pin(async move { session.await.map(Self::new) })
    }
}
