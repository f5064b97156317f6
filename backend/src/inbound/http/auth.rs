//! Request principal extraction.
//!
//! Handlers that need a logged-in user take a [`Principal`] argument. The
//! extractor reads the user id from the session cookie and loads the user
//! through [`PrincipalQuery`](crate::domain::ports::PrincipalQuery), so a
//! missing cookie, a tampered id and a deleted user all surface as
//! `401 Unauthorized` before the handler body runs.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, User};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Authenticated user behind the current request.
#[derive(Debug, Clone)]
pub struct Principal(pub User);

impl Principal {
    /// Consume the extractor and return the user.
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl FromRequest for Principal {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let session = session.await.map_err(Error::from)?;
            let user_id = session.require_user_id()?;
            let state = state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            let user = state.principals.resolve(&user_id).await?;
            Ok(Self(user))
        })
    }
}
