//! Cookie-session adapter for the booking workflow's [`SessionScope`] port.
//!
//! Values are stored as JSON under their key in the signed, encrypted
//! session cookie. The wrapper also acts as an extractor so handlers can take
//! it directly as an argument.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde_json::Value;

use crate::domain::ports::{SessionScope, SessionScopeError};

/// Newtype exposing the Actix session through the domain port.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }
}

impl SessionScope for SessionContext {
    fn get_value(&self, key: &str) -> Result<Option<Value>, SessionScopeError> {
        self.0
            .get::<Value>(key)
            .map_err(|err| SessionScopeError::read(err.to_string()))
    }

    fn put_value(&self, key: &str, value: Value) -> Result<(), SessionScopeError> {
        self.0
            .insert(key, value)
            .map_err(|err| SessionScopeError::write(err.to_string()))
    }

    fn remove_value(&self, key: &str) {
        self.0.remove(key);
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(Self::new) })
    }
}
