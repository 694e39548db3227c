//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::ports::FixtureBookingRepository;
use crate::domain::DetailsRules;
use crate::inbound::http::state::HttpState;

/// Name of the session cookie used by [`test_session_middleware`].
pub const SESSION_COOKIE: &str = "session";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Names the cookie [`SESSION_COOKIE`] and disables the `Secure` flag for
///   plain HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// HTTP state backed by the in-memory booking store.
pub fn fixture_state(repo: &FixtureBookingRepository) -> HttpState {
    HttpState::new(std::sync::Arc::new(repo.clone()), DetailsRules::default())
}
