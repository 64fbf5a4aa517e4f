use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::http::header::AUTHORIZATION;
use actix_web::http::Method;
use actix_web::{dev, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use super::error::ApiError;
use super::state::AppState;

pub const SESSION_COOKIE: &str = "cms_session";

/// Proof that the request carries a live admin session.
///
/// Taking this extractor as a handler argument puts the route behind the
/// login: browsers navigating (GET) are sent to `/login`, everything else
/// gets a 401.
pub struct AdminSession;

impl FromRequest for AdminSession {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut dev::Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = session_token(req);
        let redirect = req.method() == Method::GET;

        Box::pin(async move {
            let state =
                state.ok_or_else(|| ApiError::Internal("Application state is not configured".to_string()))?;

            match state.auth.authorize(token.as_deref()).await {
                Ok(()) => Ok(AdminSession),
                Err(_) => Err(ApiError::Unauthenticated { redirect }),
            }
        })
    }
}

/// Session token from the cookie, or from an `Authorization: Bearer` header
pub fn session_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
}

pub fn session_cookie(token: String, ttl_secs: u64) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(ttl_secs as i64))
        .finish()
}

pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(0))
        .expires(time::OffsetDateTime::UNIX_EPOCH)
        .finish()
}
