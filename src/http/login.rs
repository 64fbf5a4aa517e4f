use actix_web::http::header::{ContentType, LOCATION};
use actix_web::{web, HttpRequest, HttpResponse};

use crate::auth::Credentials;

use super::error::ApiError;
use super::pages;
use super::session::{expired_session_cookie, session_cookie, session_token};
use super::state::AppState;
use super::submission::Submission;

/// GET /login, GET /admin
pub async fn login_form() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(pages::LOGIN_FORM)
}

/// POST /login, POST /admin
pub async fn login(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse, ApiError> {
    let mut submission = Submission::read(&req, payload.into_inner(), state.upload_max_bytes).await?;
    let credentials = Credentials {
        username: submission.field("username").unwrap_or_default(),
        password: submission.field("password").unwrap_or_default(),
    };

    let token = state.auth.login(&credentials).await?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token, state.auth.session_ttl_secs()))
        .content_type(ContentType::html())
        .body(pages::ADMIN_VIEW))
}

/// POST /logout
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    if let Some(token) = session_token(&req) {
        state.auth.logout(&token).await;
    }

    HttpResponse::SeeOther()
        .cookie(expired_session_cookie())
        .insert_header((LOCATION, "/login"))
        .finish()
}
