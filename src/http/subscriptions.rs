use actix_web::{web, HttpRequest, HttpResponse};

use crate::resource::core::supplied;

use super::error::ApiError;
use super::session::AdminSession;
use super::state::AppState;
use super::submission::Submission;

/// POST /subscribe
///
/// The public newsletter form names its input `email`; API clients may send
/// `address`.
pub async fn subscribe(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse, ApiError> {
    let mut submission = Submission::read(&req, payload.into_inner(), state.upload_max_bytes).await?;
    let candidate = supplied(submission.field("address"))
        .or_else(|| supplied(submission.field("email")))
        .unwrap_or_default();

    let subscription = state.subscriptions.admit(&candidate).await?;
    Ok(HttpResponse::Created().json(subscription))
}

/// GET /viewEmails
pub async fn view_emails(_session: AdminSession, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(state.subscriptions.list().await?))
}
