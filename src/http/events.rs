use actix_web::http::header::ContentType;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::domain::event::EventFields;
use crate::resource::ContentCommand;

use super::error::ApiError;
use super::pages;
use super::session::AdminSession;
use super::state::AppState;
use super::submission::Submission;
use super::parse_id;

const EVENT_IMAGE_FIELD: &str = "eventImage";
const EVENT_LIST: &str = "/viewEvents";

fn event_fields(submission: &mut Submission) -> EventFields {
    EventFields {
        title: submission.field("title"),
        description: submission.field("description"),
        date: submission.field("date"),
    }
}

/// GET /events
pub async fn list_events(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(state.events.find_all().await?))
}

/// GET /viewEvents
pub async fn view_events(_session: AdminSession, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    list_events(state).await
}

/// GET /addEvent
pub async fn add_event_form(_session: AdminSession) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(pages::ADD_EVENT_FORM)
}

/// POST /addEvent
pub async fn create_event(
    _session: AdminSession,
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse, ApiError> {
    let mut submission = Submission::read(&req, payload.into_inner(), state.upload_max_bytes).await?;
    let image = submission.file(EVENT_IMAGE_FIELD);
    let draft = event_fields(&mut submission).into_draft()?;

    let event = state.events.handle(ContentCommand::Create { draft, image }).await?;
    Ok(HttpResponse::Created().json(event))
}

/// GET /editEvents/{id}
pub async fn edit_event(
    _session: AdminSession,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path).ok_or(ApiError::Redirect(EVENT_LIST))?;
    let event = state
        .events
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::or_redirect(e, EVENT_LIST))?;

    Ok(HttpResponse::Ok().json(event))
}

/// PUT /event/{id}
pub async fn update_event(
    _session: AdminSession,
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path).ok_or_else(|| ApiError::Internal(format!("Invalid event id: {}", path)))?;

    let mut submission = Submission::read(&req, payload.into_inner(), state.upload_max_bytes).await?;
    let image = submission.file(EVENT_IMAGE_FIELD);
    let patch = event_fields(&mut submission).into_patch()?;

    let event = state.events.handle(ContentCommand::Update { id, patch, image }).await?;
    Ok(HttpResponse::Created().json(event))
}

/// DELETE /deleteEvents/{id}
pub async fn delete_event(
    _session: AdminSession,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path).ok_or(ApiError::Redirect(EVENT_LIST))?;
    let removed = state
        .events
        .handle(ContentCommand::Delete { id })
        .await
        .map_err(|e| ApiError::or_redirect(e, EVENT_LIST))?;

    Ok(HttpResponse::Created().json(removed))
}
