use actix_web::http::header::ContentType;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::domain::testimonial::TestimonialFields;
use crate::resource::ContentCommand;

use super::error::ApiError;
use super::pages;
use super::session::AdminSession;
use super::state::AppState;
use super::submission::Submission;
use super::parse_id;

const TESTIMONIAL_IMAGE_FIELD: &str = "testimonialImage";
const TESTIMONIAL_LIST: &str = "/admin/viewTestimonial";

fn testimonial_fields(submission: &mut Submission) -> TestimonialFields {
    TestimonialFields {
        name: submission.field("name"),
        description: submission.field("description"),
    }
}

/// GET / (public landing page data)
pub async fn list_testimonials(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(state.testimonials.find_all().await?))
}

pub async fn view_testimonials(
    _session: AdminSession,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    list_testimonials(state).await
}

pub async fn add_testimonial_form(_session: AdminSession) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(pages::ADD_TESTIMONIAL_FORM)
}

pub async fn create_testimonial(
    _session: AdminSession,
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse, ApiError> {
    let mut submission = Submission::read(&req, payload.into_inner(), state.upload_max_bytes).await?;
    let image = submission.file(TESTIMONIAL_IMAGE_FIELD);
    let draft = testimonial_fields(&mut submission).into_draft()?;

    let testimonial = state
        .testimonials
        .handle(ContentCommand::Create { draft, image })
        .await?;
    Ok(HttpResponse::Created().json(testimonial))
}

pub async fn edit_testimonial(
    _session: AdminSession,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path).ok_or(ApiError::Redirect(TESTIMONIAL_LIST))?;
    let testimonial = state
        .testimonials
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::or_redirect(e, TESTIMONIAL_LIST))?;

    Ok(HttpResponse::Ok().json(testimonial))
}

pub async fn update_testimonial(
    _session: AdminSession,
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path).ok_or_else(|| ApiError::Internal(format!("Invalid testimonial id: {}", path)))?;

    let mut submission = Submission::read(&req, payload.into_inner(), state.upload_max_bytes).await?;
    let image = submission.file(TESTIMONIAL_IMAGE_FIELD);
    let patch = testimonial_fields(&mut submission).into_patch();

    let testimonial = state
        .testimonials
        .handle(ContentCommand::Update { id, patch, image })
        .await?;
    Ok(HttpResponse::Created().json(testimonial))
}

pub async fn delete_testimonial(
    _session: AdminSession,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path).ok_or(ApiError::Redirect(TESTIMONIAL_LIST))?;
    let removed = state
        .testimonials
        .handle(ContentCommand::Delete { id })
        .await
        .map_err(|e| ApiError::or_redirect(e, TESTIMONIAL_LIST))?;

    Ok(HttpResponse::Created().json(removed))
}
