use actix_web::http::header::{ContentType, LOCATION};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::auth::AuthError;
use crate::domain::event::EventError;
use crate::domain::subscription::SubscriptionError;
use crate::domain::testimonial::TestimonialError;
use crate::resource::ContentError;

use super::pages;

// ============================================================================
// HTTP Error Mapping
// ============================================================================

pub const SUBSCRIPTION_REJECTED: &str = "Invalid email or duplicate email.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidField(String),

    #[error("{0}")]
    BadRequest(String),

    /// A missing record on a view/delete route sends the browser back to a list
    #[error("Redirecting to {0}")]
    Redirect(&'static str),

    #[error("{}", SUBSCRIPTION_REJECTED)]
    SubscriptionRejected,

    #[error("Invalid credentials")]
    LoginDenied,

    #[error("Admin session required")]
    Unauthenticated { redirect: bool },

    #[error("Upload exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Map a missing record to a redirect, anything else as usual
    pub fn or_redirect(error: ContentError, location: &'static str) -> Self {
        if error.is_not_found() {
            ApiError::Redirect(location)
        } else {
            error.into()
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidField(_) | ApiError::BadRequest(_) | ApiError::SubscriptionRejected => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Redirect(_) => StatusCode::FOUND,
            ApiError::LoginDenied => StatusCode::UNAUTHORIZED,
            ApiError::Unauthenticated { redirect: true } => StatusCode::SEE_OTHER,
            ApiError::Unauthenticated { redirect: false } => StatusCode::UNAUTHORIZED,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            ApiError::Redirect(location) => HttpResponse::build(status)
                .insert_header((LOCATION, *location))
                .finish(),
            ApiError::Unauthenticated { redirect: true } => HttpResponse::build(status)
                .insert_header((LOCATION, "/login"))
                .finish(),
            ApiError::SubscriptionRejected => HttpResponse::build(status)
                .content_type(ContentType::plaintext())
                .body(SUBSCRIPTION_REJECTED),
            ApiError::LoginDenied => HttpResponse::build(status)
                .content_type(ContentType::html())
                .body(pages::LOGIN_FORM),
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "Request failed");
                HttpResponse::build(status).json(serde_json::json!({ "error": message }))
            }
            _ => HttpResponse::build(status).json(serde_json::json!({ "error": self.to_string() })),
        }
    }
}

/// Outside the view/delete routes a missing record is reported like any other
/// failure: 500 with the message in the `error` body.
impl From<ContentError> for ApiError {
    fn from(error: ContentError) -> Self {
        ApiError::Internal(error.to_string())
    }
}

impl From<SubscriptionError> for ApiError {
    fn from(error: SubscriptionError) -> Self {
        if error.is_rejection() {
            ApiError::SubscriptionRejected
        } else {
            ApiError::Internal(error.to_string())
        }
    }
}

impl From<EventError> for ApiError {
    fn from(error: EventError) -> Self {
        ApiError::InvalidField(error.to_string())
    }
}

impl From<TestimonialError> for ApiError {
    fn from(error: TestimonialError) -> Self {
        ApiError::InvalidField(error.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Denied => ApiError::LoginDenied,
            AuthError::Unauthenticated => ApiError::Unauthenticated { redirect: false },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::core::StoreError;
    use uuid::Uuid;

    #[test]
    fn test_not_found_maps_to_500_or_redirect() {
        let missing = || ContentError::Store(StoreError::not_found("Event", Uuid::new_v4()));

        assert_eq!(ApiError::from(missing()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let redirect = ApiError::or_redirect(missing(), "/viewEvents");
        assert!(matches!(redirect, ApiError::Redirect("/viewEvents")));
        assert_eq!(redirect.status_code(), StatusCode::FOUND);
    }

    #[test]
    fn test_persistence_failure_maps_to_500() {
        let error = ApiError::or_redirect(
            ContentError::Store(StoreError::Persistence("connection reset".to_string())),
            "/viewEvents",
        );
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_subscription_rejection_maps_to_400() {
        let error = ApiError::from(SubscriptionError::Duplicate("a@x.com".to_string()));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);

        let error = ApiError::from(SubscriptionError::Store(StoreError::Persistence("down".to_string())));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
