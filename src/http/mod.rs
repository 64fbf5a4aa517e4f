// ============================================================================
// HTTP Surface
// ============================================================================
//
// Route table for the public site and the admin screens. Admin handlers take
// an `AdminSession` argument; public ones do not.
//
// Cross-origin callers may read any route but never carry the admin cookie.
//
// HTML forms cannot send PUT or DELETE, so those routes also accept POST with
// a `_method` query parameter naming the intended method.
//
// ============================================================================

mod error;
mod events;
mod login;
mod pages;
mod session;
mod state;
mod submission;
mod subscriptions;
mod testimonials;

use actix_cors::Cors;
use actix_web::guard::{self, Guard};
use actix_web::web;
use uuid::Uuid;

pub use error::{ApiError, SUBSCRIPTION_REJECTED};
pub use session::{AdminSession, SESSION_COOKIE};
pub use state::{AppState, Stores};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(testimonials::list_testimonials))
        .route("/events", web::get().to(events::list_events))
        .route("/subscribe", web::post().to(subscriptions::subscribe))
        // Login
        .service(
            web::resource("/login")
                .route(web::get().to(login::login_form))
                .route(web::post().to(login::login)),
        )
        .service(
            web::resource("/admin")
                .route(web::get().to(login::login_form))
                .route(web::post().to(login::login)),
        )
        .route("/logout", web::post().to(login::logout))
        // Events
        .service(
            web::resource("/addEvent")
                .route(web::get().to(events::add_event_form))
                .route(web::post().to(events::create_event)),
        )
        .route("/viewEvents", web::get().to(events::view_events))
        .route("/editEvents/{id}", web::get().to(events::edit_event))
        .service(
            web::resource("/event/{id}")
                .route(web::put().to(events::update_event))
                .route(web::post().guard(method_override("PUT")).to(events::update_event)),
        )
        .service(
            web::resource("/deleteEvents/{id}")
                .route(web::delete().to(events::delete_event))
                .route(web::post().guard(method_override("DELETE")).to(events::delete_event)),
        )
        // Testimonials
        .service(
            web::resource("/admin/addTestimonial")
                .route(web::get().to(testimonials::add_testimonial_form))
                .route(web::post().to(testimonials::create_testimonial)),
        )
        .service(
            web::resource("/addTestimonial")
                .route(web::get().to(testimonials::add_testimonial_form))
                .route(web::post().to(testimonials::create_testimonial)),
        )
        .route("/admin/viewTestimonial", web::get().to(testimonials::view_testimonials))
        .service(
            web::resource("/editTestimonial/{id}")
                .route(web::get().to(testimonials::edit_testimonial))
                .route(web::put().to(testimonials::update_testimonial))
                .route(web::post().guard(method_override("PUT")).to(testimonials::update_testimonial)),
        )
        .service(
            web::resource("/deleteTestimonial/{id}")
                .route(web::delete().to(testimonials::delete_testimonial))
                .route(web::post().guard(method_override("DELETE")).to(testimonials::delete_testimonial)),
        )
        // Newsletter
        .route("/viewEmails", web::get().to(subscriptions::view_emails));
}

pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

fn method_override(method: &'static str) -> impl Guard {
    guard::fn_guard(move |ctx| {
        overridden_method(ctx.head().uri.query()).is_some_and(|m| m.eq_ignore_ascii_case(method))
    })
}

fn overridden_method(query: Option<&str>) -> Option<&str> {
    query?
        .split('&')
        .find_map(|pair| pair.strip_prefix("_method="))
}

fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
