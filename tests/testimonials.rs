mod common;

use actix_web::http::header::{CONTENT_TYPE, LOCATION};
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

use common::{multipart, Part, TestHarness};

#[actix_web::test]
async fn test_testimonial_lifecycle() {
    let harness = TestHarness::new();
    let cookie = harness.admin_cookie().await;
    let app = test::init_service(harness.app()).await;

    // Both creation paths land in the same collection
    let req = multipart(
        test::TestRequest::post().uri("/admin/addTestimonial").cookie(cookie.clone()),
        &[
            Part::Text("name", "Ada"),
            Part::Text("description", "Wonderful evening"),
            Part::File {
                name: "testimonialImage",
                filename: "ada.jpeg",
                bytes: b"portrait",
            },
        ],
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let ada: Value = test::read_body_json(resp).await;
    let ada_id = ada["id"].as_str().unwrap().to_string();
    assert!(ada["image"].as_str().unwrap().ends_with(".jpeg"));

    let req = test::TestRequest::post()
        .uri("/addTestimonial")
        .cookie(cookie.clone())
        .set_form([("name", "Grace"), ("description", "Lovely staff")])
        .to_request();
    let grace: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(grace["image"], "");

    // Public landing page lists both in creation order
    let testimonials: Vec<Value> =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(testimonials.len(), 2);
    assert_eq!(testimonials[0]["name"], "Ada");
    assert_eq!(testimonials[1]["name"], "Grace");

    // Name-only update keeps description and image
    let req = test::TestRequest::put()
        .uri(&format!("/editTestimonial/{ada_id}"))
        .cookie(cookie.clone())
        .set_json(serde_json::json!({ "name": "Ada L." }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["name"], "Ada L.");
    assert_eq!(updated["description"], "Wonderful evening");
    assert_eq!(updated["image"], ada["image"]);

    // Edit view
    let req = test::TestRequest::get()
        .uri(&format!("/editTestimonial/{ada_id}"))
        .cookie(cookie.clone())
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["name"], "Ada L.");

    // Delete twice: the second one finds nothing and goes back to the list
    let req = test::TestRequest::delete()
        .uri(&format!("/deleteTestimonial/{ada_id}"))
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let removed: Value = test::read_body_json(resp).await;
    assert_eq!(removed["id"], ada_id.as_str());

    let req = test::TestRequest::delete()
        .uri(&format!("/deleteTestimonial/{ada_id}"))
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/admin/viewTestimonial");

    let req = test::TestRequest::get()
        .uri("/admin/viewTestimonial")
        .cookie(cookie)
        .to_request();
    let remaining: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["name"], "Grace");
}

#[actix_web::test]
async fn test_create_requires_name() {
    let harness = TestHarness::new();
    let cookie = harness.admin_cookie().await;
    let app = test::init_service(harness.app()).await;

    let req = test::TestRequest::post()
        .uri("/admin/addTestimonial")
        .cookie(cookie)
        .set_form([("name", ""), ("description", "Lovely staff")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_bad_id_redirects_edit_view() {
    let harness = TestHarness::new();
    let cookie = harness.admin_cookie().await;
    let app = test::init_service(harness.app()).await;

    let req = test::TestRequest::get()
        .uri("/editTestimonial/not-an-id")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "/admin/viewTestimonial");
}

#[actix_web::test]
async fn test_add_form_is_html() {
    let harness = TestHarness::new();
    let cookie = harness.admin_cookie().await;
    let app = test::init_service(harness.app()).await;

    let req = test::TestRequest::get()
        .uri("/admin/addTestimonial")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("testimonialImage"));
}

#[actix_web::test]
async fn test_update_with_malformed_id_is_500() {
    let harness = TestHarness::new();
    let cookie = harness.admin_cookie().await;
    let app = test::init_service(harness.app()).await;

    let req = test::TestRequest::put()
        .uri("/editTestimonial/not-an-id")
        .cookie(cookie)
        .set_form([("name", "Ada")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("not-an-id"));
}
