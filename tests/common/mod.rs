#![allow(dead_code)]

use actix_web::cookie::Cookie;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::CONTENT_TYPE;
use actix_web::test::TestRequest;
use actix_web::{web, App};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use promo_cms::auth::{AuthGate, Credentials, SessionStore, StaticCredentialProvider};
use promo_cms::http::{configure, AppState, Stores, SESSION_COOKIE};
use promo_cms::media::ImageAttachmentHandler;
use promo_cms::metrics::Metrics;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const UPLOAD_LIMIT: usize = 64 * 1024;

const BOUNDARY: &str = "promo-cms-test-boundary";

pub struct TestHarness {
    pub upload_dir: TempDir,
    pub metrics: Arc<Metrics>,
    pub state: web::Data<AppState>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::build(Stores::in_memory(), UPLOAD_LIMIT)
    }

    pub fn build(stores: Stores, upload_max_bytes: usize) -> Self {
        let upload_dir = tempfile::tempdir().expect("temp upload dir");
        let metrics = Arc::new(Metrics::new().expect("metrics registry"));
        let images = Arc::new(ImageAttachmentHandler::new(upload_dir.path(), metrics.clone()));
        let auth = AuthGate::new(
            Arc::new(StaticCredentialProvider::new(ADMIN_USERNAME, ADMIN_PASSWORD)),
            SessionStore::new(Duration::from_secs(60)),
            metrics.clone(),
        );
        let state = web::Data::new(AppState::new(stores, images, auth, metrics.clone(), upload_max_bytes));

        Self {
            upload_dir,
            metrics,
            state,
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(self.state.clone()).configure(configure)
    }

    /// Session cookie for the configured admin, issued without going through HTTP
    pub async fn admin_cookie(&self) -> Cookie<'static> {
        let token = self
            .state
            .auth
            .login(&Credentials {
                username: ADMIN_USERNAME.to_string(),
                password: ADMIN_PASSWORD.to_string(),
            })
            .await
            .expect("admin login");
        Cookie::new(SESSION_COOKIE, token)
    }

    /// Names of the files currently in the upload directory
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir.path())
            .expect("read upload dir")
            .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        bytes: &'a [u8],
    },
}

/// Attach a multipart/form-data body built from `parts`
pub fn multipart(req: TestRequest, parts: &[Part<'_>]) -> TestRequest {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File { name, filename, bytes } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: image/jpeg\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    req.insert_header((CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}")))
        .set_payload(body)
}
