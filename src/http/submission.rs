use std::collections::HashMap;

use actix_multipart::Multipart;
use actix_web::dev::{self, UrlEncoded};
use actix_web::error::UrlencodedError;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::TryStreamExt;

use crate::media::ImageUpload;

use super::error::ApiError;

// ============================================================================
// Request Body Reader
// ============================================================================
//
// Browsers post multipart forms (with an optional image part) or urlencoded
// forms; scripted clients post JSON. All three are reduced to named text
// fields plus uploaded files keyed by their form field name.
//
// A file part with an empty filename and no bytes is an unused file input and
// counts as no upload.
//
// ============================================================================

#[derive(Debug, Default)]
pub struct Submission {
    fields: HashMap<String, String>,
    files: HashMap<String, ImageUpload>,
}

impl Submission {
    pub async fn read(
        req: &HttpRequest,
        mut payload: dev::Payload,
        max_bytes: usize,
    ) -> Result<Self, ApiError> {
        match req.content_type() {
            "multipart/form-data" => {
                let multipart = Multipart::from_request(req, &mut payload)
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                read_multipart(multipart, max_bytes).await
            }
            "application/json" => {
                let body = read_limited(&mut payload, max_bytes).await?;
                let fields: HashMap<String, serde_json::Value> =
                    serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
                Ok(Self {
                    fields: json_fields(fields),
                    files: HashMap::new(),
                })
            }
            "application/x-www-form-urlencoded" => {
                let form = UrlEncoded::<HashMap<String, String>>::new(req, &mut payload)
                    .limit(max_bytes)
                    .await
                    .map_err(|e| match e {
                        UrlencodedError::Overflow { .. } => too_large(max_bytes),
                        other => ApiError::BadRequest(other.to_string()),
                    })?;
                Ok(Self {
                    fields: form,
                    files: HashMap::new(),
                })
            }
            // No recognised body: every field counts as omitted
            _ => Ok(Self::default()),
        }
    }

    pub fn field(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    pub fn file(&mut self, name: &str) -> Option<ImageUpload> {
        self.files.remove(name)
    }
}

async fn read_multipart(mut multipart: Multipart, max_bytes: usize) -> Result<Submission, ApiError> {
    let mut submission = Submission::default();
    let mut total = 0usize;

    while let Some(mut field) = multipart
        .try_next()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?
        {
            total += chunk.len();
            if total > max_bytes {
                return Err(too_large(max_bytes));
            }
            bytes.extend_from_slice(&chunk);
        }

        match filename {
            Some(filename) if filename.is_empty() && bytes.is_empty() => {}
            Some(filename) => {
                submission.files.insert(
                    name,
                    ImageUpload {
                        original_filename: filename,
                        bytes,
                    },
                );
            }
            None => {
                submission
                    .fields
                    .insert(name, String::from_utf8_lossy(&bytes).into_owned());
            }
        }
    }

    Ok(submission)
}

async fn read_limited(payload: &mut dev::Payload, max_bytes: usize) -> Result<Vec<u8>, ApiError> {
    let mut body = Vec::new();
    while let Some(chunk) = payload
        .try_next()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if body.len() + chunk.len() > max_bytes {
            return Err(too_large(max_bytes));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn too_large(limit: usize) -> ApiError {
    tracing::warn!(limit = limit, "Rejected oversized submission");
    ApiError::PayloadTooLarge { limit }
}

fn json_fields(body: HashMap<String, serde_json::Value>) -> HashMap<String, String> {
    body.into_iter()
        .filter_map(|(name, value)| match value {
            serde_json::Value::String(text) => Some((name, text)),
            serde_json::Value::Null => None,
            other => Some((name, other.to_string())),
        })
        .collect()
}
