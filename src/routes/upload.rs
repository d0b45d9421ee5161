use std::collections::HashMap;

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;

use crate::error::{AppError, AppResult};
use crate::messages;
use crate::storage::ImageUpload;

/// Multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

/// A parsed multipart form: text fields plus at most one image.
#[derive(Debug, Default)]
pub struct ImageForm {
    pub fields: HashMap<String, String>,
    pub file: Option<ImageUpload>,
}

impl ImageForm {
    /// A text field, trimmed; blank values count as absent.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

fn bad_request(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

fn rejected(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        bad_request(messages::request::FILE_TOO_LARGE)
    } else {
        tracing::debug!("Malformed multipart body: {}", err);
        bad_request(messages::request::MALFORMED)
    }
}

/// An empty part, as browsers send when no file was chosen, yields `None`.
async fn read_file(mut field: Field<'_>, max_file_size: usize) -> AppResult<Option<ImageUpload>> {
    let file_name = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);

    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(rejected)? {
        if data.len() + chunk.len() > max_file_size {
            return Err(bad_request(messages::request::FILE_TOO_LARGE));
        }
        data.extend_from_slice(&chunk);
    }

    if data.is_empty() {
        return Ok(None);
    }
    let upload = ImageUpload {
        file_name,
        content_type,
        data,
    };
    if !upload.is_image() {
        return Err(bad_request(messages::request::FILE_NOT_IMAGE));
    }
    Ok(Some(upload))
}

/// Reads every field, enforcing the size cap and image type on `file`.
pub async fn read_form(mut multipart: Multipart, max_file_size: usize) -> AppResult<ImageForm> {
    let mut form = ImageForm::default();

    while let Some(field) = multipart.next_field().await.map_err(rejected)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name == FILE_FIELD {
            form.file = read_file(field, max_file_size).await?;
        } else {
            let value = field.text().await.map_err(rejected)?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}
