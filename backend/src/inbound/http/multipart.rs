//! Multipart form decoding for upload endpoints.
//!
//! The request body is buffered by Actix (bounded by `PayloadConfig`) and
//! then split with `multer`. Parts carrying a file name become
//! [`UploadedFile`]s; the rest are collected as text fields.

use std::collections::HashMap;
use std::convert::Infallible;

use actix_web::HttpRequest;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::web::Bytes;
use futures_util::stream;
use serde_json::json;

use crate::domain::{Error, UploadedFile};

/// Decoded multipart body.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl MultipartForm {
    /// Text value of a non-file part.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Remove and return the first file sent under `name`.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        let index = self.files.iter().position(|file| file.field == name)?;
        Some(self.files.remove(index))
    }

    /// All uploaded files, in request order.
    pub fn into_files(self) -> Vec<UploadedFile> {
        self.files
    }
}

fn malformed(reason: impl std::fmt::Display) -> Error {
    Error::invalid_request("Malformed multipart body").with_details(json!({
        "reason": reason.to_string(),
    }))
}

/// Decode a buffered `multipart/form-data` body.
pub async fn read_multipart(req: &HttpRequest, body: Bytes) -> Result<MultipartForm, Error> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Error::invalid_request("Expected a multipart/form-data body"))?;
    let boundary = multer::parse_boundary(content_type)
        .map_err(|_| Error::invalid_request("Expected a multipart/form-data body"))?;

    let source = stream::once(async move { Ok::<Bytes, Infallible>(body) });
    let mut multipart = multer::Multipart::new(source, boundary);
    let mut form = MultipartForm::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_owned();
        match field.file_name().map(str::to_owned) {
            Some(file_name) => {
                let bytes = field.bytes().await.map_err(malformed)?;
                form.files.push(UploadedFile {
                    field: name,
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            None => {
                let text = field.text().await.map_err(malformed)?;
                form.fields.insert(name, text);
            }
        }
    }
    Ok(form)
}

#[cfg(test)]
pub(crate) mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    pub(crate) const BOUNDARY: &str = "adoptme-boundary";

    /// One part of a hand-built multipart body.
    pub(crate) enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a [u8]),
    }

    /// Encode `parts` as a `multipart/form-data` body using [`BOUNDARY`].
    pub(crate) fn encode(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(name, file_name, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; \
                             filename=\"{file_name}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    pub(crate) fn content_type() -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    #[actix_web::test]
    async fn splits_fields_and_files() {
        let body = encode(&[
            Part::Text("name", "Rex"),
            Part::File("image", "rex.png", b"png-bytes"),
            Part::File("document", "id.pdf", b"pdf"),
        ]);
        let req = TestRequest::post()
            .insert_header((CONTENT_TYPE, content_type()))
            .to_http_request();

        let mut form = read_multipart(&req, Bytes::from(body))
            .await
            .expect("valid multipart");

        assert_eq!(form.field("name"), Some("Rex"));
        let image = form.take_file("image").expect("image part");
        assert_eq!(image.file_name, "rex.png");
        assert_eq!(image.bytes, b"png-bytes");
        let rest = form.into_files();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].field, "document");
    }

    #[actix_web::test]
    async fn rejects_non_multipart_content() {
        let req = TestRequest::post()
            .insert_header((CONTENT_TYPE, "application/json"))
            .to_http_request();

        let error = read_multipart(&req, Bytes::from_static(b"{}"))
            .await
            .expect_err("not multipart");

        assert_eq!(error.message(), "Expected a multipart/form-data body");
    }
}
