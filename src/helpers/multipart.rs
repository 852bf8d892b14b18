//! Helpers to parse HTML form submissions.
//!
//! Forms are submitted either as `application/x-www-form-urlencoded` or, when they contain a
//! file input, as `multipart/form-data`. Both are handled by [`parse_form_data`].

use std::collections::HashMap;
use std::convert::Infallible;

use actix_web::web::Bytes;
use mime::Mime;

/// Error that can occur while parsing form data.
#[derive(Debug, thiserror::Error)]
pub enum FormDataError {
    /// The multipart body could not be parsed.
    #[error("invalid multipart form data")]
    Multipart(#[from] multer::Error),

    /// The urlencoded body could not be parsed.
    #[error("invalid urlencoded form data")]
    UrlEncoded(#[from] serde_urlencoded::de::Error),
}

/// A file uploaded through a `multipart/form-data` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Name of the file on the client's machine, if provided.
    pub file_name: Option<String>,

    /// Content type announced by the client, if any. Not to be trusted.
    pub content_type: Option<Mime>,

    /// Content of the file.
    pub data: Bytes,
}

/// Parsed content of an HTML form.
///
/// When a field is specified more than once, the last value wins.
#[derive(Debug, Default, Clone)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    /// Returns the value of a text field, if it was submitted.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Returns the file uploaded for a file field, if any.
    ///
    /// Browsers submit an empty part for file inputs left blank; those are not reported.
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }

    /// Removes and returns the file uploaded for a file field, if any.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}

/// Parses the body of a form submission according to its `Content-Type` header.
///
/// # Errors
///
/// * [`UnsupportedMediaType`](crate::Error::UnsupportedMediaType) if the content type is neither
///   urlencoded nor multipart.
/// * [`FormData`](crate::Error::FormData) if the body cannot be parsed.
pub async fn parse_form_data(content_type: Option<&str>, body: Bytes) -> crate::Result<FormData> {
    let content_type = content_type.unwrap_or_default();
    let mime: Option<Mime> = content_type.parse().ok();

    match mime {
        Some(mime) if mime.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str() => {
            parse_urlencoded(&body)
        },
        Some(mime) if mime.essence_str() == mime::MULTIPART_FORM_DATA.essence_str() => {
            parse_multipart(content_type, body).await
        },
        _ => Err(crate::Error::UnsupportedMediaType { content_type: content_type.into() }),
    }
}

fn parse_urlencoded(body: &[u8]) -> crate::Result<FormData> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)?;

    Ok(FormData { fields: pairs.into_iter().collect(), files: HashMap::new() })
}

async fn parse_multipart(content_type: &str, body: Bytes) -> crate::Result<FormData> {
    let boundary = multer::parse_boundary(content_type)?;
    let stream = futures::stream::once(async move { Ok::<_, Infallible>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut form_data = FormData::default();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        match field.file_name().map(ToOwned::to_owned) {
            Some(file_name) => {
                let content_type = field.content_type().cloned();
                let data = field.bytes().await?;
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }

                let file_name = Some(file_name).filter(|file_name| !file_name.is_empty());
                form_data
                    .files
                    .insert(name, UploadedFile { file_name, content_type, data });
            },
            None => {
                let value = field.text().await?;
                form_data.fields.insert(name, value);
            },
        }
    }

    Ok(form_data)
}
