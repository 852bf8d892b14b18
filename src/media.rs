//! Storage of uploaded media files (Pokemon pictures).
//!
//! Files are stored under the [media root](crate::settings::Settings::media_root) and served back
//! under `/media/`. The database only stores their path relative to the media root.

use std::io;
use std::path::{Component, Path, PathBuf};

use actix_web::http::header::ContentType;
use actix_web::web::{Data, ServiceConfig};
use actix_web::{get, web, HttpResponse};
use log::{debug, info, trace, warn};
use uuid::Uuid;

use crate::error::MediaContext;
use crate::forms::image_extension;
use crate::helpers::multipart::UploadedFile;
use crate::pages::PageResult;
use crate::settings::Settings;

/// Directory, relative to the media root, where Pokemon pictures are stored.
pub const PICTURES_DIR: &str = "pokemon";

/// Registers the endpoint serving media files.
///
/// Called automatically from [`configure_app`](crate::configure_app).
pub fn configure(config: &mut ServiceConfig) {
    trace!("Adding media endpoint");
    config.service(serve);
}

/// Stores an uploaded Pokemon picture under the media root.
///
/// The file gets a new unique name; its extension is determined from the content of the file.
/// Returns the path of the stored file, relative to the media root.
pub async fn store_picture(settings: &Settings, picture: &UploadedFile) -> crate::Result<String> {
    let extension = image_extension(&picture.data).unwrap_or("bin");
    let relative_path = format!("{}/{}.{}", PICTURES_DIR, Uuid::new_v4(), extension);

    let directory = settings.media_root.join(PICTURES_DIR);
    tokio::fs::create_dir_all(&directory)
        .await
        .with_media_context(|| format!("failed to create media directory {:?}", directory))?;

    let path = settings.media_root.join(&relative_path);
    tokio::fs::write(&path, &picture.data)
        .await
        .with_media_context(|| format!("failed to write picture to {:?}", path))?;
    info!("Stored picture {} ({} bytes)", relative_path, picture.data.len());

    Ok(relative_path)
}

/// Removes a stored picture if `result` is an error, then returns `result` unchanged.
///
/// Used when saving a Pokemon fails after its new picture has been stored, so the picture does not
/// linger under the media root. Failing to remove the picture is only logged.
pub async fn remove_picture_on_error<T>(
    result: crate::Result<T>,
    settings: &Settings,
    picture_path: Option<&str>,
) -> crate::Result<T> {
    if let (Err(_), Some(picture_path)) = (&result, picture_path) {
        if let Err(err) = remove_picture(settings, picture_path).await {
            warn!("Failed to remove orphan picture {}: {}", picture_path, err);
        }
    }

    result
}

/// Removes a stored picture, given its path relative to the media root.
pub async fn remove_picture(settings: &Settings, relative_path: &str) -> crate::Result<()> {
    let Some(path) = media_path(&settings.media_root, relative_path) else {
        return Err(io::Error::from(io::ErrorKind::NotFound)
            .with_media_context(|| format!("invalid media path {:?}", relative_path)));
    };

    tokio::fs::remove_file(&path)
        .await
        .with_media_context(|| format!("failed to remove picture {:?}", path))?;
    info!("Removed picture {}", relative_path);

    Ok(())
}

/// Resolves the path of a media file, relative to the media root.
///
/// Returns `None` if the path is empty or tries to escape the media root.
pub fn media_path(media_root: &Path, relative_path: &str) -> Option<PathBuf> {
    let relative_path = Path::new(relative_path);
    let mut components = relative_path.components().peekable();
    components.peek()?;

    components
        .all(|component| matches!(component, Component::Normal(_)))
        .then(|| media_root.join(relative_path))
}

/// Serves a file stored under the media root.
///
/// Registered as `GET /media/{path}`. Unknown files (and paths outside the media root) result
/// in a 404 page.
#[get("/media/{path:.*}", name = "media")]
pub async fn serve(path: web::Path<String>, settings: Data<Settings>) -> PageResult {
    let relative_path = path.into_inner();
    let Some(full_path) = media_path(&settings.media_root, &relative_path) else {
        debug!("Rejecting media path {:?}", relative_path);
        return Err(io::Error::from(io::ErrorKind::NotFound)
            .with_media_context(|| format!("invalid media path {:?}", relative_path))
            .into());
    };

    let content = tokio::fs::read(&full_path)
        .await
        .with_media_context(|| format!("failed to read media file {:?}", full_path))?;
    let mime = mime_guess::from_path(&full_path).first_or_octet_stream();

    Ok(HttpResponse::Ok()
        .insert_header(ContentType(mime))
        .body(content))
}
