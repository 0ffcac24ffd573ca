//! Media helpers shared by the image-bearing services.

use crate::forms::FormErrors;
use crate::media::{ImageSource, MediaPipeline, PreparedImage, StoredImage};

use super::{ServiceError, ServiceResult};

/// Decode one image, reporting submission problems under `key`.
///
/// Returns `Ok(None)` after recording a validation error so that callers can
/// keep collecting errors for the remaining fields. Nothing is written.
pub async fn prepare_image(
    media: &MediaPipeline,
    source: ImageSource,
    with_thumbnail: bool,
    key: &str,
    errors: &mut FormErrors,
) -> ServiceResult<Option<PreparedImage>> {
    match media.prepare(source, with_thumbnail).await {
        Ok(prepared) => Ok(Some(prepared)),
        Err(e) if e.is_client_error() => {
            errors.add(key, e.to_string());
            Ok(None)
        }
        Err(e) => {
            log::error!("Failed to process image for {key}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Write images that all passed [`prepare_image`].
pub async fn commit_images(
    media: &MediaPipeline,
    images: Vec<PreparedImage>,
) -> ServiceResult<Vec<StoredImage>> {
    let count = images.len();
    media.commit(images).await.map_err(|e| {
        log::error!("Failed to write {count} image(s): {e}");
        ServiceError::Internal
    })
}
