//! Image handling for image-bearing records.
//!
//! Every image write goes through [`MediaPipeline::store`]: the original is
//! written to storage, a thumbnail is regenerated when the record carries one
//! and the CDN is asked to drop its cached copies of the written files.

use std::sync::Arc;

use actix_web::web;
use thiserror::Error;

use crate::domain::types::{ImageName, TypeConstraintError};

pub mod cdn;
pub mod storage;
pub mod thumbnail;

pub use cdn::{CdnInvalidator, CloudFrontInvalidator, NoopInvalidator};
pub use storage::{LocalMediaStorage, MediaStorage, stored_file_name};
pub use thumbnail::{Thumbnailer, thumbnail_name};

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("invalid file name: {0}")]
    InvalidName(String),
    #[error("file not found: {0}")]
    Missing(String),
    #[error("not a supported image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("media storage failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("CDN invalidation failed: {0}")]
    Cdn(String),
    #[error("image processing task failed: {0}")]
    Task(String),
    #[error(transparent)]
    TypeConstraint(#[from] TypeConstraintError),
}

impl MediaError {
    /// Whether the error was caused by the submitted data rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MediaError::InvalidName(_)
                | MediaError::Missing(_)
                | MediaError::Decode(_)
                | MediaError::TypeConstraint(_)
        )
    }
}

/// A file received in a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Where the image of a record comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A freshly uploaded file.
    Upload(UploadedFile),
    /// The name of a file already present in storage.
    Existing(String),
}

/// Names written by [`MediaPipeline::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub image: ImageName,
    pub thumbnail: Option<ImageName>,
}

/// An image that decoded successfully and whose thumbnail is rendered in
/// memory. Nothing has been written yet.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    image: ImageName,
    /// Bytes of a fresh upload; `None` when the image is already stored.
    original: Option<Vec<u8>>,
    thumbnail: Option<(ImageName, Vec<u8>)>,
}

#[derive(Clone)]
pub struct MediaPipeline {
    storage: Arc<dyn MediaStorage>,
    thumbnailer: Thumbnailer,
    cdn: Arc<dyn CdnInvalidator>,
}

impl MediaPipeline {
    pub fn new(
        storage: Arc<dyn MediaStorage>,
        thumbnailer: Thumbnailer,
        cdn: Arc<dyn CdnInvalidator>,
    ) -> Self {
        Self {
            storage,
            thumbnailer,
            cdn,
        }
    }

    pub fn storage(&self) -> &dyn MediaStorage {
        self.storage.as_ref()
    }

    /// Decode `source` and, when `with_thumbnail` is set, render its thumbnail.
    ///
    /// Storage is only read, so a rejected image leaves every stored file as
    /// it was.
    pub async fn prepare(
        &self,
        source: ImageSource,
        with_thumbnail: bool,
    ) -> Result<PreparedImage, MediaError> {
        let storage = Arc::clone(&self.storage);
        let thumbnailer = self.thumbnailer;

        web::block(move || prepare_image(storage.as_ref(), &thumbnailer, source, with_thumbnail))
            .await
            .map_err(|e| MediaError::Task(e.to_string()))?
    }

    /// Write prepared images and their thumbnails, then invalidate the CDN.
    ///
    /// Invalidation failure is logged and does not fail the commit.
    pub async fn commit(&self, images: Vec<PreparedImage>) -> Result<Vec<StoredImage>, MediaError> {
        let storage = Arc::clone(&self.storage);

        let (stored, written) = web::block(move || write_prepared(storage.as_ref(), images))
            .await
            .map_err(|e| MediaError::Task(e.to_string()))??;

        if !written.is_empty() {
            if let Err(e) = self.cdn.invalidate(&written).await {
                log::warn!("Failed to invalidate CDN paths {written:?}: {e}");
            }
        }

        Ok(stored)
    }

    /// [`MediaPipeline::prepare`] followed by [`MediaPipeline::commit`] for a single image.
    pub async fn store(
        &self,
        source: ImageSource,
        with_thumbnail: bool,
    ) -> Result<StoredImage, MediaError> {
        let prepared = self.prepare(source, with_thumbnail).await?;
        self.commit(vec![prepared])
            .await?
            .pop()
            .ok_or_else(|| MediaError::Task("no image was written".into()))
    }
}

/// Blocking part of [`MediaPipeline::prepare`]. Every upload is fully decoded.
fn prepare_image(
    storage: &dyn MediaStorage,
    thumbnailer: &Thumbnailer,
    source: ImageSource,
    with_thumbnail: bool,
) -> Result<PreparedImage, MediaError> {
    let (name, original, decoded) = match source {
        ImageSource::Upload(file) => {
            let name = stored_file_name(&file.file_name)?;
            let decoded = image::load_from_memory(&file.bytes)?;
            (name, Some(file.bytes), Some(decoded))
        }
        ImageSource::Existing(name) => {
            let name = name.trim().to_string();
            if !storage.exists(&name) {
                return Err(MediaError::Missing(name));
            }
            (name, None, None)
        }
    };

    let thumbnail = if with_thumbnail {
        let decoded = match decoded {
            Some(decoded) => decoded,
            None => image::load_from_memory(&storage.open(&name)?)?,
        };
        let thumb_name = ImageName::new(thumbnail_name(&name))?;
        Some((thumb_name, thumbnailer.render_image(&decoded)?))
    } else {
        None
    };

    Ok(PreparedImage {
        image: ImageName::new(name)?,
        original,
        thumbnail,
    })
}

/// Blocking part of [`MediaPipeline::commit`]. Returns the stored names and
/// the files that were (re)written.
fn write_prepared(
    storage: &dyn MediaStorage,
    images: Vec<PreparedImage>,
) -> Result<(Vec<StoredImage>, Vec<String>), MediaError> {
    let mut stored = Vec::with_capacity(images.len());
    let mut written = Vec::new();

    for prepared in images {
        if let Some(bytes) = &prepared.original {
            storage.save(prepared.image.as_str(), bytes)?;
            written.push(prepared.image.as_str().to_string());
        }
        let thumbnail = match prepared.thumbnail {
            Some((name, bytes)) => {
                storage.save(name.as_str(), &bytes)?;
                written.push(name.as_str().to_string());
                Some(name)
            }
            None => None,
        };
        stored.push(StoredImage {
            image: prepared.image,
            thumbnail,
        });
    }

    Ok((stored, written))
}
