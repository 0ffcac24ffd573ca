use crate::domain::landing_page::NewLandingPageImage;
use crate::domain::types::LandingPageImageId;
use crate::dto::{LandingPageHeroDto, LandingPageImageDto};
use crate::forms::FormErrors;
use crate::forms::landing_page::LandingPageImagePayload;
use crate::media::MediaPipeline;
use crate::repository::{LandingPageImageReader, LandingPageImageWriter};
use crate::services::media::{commit_images, prepare_image};

use super::{ServiceError, ServiceResult};

/// A uniformly random hero image, or `None` when none were uploaded.
pub fn random_landing_page_image<R>(repo: &R) -> ServiceResult<Option<LandingPageHeroDto>>
where
    R: LandingPageImageReader,
{
    match repo.random_landing_page_image() {
        Ok(image) => Ok(image.map(LandingPageHeroDto::from)),
        Err(e) => {
            log::error!("Failed to pick landing page image: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_landing_page_image<R>(id: i32, repo: &R) -> ServiceResult<LandingPageImageDto>
where
    R: LandingPageImageReader,
{
    let id = LandingPageImageId::new(id).map_err(|_| ServiceError::NotFound)?;
    match repo.get_landing_page_image_by_id(id) {
        Ok(Some(image)) => Ok(LandingPageImageDto::from(image)),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get landing page image {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub async fn create_landing_page_image<R>(
    payload: LandingPageImagePayload,
    repo: &R,
    media: &MediaPipeline,
) -> ServiceResult<LandingPageImageDto>
where
    R: LandingPageImageWriter,
{
    let mut errors = FormErrors::default();
    let prepared = prepare_image(media, payload.source, true, "image", &mut errors).await?;
    let Some(prepared) = prepared else {
        return Err(ServiceError::Form(errors));
    };
    let Some(stored) = commit_images(media, vec![prepared]).await?.pop() else {
        log::error!("Landing page image was not written");
        return Err(ServiceError::Internal);
    };

    let image = NewLandingPageImage {
        image: stored.image,
        thumbnail: stored.thumbnail,
    };
    match repo.create_landing_page_image(&image) {
        Ok(image) => Ok(LandingPageImageDto::from(image)),
        Err(e) => {
            log::error!("Failed to create landing page image: {e}");
            Err(ServiceError::Internal)
        }
    }
}
