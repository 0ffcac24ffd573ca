use crate::domain::product::{NewProduct, NewProductImage, Product, ProductUpdate};
use crate::domain::slug::normalize_slug;
use crate::domain::types::{ProductId, ProductImageId};
use crate::dto::{ProductDto, ProductImageDto};
use crate::forms::FormErrors;
use crate::forms::products::{IMAGES, ProductImagePayload, ProductPayload};
use crate::media::MediaPipeline;
use crate::repository::{ProductReader, ProductWriter, RepositoryError};
use crate::services::media::{commit_images, prepare_image};

use super::{ServiceError, ServiceResult};

/// Store the gallery files, then persist the product and its images.
pub async fn create_product<R>(
    payload: ProductPayload,
    repo: &R,
    media: &MediaPipeline,
) -> ServiceResult<ProductDto>
where
    R: ProductWriter,
{
    let images = store_gallery(payload.images.unwrap_or_default(), media).await?;

    let product = NewProduct {
        name: payload.name,
        blurb: payload.blurb,
        meta: payload.meta.flatten(),
        images,
    };

    match repo.create_product(&product) {
        Ok(product) => {
            log::info!("Created product {} ({})", product.id, product.name);
            Ok(ProductDto::from(product))
        }
        Err(e) => {
            log::error!("Failed to create product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Find the product addressed by a URL slug.
pub fn find_product<R>(slug: &str, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader,
{
    let name = normalize_slug(slug);
    match repo.find_product_by_name(&name) {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to look up product '{name}': {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_product<R>(slug: &str, repo: &R) -> ServiceResult<ProductDto>
where
    R: ProductReader,
{
    find_product(slug, repo).map(ProductDto::from)
}

pub async fn update_product<R>(
    slug: &str,
    payload: ProductPayload,
    repo: &R,
    media: &MediaPipeline,
) -> ServiceResult<ProductDto>
where
    R: ProductReader + ProductWriter,
{
    let product = find_product(slug, repo)?;
    apply_product_update(product.id, payload, repo, media).await
}

/// Apply a validated update to the product with `id`.
///
/// Metadata and gallery are only replaced when the payload carries them.
pub async fn apply_product_update<R>(
    id: ProductId,
    payload: ProductPayload,
    repo: &R,
    media: &MediaPipeline,
) -> ServiceResult<ProductDto>
where
    R: ProductWriter,
{
    let images = match payload.images {
        Some(images) => Some(store_gallery(images, media).await?),
        None => None,
    };

    let update = ProductUpdate {
        name: payload.name,
        blurb: payload.blurb,
        meta: payload.meta,
        images,
    };

    match repo.update_product(id, &update) {
        Ok(product) => Ok(ProductDto::from(product)),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to update product {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_product_image<R>(id: i32, repo: &R) -> ServiceResult<ProductImageDto>
where
    R: ProductReader,
{
    let id = ProductImageId::new(id).map_err(|_| ServiceError::NotFound)?;
    match repo.get_product_image_by_id(id) {
        Ok(Some(image)) => Ok(ProductImageDto::from(image)),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get product image {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Validate every gallery image, then write them. Nothing is written when
/// any image is rejected.
async fn store_gallery(
    images: Vec<ProductImagePayload>,
    media: &MediaPipeline,
) -> ServiceResult<Vec<NewProductImage>> {
    let mut errors = FormErrors::default();
    let mut prepared = Vec::with_capacity(images.len());
    let mut details = Vec::with_capacity(images.len());

    for image in images {
        let key = format!("{IMAGES}[{}].image", image.index);
        if let Some(ready) = prepare_image(media, image.source, true, &key, &mut errors).await? {
            prepared.push(ready);
            details.push((image.order, image.caption));
        }
    }
    if !errors.is_empty() {
        return Err(ServiceError::Form(errors));
    }

    let stored = commit_images(media, prepared).await?;
    Ok(stored
        .into_iter()
        .zip(details)
        .map(|(stored, (order, caption))| NewProductImage {
            image: stored.image,
            thumbnail: stored.thumbnail,
            order,
            caption,
        })
        .collect())
}
