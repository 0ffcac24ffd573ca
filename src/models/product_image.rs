use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProductImage as DomainNewProductImage, ProductImage as DomainProductImage,
};
use crate::domain::types::{ImageCaption, ImageName, TypeConstraintError};

/// Diesel model representing the `product_images` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct ProductImage {
    pub id: i32,
    pub product_id: i32,
    pub image: String,
    pub thumbnail: Option<String>,
    pub sort_order: i32,
    pub caption: String,
    pub created_on: NaiveDateTime,
}

/// Insertable form of [`ProductImage`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::product_images)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewProductImage<'a> {
    pub product_id: i32,
    pub image: &'a str,
    pub thumbnail: Option<&'a str>,
    pub sort_order: i32,
    pub caption: &'a str,
    pub created_on: NaiveDateTime,
}

impl<'a> NewProductImage<'a> {
    pub fn from_domain(
        product_id: i32,
        image: &'a DomainNewProductImage,
        created_on: NaiveDateTime,
    ) -> Self {
        Self {
            product_id,
            image: image.image.as_str(),
            thumbnail: image.thumbnail.as_ref().map(|t| t.as_str()),
            sort_order: image.order.get(),
            caption: image.caption.as_str(),
            created_on,
        }
    }
}

impl TryFrom<ProductImage> for DomainProductImage {
    type Error = TypeConstraintError;

    fn try_from(image: ProductImage) -> Result<Self, Self::Error> {
        Ok(Self {
            id: image.id.try_into()?,
            product_id: image.product_id.try_into()?,
            image: ImageName::new(image.image)?,
            thumbnail: image.thumbnail.map(ImageName::new).transpose()?,
            order: image.sort_order.try_into()?,
            caption: ImageCaption::new(image.caption)?,
            created_on: image.created_on,
        })
    }
}
