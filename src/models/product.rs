use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductImage as DomainProductImage,
};
use crate::domain::types::{ProductBlurb, ProductName, TypeConstraintError};
use crate::domain::slug::name_key;
use crate::models::meta_from_column;
use crate::models::product_image::ProductImage;

/// Diesel model representing a row in the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub blurb: String,
    pub meta: Option<String>,
    pub created_on: NaiveDateTime,
    pub name_key: String,
}

/// Insertable form of [`Product`] used for creating new rows.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewProduct {
    pub name: String,
    pub blurb: String,
    pub meta: Option<String>,
    pub created_on: NaiveDateTime,
    pub name_key: String,
}

impl NewProduct {
    pub fn from_domain(product: &DomainNewProduct, created_on: NaiveDateTime) -> Self {
        Self {
            name: product.name.as_str().to_string(),
            blurb: product.blurb.as_str().to_string(),
            meta: product.meta.as_ref().map(ToString::to_string),
            created_on,
            name_key: name_key(product.name.as_str()),
        }
    }
}

impl TryFrom<(Product, Vec<ProductImage>)> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from((product, images): (Product, Vec<ProductImage>)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: product.id.try_into()?,
            name: ProductName::new(product.name)?,
            blurb: ProductBlurb::new(product.blurb)?,
            meta: meta_from_column(product.meta)?,
            created_on: product.created_on,
            images: images
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<DomainProductImage>, _>>()?,
        })
    }
}
