use serde::Serialize;
use serde_json::Value;

use crate::domain::product::{Product, ProductImage};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub blurb: String,
    pub meta: Option<Value>,
    pub images: Vec<ProductImageDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductImageDto {
    pub id: i32,
    pub image: String,
    pub thumbnail: Option<String>,
    pub order: i32,
    pub caption: String,
}

impl From<Product> for ProductDto {
    fn from(value: Product) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            blurb: value.blurb.into_inner(),
            meta: value.meta,
            images: value.images.into_iter().map(ProductImageDto::from).collect(),
        }
    }
}

impl From<ProductImage> for ProductImageDto {
    fn from(value: ProductImage) -> Self {
        Self {
            id: value.id.get(),
            image: value.image.into_inner(),
            thumbnail: value.thumbnail.map(|t| t.into_inner()),
            order: value.order.get(),
            caption: value.caption.into_inner(),
        }
    }
}
