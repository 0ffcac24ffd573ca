use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::types::{
    DisplayOrder, ImageCaption, ImageName, ProductBlurb, ProductId, ProductImageId, ProductName,
};

/// A product shown on the marketing site together with its gallery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub blurb: ProductBlurb,
    /// Free-form metadata maintained by the editorial tool.
    pub meta: Option<Value>,
    pub created_on: NaiveDateTime,
    /// Gallery sorted by `order`.
    pub images: Vec<ProductImage>,
}

/// A single gallery image belonging to a [`Product`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductImage {
    pub id: ProductImageId,
    pub product_id: ProductId,
    pub image: ImageName,
    pub thumbnail: Option<ImageName>,
    pub order: DisplayOrder,
    pub caption: ImageCaption,
    pub created_on: NaiveDateTime,
}

/// Information required to create a new [`Product`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: ProductName,
    pub blurb: ProductBlurb,
    pub meta: Option<Value>,
    pub images: Vec<NewProductImage>,
}

/// Gallery entry whose files have already been written to media storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProductImage {
    pub image: ImageName,
    pub thumbnail: Option<ImageName>,
    pub order: DisplayOrder,
    pub caption: ImageCaption,
}

/// Changes applied to an existing [`Product`].
///
/// `meta` and `images` are only touched when present; `Some(None)` clears the
/// metadata and `Some(vec![])` empties the gallery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductUpdate {
    pub name: ProductName,
    pub blurb: ProductBlurb,
    pub meta: Option<Option<Value>>,
    pub images: Option<Vec<NewProductImage>>,
}
