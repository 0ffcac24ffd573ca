//! JSON shapes returned by the HTTP API.

use serde::Serialize;

pub mod landing_page;
pub mod menu_lists;
pub mod products;

pub use landing_page::{LandingPageHeroDto, LandingPageImageDto};
pub use menu_lists::{MenuListDto, MenuListItemDto};
pub use products::{ProductDto, ProductImageDto};

/// Envelope used by every read response: `{"body": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Body<T> {
    pub body: T,
}

impl<T> Body<T> {
    pub fn new(body: T) -> Self {
        Self { body }
    }
}

/// Result of a slug lookup that may match either aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntryDto {
    MenuList(MenuListDto),
    Product(ProductDto),
}
