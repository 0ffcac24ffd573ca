use serde_json::Value;

use crate::db::{DbConnection, DbPool};
use crate::domain::drop_down_menu::DropDownMenu;
use crate::domain::landing_page::{LandingPageImage, NewLandingPageImage};
use crate::domain::menu_list::{MenuList, MenuListItem, MenuListUpdate, NewMenuList};
use crate::domain::product::{NewProduct, Product, ProductImage, ProductUpdate};
use crate::domain::types::{
    LandingPageImageId, MenuListId, MenuListItemId, ProductId, ProductImageId,
};

pub mod drop_down_menu;
pub mod errors;
pub mod landing_page;
pub mod menu_list;
pub mod product;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for products and their galleries.
pub trait ProductReader {
    /// Retrieve a product with its gallery by identifier.
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
    /// Case-insensitive name lookup; the lowest id wins when names collide.
    fn find_product_by_name(&self, name: &str) -> RepositoryResult<Option<Product>>;
    /// Retrieve a single gallery image.
    fn get_product_image_by_id(&self, id: ProductImageId)
    -> RepositoryResult<Option<ProductImage>>;
}

/// Write operations for products.
pub trait ProductWriter {
    /// Persist a product and its gallery atomically.
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
    /// Apply an update, replacing the gallery when one is supplied.
    fn update_product(&self, id: ProductId, update: &ProductUpdate) -> RepositoryResult<Product>;
}

/// Read-only operations for menu lists and their items.
pub trait MenuListReader {
    /// Retrieve a menu list with its items by identifier.
    fn get_menu_list_by_id(&self, id: MenuListId) -> RepositoryResult<Option<MenuList>>;
    /// Case-insensitive name lookup; the lowest id wins when names collide.
    fn find_menu_list_by_name(&self, name: &str) -> RepositoryResult<Option<MenuList>>;
    /// Retrieve a single menu item.
    fn get_menu_list_item_by_id(
        &self,
        id: MenuListItemId,
    ) -> RepositoryResult<Option<MenuListItem>>;
}

/// Write operations for menu lists.
pub trait MenuListWriter {
    /// Persist a menu list and its items atomically.
    fn create_menu_list(&self, menu_list: &NewMenuList) -> RepositoryResult<MenuList>;
    /// Apply an update, replacing the items when they are supplied.
    fn update_menu_list(&self, id: MenuListId, update: &MenuListUpdate)
    -> RepositoryResult<MenuList>;
}

/// Read access to the navigation tree.
pub trait DropDownMenuReader {
    /// The record with the lowest id, if any.
    fn first_drop_down_menu(&self) -> RepositoryResult<Option<DropDownMenu>>;
}

/// Write access to the navigation tree.
pub trait DropDownMenuWriter {
    /// Overwrite the first record's data, creating the record if needed.
    fn save_drop_down_menu(&self, data: Option<&Value>) -> RepositoryResult<DropDownMenu>;
}

/// Read-only operations for landing page hero images.
pub trait LandingPageImageReader {
    /// A uniformly random record, if any exist.
    fn random_landing_page_image(&self) -> RepositoryResult<Option<LandingPageImage>>;
    /// Retrieve a record by identifier.
    fn get_landing_page_image_by_id(
        &self,
        id: LandingPageImageId,
    ) -> RepositoryResult<Option<LandingPageImage>>;
}

/// Write operations for landing page hero images.
pub trait LandingPageImageWriter {
    /// Persist a new hero image.
    fn create_landing_page_image(
        &self,
        image: &NewLandingPageImage,
    ) -> RepositoryResult<LandingPageImage>;
}
