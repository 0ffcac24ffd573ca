pub mod errors;
pub mod landing_pages;
pub mod lookup;
pub mod media;
pub mod menu_lists;
pub mod navigation;
pub mod products;

pub use errors::{ServiceError, ServiceResult};
