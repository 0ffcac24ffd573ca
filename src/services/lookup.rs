//! Slug lookup across menu lists and products.
//!
//! Menu lists are consulted first; a product is only returned when no menu
//! list carries the normalised name.

use crate::dto::EntryDto;
use crate::forms::RawForm;
use crate::forms::menu_lists::{MenuListForm, MenuListPayload};
use crate::forms::products::{ProductForm, ProductPayload};
use crate::media::MediaPipeline;
use crate::repository::{MenuListReader, MenuListWriter, ProductReader, ProductWriter};
use crate::services::menu_lists::{apply_menu_list_update, find_menu_list};
use crate::services::products::{apply_product_update, find_product};

use super::{ServiceError, ServiceResult};

pub const NOT_FOUND_MESSAGE: &str = "No matching MenuList or Product found";

enum Entry {
    MenuList(crate::domain::menu_list::MenuList),
    Product(crate::domain::product::Product),
}

fn resolve<R>(slug: &str, repo: &R) -> ServiceResult<Entry>
where
    R: MenuListReader + ProductReader,
{
    match find_menu_list(slug, repo) {
        Ok(menu_list) => return Ok(Entry::MenuList(menu_list)),
        Err(ServiceError::NotFound) => {}
        Err(e) => return Err(e),
    }
    find_product(slug, repo).map(Entry::Product)
}

pub fn show_entry<R>(slug: &str, repo: &R) -> ServiceResult<EntryDto>
where
    R: MenuListReader + ProductReader,
{
    Ok(match resolve(slug, repo)? {
        Entry::MenuList(menu_list) => EntryDto::MenuList(menu_list.into()),
        Entry::Product(product) => EntryDto::Product(product.into()),
    })
}

/// Update whichever record the slug resolves to.
///
/// The form is interpreted once the target type is known, so a menu list
/// expects `records[...]` and a product expects `blurb` and `images[...]`.
pub async fn update_entry<R>(
    slug: &str,
    form: RawForm,
    repo: &R,
    media: &MediaPipeline,
) -> ServiceResult<EntryDto>
where
    R: MenuListReader + MenuListWriter + ProductReader + ProductWriter,
{
    match resolve(slug, repo)? {
        Entry::MenuList(menu_list) => {
            let payload = MenuListPayload::try_from(MenuListForm::from_raw(form))
                .map_err(ServiceError::Form)?;
            apply_menu_list_update(menu_list.id, payload, repo, media)
                .await
                .map(EntryDto::MenuList)
        }
        Entry::Product(product) => {
            let payload =
                ProductPayload::try_from(ProductForm::from_raw(form)).map_err(ServiceError::Form)?;
            apply_product_update(product.id, payload, repo, media)
                .await
                .map(EntryDto::Product)
        }
    }
}
