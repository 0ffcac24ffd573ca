use crate::domain::menu_list::{MenuList, MenuListUpdate, NewMenuList, NewMenuListItem};
use crate::domain::slug::normalize_slug;
use crate::domain::types::{MenuListId, MenuListItemId};
use crate::dto::{MenuListDto, MenuListItemDto};
use crate::forms::FormErrors;
use crate::forms::menu_lists::{MenuListItemPayload, MenuListPayload, RECORDS};
use crate::media::MediaPipeline;
use crate::repository::{MenuListReader, MenuListWriter, RepositoryError};
use crate::services::media::{commit_images, prepare_image};

use super::{ServiceError, ServiceResult};

pub async fn create_menu_list<R>(
    payload: MenuListPayload,
    repo: &R,
    media: &MediaPipeline,
) -> ServiceResult<MenuListDto>
where
    R: MenuListWriter,
{
    let items = store_items(payload.records.unwrap_or_default(), media).await?;

    let menu_list = NewMenuList {
        name: payload.name,
        meta: payload.meta.flatten(),
        items,
    };

    match repo.create_menu_list(&menu_list) {
        Ok(menu_list) => {
            log::info!("Created menu list {} ({})", menu_list.id, menu_list.name);
            Ok(MenuListDto::from(menu_list))
        }
        Err(e) => {
            log::error!("Failed to create menu list: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Find the menu list addressed by a URL slug.
pub fn find_menu_list<R>(slug: &str, repo: &R) -> ServiceResult<MenuList>
where
    R: MenuListReader,
{
    let name = normalize_slug(slug);
    match repo.find_menu_list_by_name(&name) {
        Ok(Some(menu_list)) => Ok(menu_list),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to look up menu list '{name}': {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_menu_list<R>(slug: &str, repo: &R) -> ServiceResult<MenuListDto>
where
    R: MenuListReader,
{
    find_menu_list(slug, repo).map(MenuListDto::from)
}

pub async fn update_menu_list<R>(
    slug: &str,
    payload: MenuListPayload,
    repo: &R,
    media: &MediaPipeline,
) -> ServiceResult<MenuListDto>
where
    R: MenuListReader + MenuListWriter,
{
    let menu_list = find_menu_list(slug, repo)?;
    apply_menu_list_update(menu_list.id, payload, repo, media).await
}

/// Rename the menu list and, when supplied, replace its metadata and records.
pub async fn apply_menu_list_update<R>(
    id: MenuListId,
    payload: MenuListPayload,
    repo: &R,
    media: &MediaPipeline,
) -> ServiceResult<MenuListDto>
where
    R: MenuListWriter,
{
    let items = match payload.records {
        Some(records) => Some(store_items(records, media).await?),
        None => None,
    };

    let update = MenuListUpdate {
        name: payload.name,
        meta: payload.meta,
        items,
    };

    match repo.update_menu_list(id, &update) {
        Ok(menu_list) => Ok(MenuListDto::from(menu_list)),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to update menu list {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_menu_list_item<R>(id: i32, repo: &R) -> ServiceResult<MenuListItemDto>
where
    R: MenuListReader,
{
    let id = MenuListItemId::new(id).map_err(|_| ServiceError::NotFound)?;
    match repo.get_menu_list_item_by_id(id) {
        Ok(Some(item)) => Ok(MenuListItemDto::from(item)),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get menu list item {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Menu items keep their image as uploaded; no thumbnail is generated.
/// Nothing is written when any image is rejected.
async fn store_items(
    records: Vec<MenuListItemPayload>,
    media: &MediaPipeline,
) -> ServiceResult<Vec<NewMenuListItem>> {
    let mut errors = FormErrors::default();
    let mut prepared = Vec::with_capacity(records.len());
    let mut details = Vec::with_capacity(records.len());

    for record in records {
        let key = format!("{RECORDS}[{}].image", record.index);
        if let Some(ready) = prepare_image(media, record.source, false, &key, &mut errors).await? {
            prepared.push(ready);
            details.push((record.name, record.url, record.order));
        }
    }
    if !errors.is_empty() {
        return Err(ServiceError::Form(errors));
    }

    let stored = commit_images(media, prepared).await?;
    Ok(stored
        .into_iter()
        .zip(details)
        .map(|(stored, (name, url, order))| NewMenuListItem {
            name,
            image: stored.image,
            url,
            order,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::menu_list::MenuListItem;
    use crate::domain::types::{DisplayOrder, ImageName, MenuItemName, MenuItemUrl, MenuListName};
    use crate::forms::RawForm;
    use crate::forms::menu_lists::MenuListForm;
    use crate::repository::test::{TestRepository, epoch};
    use crate::services::media::test::TestMedia;

    fn sample_menu_list() -> MenuList {
        MenuList {
            id: MenuListId::new(3).unwrap(),
            name: MenuListName::new("Sev-Drulo Series").unwrap(),
            meta: None,
            created_on: epoch(),
            items: vec![MenuListItem {
                id: MenuListItemId::new(30).unwrap(),
                menu_list_id: MenuListId::new(3).unwrap(),
                name: MenuItemName::new("Sofa").unwrap(),
                image: ImageName::new("sofa.jpg").unwrap(),
                url: MenuItemUrl::new("/api/sev-drulo-sofa").unwrap(),
                order: DisplayOrder::new(1).unwrap(),
            }],
        }
    }

    fn payload(items: &[(&str, &str)]) -> MenuListPayload {
        let raw = RawForm::from_pairs(
            items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        MenuListPayload::try_from(MenuListForm::from_raw(raw)).unwrap()
    }

    #[test]
    fn exception_slug_finds_hyphenated_name() {
        let repo = TestRepository::new(vec![], vec![sample_menu_list()]);

        let menu_list = show_menu_list("sev-drulo-series", &repo).unwrap();

        assert_eq!(menu_list.name, "Sev-Drulo Series");
        assert_eq!(menu_list.records[0].url, "/api/sev-drulo-sofa");
    }

    #[test]
    fn shows_single_item() {
        let repo = TestRepository::new(vec![], vec![sample_menu_list()]);

        assert_eq!(show_menu_list_item(30, &repo).unwrap().name, "Sofa");
        assert_eq!(show_menu_list_item(31, &repo), Err(ServiceError::NotFound));
    }

    #[actix_web::test]
    async fn creates_menu_list_without_thumbnails() {
        let repo = TestRepository::default();
        let media = TestMedia::new();
        media.seed("beds.png");

        let menu_list = create_menu_list(
            payload(&[
                ("name", "Bedroom"),
                ("records[0].name", "Beds"),
                ("records[0].image", "beds.png"),
                ("records[0].url", "beds"),
            ]),
            &repo,
            &media.pipeline,
        )
        .await
        .unwrap();

        assert_eq!(menu_list.records.len(), 1);
        assert_eq!(menu_list.records[0].order, 1);
        assert!(!media.dir.path().join("thumbnails/beds.png.jpg").exists());
    }

    #[actix_web::test]
    async fn update_replaces_records_and_meta() {
        let repo = TestRepository::new(vec![], vec![sample_menu_list()]);
        let media = TestMedia::new();
        media.seed("chair.png");

        let menu_list = update_menu_list(
            "sev-drulo-series",
            payload(&[
                ("name", "Sev-Drulo Series"),
                ("meta", r#"{"hero":"chair.png"}"#),
                ("records[0].name", "Club Chair"),
                ("records[0].image", "chair.png"),
                ("records[0].url", "/api/sev-drulo-club-chair"),
            ]),
            &repo,
            &media.pipeline,
        )
        .await
        .unwrap();

        assert_eq!(menu_list.meta, Some(serde_json::json!({"hero": "chair.png"})));
        assert_eq!(menu_list.records.len(), 1);
        assert_eq!(menu_list.records[0].name, "Club Chair");
        assert_eq!(repo.menu_lists()[0].items[0].name.as_str(), "Club Chair");
    }

    #[actix_web::test]
    async fn update_without_records_keeps_items() {
        let repo = TestRepository::new(vec![], vec![sample_menu_list()]);
        let media = TestMedia::new();

        let menu_list = update_menu_list(
            "sev-drulo-series",
            payload(&[("name", "Renamed")]),
            &repo,
            &media.pipeline,
        )
        .await
        .unwrap();

        assert_eq!(menu_list.name, "Renamed");
        assert_eq!(menu_list.records.len(), 1);
    }
}
