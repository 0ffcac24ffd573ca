use serde::Serialize;
use serde_json::Value;

use crate::domain::menu_list::{MenuList, MenuListItem};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuListDto {
    pub id: i32,
    pub name: String,
    pub meta: Option<Value>,
    /// Items keep the `records` key used by the editorial tool.
    pub records: Vec<MenuListItemDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuListItemDto {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub url: String,
    pub order: i32,
}

impl From<MenuList> for MenuListDto {
    fn from(value: MenuList) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            meta: value.meta,
            records: value.items.into_iter().map(MenuListItemDto::from).collect(),
        }
    }
}

impl From<MenuListItem> for MenuListItemDto {
    fn from(value: MenuListItem) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            image: value.image.into_inner(),
            url: value.url.into_inner(),
            order: value.order.get(),
        }
    }
}
