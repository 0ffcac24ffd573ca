use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::types::{
    DisplayOrder, ImageName, MenuItemName, MenuItemUrl, MenuListId, MenuListItemId, MenuListName,
};

/// A named navigation list (e.g. a collection page) with ordered entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuList {
    pub id: MenuListId,
    pub name: MenuListName,
    pub meta: Option<Value>,
    pub created_on: NaiveDateTime,
    /// Entries sorted by `order`.
    pub items: Vec<MenuListItem>,
}

/// One tile of a [`MenuList`] linking to another page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuListItem {
    pub id: MenuListItemId,
    pub menu_list_id: MenuListId,
    pub name: MenuItemName,
    pub image: ImageName,
    pub url: MenuItemUrl,
    pub order: DisplayOrder,
}

/// Information required to create a new [`MenuList`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMenuList {
    pub name: MenuListName,
    pub meta: Option<Value>,
    pub items: Vec<NewMenuListItem>,
}

/// Menu entry whose image has already been written to media storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMenuListItem {
    pub name: MenuItemName,
    pub image: ImageName,
    pub url: MenuItemUrl,
    pub order: DisplayOrder,
}

/// Changes applied to an existing [`MenuList`]; see [`crate::domain::product::ProductUpdate`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuListUpdate {
    pub name: MenuListName,
    pub meta: Option<Option<Value>>,
    pub items: Option<Vec<NewMenuListItem>>,
}
