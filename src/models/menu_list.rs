use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::menu_list::{
    MenuList as DomainMenuList, MenuListItem as DomainMenuListItem,
    NewMenuList as DomainNewMenuList, NewMenuListItem as DomainNewMenuListItem,
};
use crate::domain::types::{
    ImageName, MenuItemName, MenuItemUrl, MenuListName, TypeConstraintError,
};
use crate::domain::slug::name_key;
use crate::models::meta_from_column;

/// Diesel model representing the `menu_lists` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::menu_lists)]
pub struct MenuList {
    pub id: i32,
    pub name: String,
    pub meta: Option<String>,
    pub created_on: NaiveDateTime,
    pub name_key: String,
}

/// Insertable form of [`MenuList`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::menu_lists)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewMenuList {
    pub name: String,
    pub meta: Option<String>,
    pub created_on: NaiveDateTime,
    pub name_key: String,
}

impl NewMenuList {
    pub fn from_domain(menu_list: &DomainNewMenuList, created_on: NaiveDateTime) -> Self {
        Self {
            name: menu_list.name.as_str().to_string(),
            meta: menu_list.meta.as_ref().map(ToString::to_string),
            created_on,
            name_key: name_key(menu_list.name.as_str()),
        }
    }
}

/// Diesel model representing the `menu_list_items` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::menu_list_items)]
pub struct MenuListItem {
    pub id: i32,
    pub menu_list_id: i32,
    pub name: String,
    pub image: String,
    pub url: String,
    pub sort_order: i32,
}

/// Insertable form of [`MenuListItem`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::menu_list_items)]
pub struct NewMenuListItem<'a> {
    pub menu_list_id: i32,
    pub name: &'a str,
    pub image: &'a str,
    pub url: &'a str,
    pub sort_order: i32,
}

impl<'a> NewMenuListItem<'a> {
    pub fn from_domain(menu_list_id: i32, item: &'a DomainNewMenuListItem) -> Self {
        Self {
            menu_list_id,
            name: item.name.as_str(),
            image: item.image.as_str(),
            url: item.url.as_str(),
            sort_order: item.order.get(),
        }
    }
}

impl TryFrom<MenuListItem> for DomainMenuListItem {
    type Error = TypeConstraintError;

    fn try_from(item: MenuListItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: item.id.try_into()?,
            menu_list_id: item.menu_list_id.try_into()?,
            name: MenuItemName::new(item.name)?,
            image: ImageName::new(item.image)?,
            url: MenuItemUrl::new(item.url)?,
            order: item.sort_order.try_into()?,
        })
    }
}

impl TryFrom<(MenuList, Vec<MenuListItem>)> for DomainMenuList {
    type Error = TypeConstraintError;

    fn try_from((menu_list, items): (MenuList, Vec<MenuListItem>)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: menu_list.id.try_into()?,
            name: MenuListName::new(menu_list.name)?,
            meta: meta_from_column(menu_list.meta)?,
            created_on: menu_list.created_on,
            items: items
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}
