use diesel::prelude::*;

use crate::domain::drop_down_menu::DropDownMenu as DomainDropDownMenu;
use crate::domain::types::TypeConstraintError;
use crate::models::meta_from_column;

/// Diesel model representing the `drop_down_menus` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::drop_down_menus)]
pub struct DropDownMenu {
    pub id: i32,
    pub data: Option<String>,
}

impl TryFrom<DropDownMenu> for DomainDropDownMenu {
    type Error = TypeConstraintError;

    fn try_from(menu: DropDownMenu) -> Result<Self, Self::Error> {
        Ok(Self {
            id: menu.id.try_into()?,
            data: meta_from_column(menu.data)?,
        })
    }
}
