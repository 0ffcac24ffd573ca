use diesel::prelude::*;
use serde_json::Value;

use crate::domain::drop_down_menu::DropDownMenu;
use crate::models::drop_down_menu::DropDownMenu as DbDropDownMenu;
use crate::repository::{
    DieselRepository, DropDownMenuReader, DropDownMenuWriter, RepositoryError, RepositoryResult,
};

impl DropDownMenuReader for DieselRepository {
    fn first_drop_down_menu(&self) -> RepositoryResult<Option<DropDownMenu>> {
        use crate::schema::drop_down_menus;

        let mut conn = self.conn()?;

        let menu = drop_down_menus::table
            .order(drop_down_menus::id.asc())
            .first::<DbDropDownMenu>(&mut conn)
            .optional()?;

        Ok(menu.map(TryInto::try_into).transpose()?)
    }
}

impl DropDownMenuWriter for DieselRepository {
    fn save_drop_down_menu(&self, data: Option<&Value>) -> RepositoryResult<DropDownMenu> {
        use crate::schema::drop_down_menus;

        let mut conn = self.conn()?;
        let data = data.map(ToString::to_string);

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let existing = drop_down_menus::table
                .order(drop_down_menus::id.asc())
                .select(drop_down_menus::id)
                .first::<i32>(conn)
                .optional()?;

            let id = match existing {
                Some(id) => {
                    diesel::update(drop_down_menus::table.find(id))
                        .set(drop_down_menus::data.eq(data.as_deref()))
                        .execute(conn)?;
                    id
                }
                // Bound explicitly so that a `None` inserts NULL.
                None => diesel::insert_into(drop_down_menus::table)
                    .values(drop_down_menus::data.eq(data.as_deref()))
                    .returning(drop_down_menus::id)
                    .get_result::<i32>(conn)?,
            };

            let row = drop_down_menus::table
                .find(id)
                .first::<DbDropDownMenu>(conn)?;
            Ok(row.try_into()?)
        })
    }
}
