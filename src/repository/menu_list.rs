use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::menu_list::{
    MenuList, MenuListItem, MenuListUpdate, NewMenuList, NewMenuListItem,
};
use crate::domain::slug::name_key;
use crate::domain::types::{MenuListId, MenuListItemId};
use crate::models::menu_list::{
    MenuList as DbMenuList, MenuListItem as DbMenuListItem, NewMenuList as DbNewMenuList,
    NewMenuListItem as DbNewMenuListItem,
};
use crate::repository::{
    DieselRepository, MenuListReader, MenuListWriter, RepositoryError, RepositoryResult,
};

/// Attach the ordered items to a menu list row.
fn hydrate(conn: &mut SqliteConnection, menu_list: DbMenuList) -> RepositoryResult<MenuList> {
    use crate::schema::menu_list_items;

    let items = menu_list_items::table
        .filter(menu_list_items::menu_list_id.eq(menu_list.id))
        .order((menu_list_items::sort_order.asc(), menu_list_items::id.asc()))
        .load::<DbMenuListItem>(conn)?;

    Ok((menu_list, items).try_into()?)
}

fn insert_items(
    conn: &mut SqliteConnection,
    menu_list_id: i32,
    items: &[NewMenuListItem],
) -> RepositoryResult<usize> {
    use crate::schema::menu_list_items;

    if items.is_empty() {
        return Ok(0);
    }

    let rows = items
        .iter()
        .map(|item| DbNewMenuListItem::from_domain(menu_list_id, item))
        .collect::<Vec<_>>();

    Ok(diesel::insert_into(menu_list_items::table)
        .values(&rows)
        .execute(conn)?)
}

impl MenuListReader for DieselRepository {
    fn get_menu_list_by_id(&self, id: MenuListId) -> RepositoryResult<Option<MenuList>> {
        use crate::schema::menu_lists;

        let mut conn = self.conn()?;

        let menu_list = menu_lists::table
            .find(id.get())
            .first::<DbMenuList>(&mut conn)
            .optional()?;

        menu_list.map(|m| hydrate(&mut conn, m)).transpose()
    }

    fn find_menu_list_by_name(&self, name: &str) -> RepositoryResult<Option<MenuList>> {
        use crate::schema::menu_lists;

        let mut conn = self.conn()?;

        let menu_list = menu_lists::table
            .filter(menu_lists::name_key.eq(name_key(name)))
            .order(menu_lists::id.asc())
            .first::<DbMenuList>(&mut conn)
            .optional()?;

        menu_list.map(|m| hydrate(&mut conn, m)).transpose()
    }

    fn get_menu_list_item_by_id(
        &self,
        id: MenuListItemId,
    ) -> RepositoryResult<Option<MenuListItem>> {
        use crate::schema::menu_list_items;

        let mut conn = self.conn()?;

        let item = menu_list_items::table
            .find(id.get())
            .first::<DbMenuListItem>(&mut conn)
            .optional()?;

        Ok(item.map(TryInto::try_into).transpose()?)
    }
}

impl MenuListWriter for DieselRepository {
    fn create_menu_list(&self, menu_list: &NewMenuList) -> RepositoryResult<MenuList> {
        use crate::schema::menu_lists;

        let mut conn = self.conn()?;
        let db_menu_list = DbNewMenuList::from_domain(menu_list, Utc::now().naive_utc());

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let menu_list_id = diesel::insert_into(menu_lists::table)
                .values(&db_menu_list)
                .returning(menu_lists::id)
                .get_result::<i32>(conn)?;

            insert_items(conn, menu_list_id, &menu_list.items)?;

            let row = menu_lists::table
                .find(menu_list_id)
                .first::<DbMenuList>(conn)?;
            hydrate(conn, row)
        })
    }

    fn update_menu_list(
        &self,
        id: MenuListId,
        update: &MenuListUpdate,
    ) -> RepositoryResult<MenuList> {
        use crate::schema::{menu_list_items, menu_lists};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let affected = diesel::update(menu_lists::table.find(id.get()))
                .set((
                    menu_lists::name.eq(update.name.as_str()),
                    menu_lists::name_key.eq(name_key(update.name.as_str())),
                ))
                .execute(conn)?;

            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }

            if let Some(meta) = &update.meta {
                diesel::update(menu_lists::table.find(id.get()))
                    .set(menu_lists::meta.eq(meta.as_ref().map(ToString::to_string)))
                    .execute(conn)?;
            }

            if let Some(items) = &update.items {
                diesel::delete(
                    menu_list_items::table.filter(menu_list_items::menu_list_id.eq(id.get())),
                )
                .execute(conn)?;
                insert_items(conn, id.get(), items)?;
            }

            let row = menu_lists::table.find(id.get()).first::<DbMenuList>(conn)?;
            hydrate(conn, row)
        })
    }
}
