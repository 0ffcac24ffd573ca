use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::product::{NewProduct, NewProductImage, Product, ProductImage, ProductUpdate};
use crate::domain::slug::name_key;
use crate::domain::types::{ProductId, ProductImageId};
use crate::models::product::{NewProduct as DbNewProduct, Product as DbProduct};
use crate::models::product_image::{
    NewProductImage as DbNewProductImage, ProductImage as DbProductImage,
};
use crate::repository::{
    DieselRepository, ProductReader, ProductWriter, RepositoryError, RepositoryResult,
};

/// Attach the gallery to a product row.
fn hydrate(conn: &mut SqliteConnection, product: DbProduct) -> RepositoryResult<Product> {
    use crate::schema::product_images;

    let images = product_images::table
        .filter(product_images::product_id.eq(product.id))
        .order((product_images::sort_order.asc(), product_images::id.asc()))
        .load::<DbProductImage>(conn)?;

    Ok((product, images).try_into()?)
}

fn insert_gallery(
    conn: &mut SqliteConnection,
    product_id: i32,
    images: &[NewProductImage],
) -> RepositoryResult<usize> {
    use crate::schema::product_images;

    if images.is_empty() {
        return Ok(0);
    }

    let now = Utc::now().naive_utc();
    let rows = images
        .iter()
        .map(|image| DbNewProductImage::from_domain(product_id, image, now))
        .collect::<Vec<_>>();

    Ok(diesel::insert_into(product_images::table)
        .values(&rows)
        .execute(conn)?)
}

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let product = products::table
            .find(id.get())
            .first::<DbProduct>(&mut conn)
            .optional()?;

        product.map(|p| hydrate(&mut conn, p)).transpose()
    }

    fn find_product_by_name(&self, name: &str) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let product = products::table
            .filter(products::name_key.eq(name_key(name)))
            .order(products::id.asc())
            .first::<DbProduct>(&mut conn)
            .optional()?;

        product.map(|p| hydrate(&mut conn, p)).transpose()
    }

    fn get_product_image_by_id(
        &self,
        id: ProductImageId,
    ) -> RepositoryResult<Option<ProductImage>> {
        use crate::schema::product_images;

        let mut conn = self.conn()?;

        let image = product_images::table
            .find(id.get())
            .first::<DbProductImage>(&mut conn)
            .optional()?;

        Ok(image.map(TryInto::try_into).transpose()?)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_product = DbNewProduct::from_domain(product, Utc::now().naive_utc());

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let product_id = diesel::insert_into(products::table)
                .values(&db_product)
                .returning(products::id)
                .get_result::<i32>(conn)?;

            insert_gallery(conn, product_id, &product.images)?;

            let row = products::table.find(product_id).first::<DbProduct>(conn)?;
            hydrate(conn, row)
        })
    }

    fn update_product(&self, id: ProductId, update: &ProductUpdate) -> RepositoryResult<Product> {
        use crate::schema::{product_images, products};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let affected = diesel::update(products::table.find(id.get()))
                .set((
                    products::name.eq(update.name.as_str()),
                    products::name_key.eq(name_key(update.name.as_str())),
                    products::blurb.eq(update.blurb.as_str()),
                ))
                .execute(conn)?;

            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }

            if let Some(meta) = &update.meta {
                diesel::update(products::table.find(id.get()))
                    .set(products::meta.eq(meta.as_ref().map(ToString::to_string)))
                    .execute(conn)?;
            }

            if let Some(images) = &update.images {
                diesel::delete(
                    product_images::table.filter(product_images::product_id.eq(id.get())),
                )
                .execute(conn)?;
                insert_gallery(conn, id.get(), images)?;
            }

            let row = products::table.find(id.get()).first::<DbProduct>(conn)?;
            hydrate(conn, row)
        })
    }
}
