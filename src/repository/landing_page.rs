use chrono::Utc;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Integer;

use crate::domain::landing_page::{LandingPageImage, NewLandingPageImage};
use crate::domain::types::LandingPageImageId;
use crate::models::landing_page_image::{
    LandingPageImage as DbLandingPageImage, NewLandingPageImage as DbNewLandingPageImage,
};
use crate::repository::{
    DieselRepository, LandingPageImageReader, LandingPageImageWriter, RepositoryResult,
};

impl LandingPageImageReader for DieselRepository {
    fn random_landing_page_image(&self) -> RepositoryResult<Option<LandingPageImage>> {
        use crate::schema::landing_page_images;

        let mut conn = self.conn()?;

        let image = landing_page_images::table
            .order(sql::<Integer>("RANDOM()"))
            .first::<DbLandingPageImage>(&mut conn)
            .optional()?;

        Ok(image.map(TryInto::try_into).transpose()?)
    }

    fn get_landing_page_image_by_id(
        &self,
        id: LandingPageImageId,
    ) -> RepositoryResult<Option<LandingPageImage>> {
        use crate::schema::landing_page_images;

        let mut conn = self.conn()?;

        let image = landing_page_images::table
            .find(id.get())
            .first::<DbLandingPageImage>(&mut conn)
            .optional()?;

        Ok(image.map(TryInto::try_into).transpose()?)
    }
}

impl LandingPageImageWriter for DieselRepository {
    fn create_landing_page_image(
        &self,
        image: &NewLandingPageImage,
    ) -> RepositoryResult<LandingPageImage> {
        use crate::schema::landing_page_images;

        let mut conn = self.conn()?;
        let db_image = DbNewLandingPageImage::from_domain(image, Utc::now().naive_utc());

        let row = diesel::insert_into(landing_page_images::table)
            .values(&db_image)
            .get_result::<DbLandingPageImage>(&mut conn)?;

        Ok(row.try_into()?)
    }
}
