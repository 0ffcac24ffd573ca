use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::landing_page::{
    LandingPageImage as DomainLandingPageImage, NewLandingPageImage as DomainNewLandingPageImage,
};
use crate::domain::types::{ImageName, TypeConstraintError};

/// Diesel model representing the `landing_page_images` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::landing_page_images)]
pub struct LandingPageImage {
    pub id: i32,
    pub image: String,
    pub thumbnail: Option<String>,
    pub created_on: NaiveDateTime,
    pub updated_on: NaiveDateTime,
}

/// Insertable form of [`LandingPageImage`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::landing_page_images)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewLandingPageImage<'a> {
    pub image: &'a str,
    pub thumbnail: Option<&'a str>,
    pub created_on: NaiveDateTime,
    pub updated_on: NaiveDateTime,
}

impl<'a> NewLandingPageImage<'a> {
    pub fn from_domain(image: &'a DomainNewLandingPageImage, now: NaiveDateTime) -> Self {
        Self {
            image: image.image.as_str(),
            thumbnail: image.thumbnail.as_ref().map(|t| t.as_str()),
            created_on: now,
            updated_on: now,
        }
    }
}

impl TryFrom<LandingPageImage> for DomainLandingPageImage {
    type Error = TypeConstraintError;

    fn try_from(image: LandingPageImage) -> Result<Self, Self::Error> {
        Ok(Self {
            id: image.id.try_into()?,
            image: ImageName::new(image.image)?,
            thumbnail: image.thumbnail.map(ImageName::new).transpose()?,
            created_on: image.created_on,
            updated_on: image.updated_on,
        })
    }
}
