use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::landing_page::LandingPageImage;

/// Hero image as rendered by the rotating landing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandingPageHeroDto {
    pub image: String,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandingPageImageDto {
    pub id: i32,
    pub image: String,
    pub thumbnail: Option<String>,
    pub created_on: NaiveDateTime,
    pub updated_on: NaiveDateTime,
}

impl From<LandingPageImage> for LandingPageHeroDto {
    fn from(value: LandingPageImage) -> Self {
        Self {
            image: value.image.into_inner(),
            thumbnail: value.thumbnail.map(|t| t.into_inner()),
        }
    }
}

impl From<LandingPageImage> for LandingPageImageDto {
    fn from(value: LandingPageImage) -> Self {
        Self {
            id: value.id.get(),
            image: value.image.into_inner(),
            thumbnail: value.thumbnail.map(|t| t.into_inner()),
            created_on: value.created_on,
            updated_on: value.updated_on,
        }
    }
}
