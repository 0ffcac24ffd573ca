use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ImageName, LandingPageImageId};

/// Hero image rotated on the landing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LandingPageImage {
    pub id: LandingPageImageId,
    pub image: ImageName,
    pub thumbnail: Option<ImageName>,
    pub created_on: NaiveDateTime,
    pub updated_on: NaiveDateTime,
}

/// Data required to insert a new [`LandingPageImage`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewLandingPageImage {
    pub image: ImageName,
    pub thumbnail: Option<ImageName>,
}
