use crate::forms::{FormErrors, REQUIRED, RawForm};
use crate::media::ImageSource;

#[derive(Debug)]
pub struct LandingPageImageForm {
    pub image: Option<ImageSource>,
}

impl LandingPageImageForm {
    pub fn from_raw(mut raw: RawForm) -> Self {
        Self {
            image: raw.take_image("image"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LandingPageImagePayload {
    pub source: ImageSource,
}

impl TryFrom<LandingPageImageForm> for LandingPageImagePayload {
    type Error = FormErrors;

    fn try_from(form: LandingPageImageForm) -> Result<Self, Self::Error> {
        match form.image {
            Some(source) => Ok(Self { source }),
            None => {
                let mut errors = FormErrors::default();
                errors.add("image", REQUIRED);
                Err(errors)
            }
        }
    }
}
