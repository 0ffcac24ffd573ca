use serde_json::Value;
use validator::Validate;

use crate::domain::ordering::assign_dense_order;
use crate::domain::types::{DisplayOrder, ImageCaption, ProductBlurb, ProductName};
use crate::forms::{FormErrors, RawForm, RawGroup, REQUIRED, checked, parse_meta, parse_order};
use crate::media::ImageSource;

pub const IMAGES: &str = "images";

/// Product fields as submitted by the editorial tool.
#[derive(Debug, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1, message = "This field is required."))]
    pub name: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub blurb: String,
    pub meta: Option<String>,
    pub images: Option<Vec<ProductImageForm>>,
}

#[derive(Debug, Validate)]
pub struct ProductImageForm {
    /// Index used in the submitted keys (`images[<index>].caption`).
    pub index: usize,
    pub image: Option<ImageSource>,
    pub order: Option<String>,
    #[validate(length(max = 200, message = "Ensure this value has at most 200 characters."))]
    pub caption: String,
}

impl ProductForm {
    pub fn from_raw(mut raw: RawForm) -> Self {
        let images = raw
            .take_groups(IMAGES)
            .map(|groups| groups.into_iter().map(ProductImageForm::from_group).collect());

        Self {
            name: raw.text("name").unwrap_or_default().to_string(),
            blurb: raw.text("blurb").unwrap_or_default().to_string(),
            meta: raw.text("meta").map(str::to_string),
            images,
        }
    }
}

impl ProductImageForm {
    fn from_group(mut group: RawGroup) -> Self {
        Self {
            index: group.index,
            image: group.take_image("image"),
            order: group.text("order").map(str::to_string),
            caption: group.text("caption").unwrap_or_default().to_string(),
        }
    }
}

/// Validated product input. Gallery images are not yet stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPayload {
    pub name: ProductName,
    pub blurb: ProductBlurb,
    /// `None` keeps the current metadata, `Some(None)` clears it.
    pub meta: Option<Option<Value>>,
    /// `None` keeps the current gallery; otherwise the replacement, densely ordered.
    pub images: Option<Vec<ProductImagePayload>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductImagePayload {
    pub index: usize,
    pub source: ImageSource,
    pub order: DisplayOrder,
    pub caption: ImageCaption,
}

impl TryFrom<ProductForm> for ProductPayload {
    type Error = FormErrors;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        let mut errors = FormErrors::default();
        if let Err(e) = form.validate() {
            errors.extend_validation("", &e);
        }

        let name = checked(&mut errors, "name", ProductName::new(form.name));
        let blurb = checked(&mut errors, "blurb", ProductBlurb::new(form.blurb));
        let meta = parse_meta(form.meta.as_deref(), &mut errors);

        let images = form.images.map(|images| {
            let entries = images
                .into_iter()
                .filter_map(|image| validate_image(image, &mut errors))
                .collect::<Vec<_>>();
            assign_dense_order(entries)
                .into_iter()
                .map(|(order, (index, source, caption))| ProductImagePayload {
                    index,
                    source,
                    order,
                    caption,
                })
                .collect::<Vec<_>>()
        });

        match (name, blurb) {
            (Some(name), Some(blurb)) if errors.is_empty() => Ok(Self {
                name,
                blurb,
                meta,
                images,
            }),
            _ => Err(errors),
        }
    }
}

type ImageEntry = (Option<i32>, (usize, ImageSource, ImageCaption));

fn validate_image(image: ProductImageForm, errors: &mut FormErrors) -> Option<ImageEntry> {
    let key = |field: &str| format!("{IMAGES}[{}].{field}", image.index);

    if let Err(e) = image.validate() {
        errors.extend_validation(&key(""), &e);
    }
    let order = parse_order(image.order.as_deref(), key("order"), errors);
    let caption = checked(errors, &key("caption"), ImageCaption::new(image.caption.clone()));
    let source = image.image.clone();
    if source.is_none() {
        errors.add(key("image"), REQUIRED);
    }

    Some((order, (image.index, source?, caption?)))
}
