use serde_json::Value;
use validator::Validate;

use crate::domain::ordering::assign_dense_order;
use crate::domain::types::{DisplayOrder, MenuItemName, MenuItemUrl, MenuListName};
use crate::forms::{FormErrors, RawForm, RawGroup, REQUIRED, checked, parse_meta, parse_order};
use crate::media::ImageSource;

pub const RECORDS: &str = "records";

#[derive(Debug, Validate)]
pub struct MenuListForm {
    #[validate(length(min = 1, message = "This field is required."))]
    pub name: String,
    pub meta: Option<String>,
    pub records: Option<Vec<MenuListItemForm>>,
}

#[derive(Debug, Validate)]
pub struct MenuListItemForm {
    pub index: usize,
    #[validate(length(min = 1, message = "This field is required."))]
    pub name: String,
    pub image: Option<ImageSource>,
    #[validate(length(min = 1, message = "This field is required."))]
    pub url: String,
    pub order: Option<String>,
}

impl MenuListForm {
    pub fn from_raw(mut raw: RawForm) -> Self {
        let records = raw
            .take_groups(RECORDS)
            .map(|groups| groups.into_iter().map(MenuListItemForm::from_group).collect());

        Self {
            name: raw.text("name").unwrap_or_default().to_string(),
            meta: raw.text("meta").map(str::to_string),
            records,
        }
    }
}

impl MenuListItemForm {
    fn from_group(mut group: RawGroup) -> Self {
        Self {
            index: group.index,
            name: group.text("name").unwrap_or_default().to_string(),
            image: group.take_image("image"),
            url: group.text("url").unwrap_or_default().to_string(),
            order: group.text("order").map(str::to_string),
        }
    }
}

/// Validated menu list input; see [`crate::forms::products::ProductPayload`].
#[derive(Debug, Clone, PartialEq)]
pub struct MenuListPayload {
    pub name: MenuListName,
    pub meta: Option<Option<Value>>,
    pub records: Option<Vec<MenuListItemPayload>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuListItemPayload {
    pub index: usize,
    pub name: MenuItemName,
    pub source: ImageSource,
    pub url: MenuItemUrl,
    pub order: DisplayOrder,
}

impl TryFrom<MenuListForm> for MenuListPayload {
    type Error = FormErrors;

    fn try_from(form: MenuListForm) -> Result<Self, Self::Error> {
        let mut errors = FormErrors::default();
        if let Err(e) = form.validate() {
            errors.extend_validation("", &e);
        }

        let name = checked(&mut errors, "name", MenuListName::new(form.name));
        let meta = parse_meta(form.meta.as_deref(), &mut errors);

        let records = form.records.map(|records| {
            let entries = records
                .into_iter()
                .filter_map(|record| validate_record(record, &mut errors))
                .collect::<Vec<_>>();
            assign_dense_order(entries)
                .into_iter()
                .map(|(order, (index, name, source, url))| MenuListItemPayload {
                    index,
                    name,
                    source,
                    url,
                    order,
                })
                .collect::<Vec<_>>()
        });

        match name {
            Some(name) if errors.is_empty() => Ok(Self {
                name,
                meta,
                records,
            }),
            _ => Err(errors),
        }
    }
}

type RecordEntry = (Option<i32>, (usize, MenuItemName, ImageSource, MenuItemUrl));

fn validate_record(record: MenuListItemForm, errors: &mut FormErrors) -> Option<RecordEntry> {
    let key = |field: &str| format!("{RECORDS}[{}].{field}", record.index);

    if let Err(e) = record.validate() {
        errors.extend_validation(&key(""), &e);
    }
    let order = parse_order(record.order.as_deref(), key("order"), errors);
    let name = checked(errors, &key("name"), MenuItemName::new(record.name.clone()));
    let url = checked(errors, &key("url"), MenuItemUrl::new(record.url.clone()));
    let source = record.image.clone();
    if source.is_none() {
        errors.add(key("image"), REQUIRED);
    }

    Some((order, (record.index, name?, source?, url?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(items: &[(&str, &str)]) -> RawForm {
        RawForm::from_pairs(
            items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn payload(items: &[(&str, &str)]) -> Result<MenuListPayload, FormErrors> {
        MenuListPayload::try_from(MenuListForm::from_raw(raw(items)))
    }

    #[test]
    fn records_are_densely_ordered() {
        let payload = payload(&[
            ("name", "Seating"),
            ("records[0].name", "Sofas"),
            ("records[0].image", "sofas.jpg"),
            ("records[0].url", "/sofas"),
            ("records[0].order", "9"),
            ("records[1].name", "Chairs"),
            ("records[1].image", "chairs.jpg"),
            ("records[1].url", "/chairs"),
            ("records[1].order", "2"),
        ])
        .unwrap();

        let records = payload.records.unwrap();
        assert_eq!(records[0].name.as_str(), "Chairs");
        assert_eq!(records[0].order.get(), 1);
        assert_eq!(records[1].name.as_str(), "Sofas");
        assert_eq!(records[1].order.get(), 2);
    }

    #[test]
    fn relative_urls_are_allowed() {
        let payload = payload(&[
            ("name", "Tables"),
            ("records[0].name", "Coffee"),
            ("records[0].image", "coffee.jpg"),
            ("records[0].url", "coffee-tables"),
        ])
        .unwrap();

        assert_eq!(payload.records.unwrap()[0].url.as_str(), "coffee-tables");
    }

    #[test]
    fn without_records_keeps_items() {
        let payload = payload(&[("name", "Tables"), ("meta", "{}")]).unwrap();
        assert_eq!(payload.records, None);
        assert_eq!(payload.meta, Some(Some(serde_json::json!({}))));
    }

    #[test]
    fn reports_record_errors() {
        let errors = payload(&[("name", ""), ("records[2].name", "Beds")]).unwrap_err();

        assert!(errors.get("name").is_some());
        assert_eq!(errors.get("records[2].image"), Some(&[REQUIRED.to_string()][..]));
        assert_eq!(errors.get("records[2].url"), Some(&[REQUIRED.to_string()][..]));
        assert!(errors.get("records[2].name").is_none());
    }
}
